use std::collections::HashSet;

use crate::error::{NameGenError, Result};

/// Input parameters for one name generation.
///
/// # Responsibilities
/// - Name the base to generate from, and carry its example words
/// - Bound the length of the generated word
/// - List the characters that must not appear twice in a row
///
/// # Invariants
/// - `base_name` is not empty
/// - `1 <= min_length <= max_length`
#[derive(Clone, Debug)]
pub struct GenerateOptions {
	base_name: String,

	/// Example words, only required when the base is not cached yet.
	words: Vec<String>,

	min_length: usize,
	max_length: usize,

	/// Characters collapsed when doubled (ex. "ndl": "nn" -> "n").
	no_duplicates: HashSet<char>,
}

impl GenerateOptions {
	/// Creates options for `base_name` with the given length bounds.
	///
	/// # Errors
	/// Returns `InvalidOptions` if the base name is empty or the bounds are invalid.
	pub fn new(base_name: &str, min_length: usize, max_length: usize) -> Result<Self> {
		let options = Self {
			base_name: base_name.to_owned(),
			words: Vec::new(),
			min_length,
			max_length,
			no_duplicates: HashSet::new(),
		};
		options.validate()?;
		Ok(options)
	}

	/// Sets the example words of the base.
	pub fn with_words<I, S>(mut self, words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.words = words.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the characters that may not be doubled.
	pub fn with_no_duplicates(mut self, chars: &str) -> Self {
		self.no_duplicates = chars.chars().collect();
		self
	}

	pub fn base_name(&self) -> &str {
		&self.base_name
	}

	/// Example words of the base.
	pub fn words(&self) -> &[String] {
		&self.words
	}

	pub fn min_length(&self) -> usize {
		self.min_length
	}

	pub fn max_length(&self) -> usize {
		self.max_length
	}

	pub fn no_duplicates(&self) -> &HashSet<char> {
		&self.no_duplicates
	}

	/// Sets both length bounds.
	///
	/// # Errors
	/// Returns `InvalidOptions` if `min_length` is 0 or greater than `max_length`.
	/// The previous bounds are kept on error.
	pub fn set_lengths(&mut self, min_length: usize, max_length: usize) -> Result<()> {
		check_lengths(min_length, max_length)?;
		self.min_length = min_length;
		self.max_length = max_length;
		Ok(())
	}

	/// Checks every invariant of the options.
	pub fn validate(&self) -> Result<()> {
		if self.base_name.is_empty() {
			return Err(NameGenError::InvalidOptions("Please define a base".to_owned()));
		}
		check_lengths(self.min_length, self.max_length)
	}
}

fn check_lengths(min_length: usize, max_length: usize) -> Result<()> {
	if min_length == 0 {
		return Err(NameGenError::InvalidOptions("min length must be >= 1".to_owned()));
	}
	if min_length > max_length {
		return Err(NameGenError::InvalidOptions(format!(
			"min length ({min_length}) is greater than max length ({max_length})"
		)));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_empty_base_name() {
		assert!(matches!(GenerateOptions::new("", 2, 4), Err(NameGenError::InvalidOptions(_))));
	}

	#[test]
	fn rejects_bad_bounds() {
		assert!(GenerateOptions::new("x", 0, 4).is_err());
		assert!(GenerateOptions::new("x", 5, 4).is_err());
		assert!(GenerateOptions::new("x", 4, 4).is_ok());
	}

	#[test]
	fn set_lengths_keeps_previous_bounds_on_error() {
		let mut options = GenerateOptions::new("x", 2, 4).unwrap();
		assert!(options.set_lengths(9, 3).is_err());
		assert_eq!((options.min_length(), options.max_length()), (2, 4));
		options.set_lengths(3, 9).unwrap();
		assert_eq!((options.min_length(), options.max_length()), (3, 9));
	}

	#[test]
	fn builders_fill_words_and_duplicates() {
		let options = GenerateOptions::new("x", 2, 4).unwrap().with_words(["aa", "bb"]).with_no_duplicates("nd");
		assert_eq!(options.words(), &["aa".to_owned(), "bb".to_owned()][..]);
		assert!(options.no_duplicates().contains(&'n'));
		assert!(!options.no_duplicates().contains(&'l'));
	}
}
