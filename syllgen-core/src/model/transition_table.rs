use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::syllable::{split, WordClassifier};
use crate::error::Result;

/// Syllable transition table learned from the example words of one base.
///
/// Each pivot (`None` for the start of a word, otherwise the last character
/// of the previous syllable) maps to the list of syllables observed right
/// after it. An empty syllable in a list means "end of word".
///
/// ## Responsibilities:
/// - Build the table from example words
/// - Merge with another table of the same base
/// - Give the sampler access to candidate syllables per pivot
///
/// ## Invariants
/// - Lists keep duplicates after a build: repeated syllables weigh more
/// - A table built from at least one word has a `None` entry
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionTable {
	/// Example: { None => ["ab", "in", "in"], Some('b') => ["er", ""] }
	transitions: HashMap<Option<char>, Vec<String>>,
}

impl TransitionTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table from a list of example words.
	///
	/// Every word is split into syllables, and each syllable is appended
	/// to the list of its pivot.
	///
	/// # Errors
	/// Returns `InvalidInput` if the word classifier cannot be created.
	pub fn build<S: AsRef<str>>(words: &[S]) -> Result<Self> {
		let classifier = WordClassifier::new()?;
		let mut table = Self::new();
		for word in words {
			let word = word.as_ref();
			let basic = classifier.is_basic(word);
			for transition in split(word, basic) {
				table.add_transition(transition.pivot, transition.syllable);
			}
		}
		log::debug!("built transition table from {} words ({} pivots)", words.len(), table.len());
		Ok(table)
	}

	/// Records one occurrence of `syllable` after `pivot`.
	pub fn add_transition(&mut self, pivot: Option<char>, syllable: String) {
		self.transitions.entry(pivot).or_default().push(syllable);
	}

	/// Returns the syllables observed after `pivot`, if any.
	pub fn get(&self, pivot: Option<char>) -> Option<&[String]> {
		self.transitions.get(&pivot).map(Vec::as_slice)
	}

	/// Returns the syllables that can start a word.
	pub fn start(&self) -> Option<&[String]> {
		self.get(None)
	}

	/// Iterates over every pivot of the table, in no particular order.
	pub fn pivots(&self) -> impl Iterator<Item = Option<char>> + '_ {
		self.transitions.keys().copied()
	}

	/// Number of pivots.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Merges another table into this one.
	///
	/// For a pivot known by both tables, the list becomes the union of
	/// both lists without duplicates, in order of first occurrence.
	/// Pivots only known by `other` are copied as they are.
	pub fn merge(&mut self, other: &Self) {
		for (pivot, syllables) in &other.transitions {
			match self.transitions.get_mut(pivot) {
				Some(existing) => {
					let union: Vec<String> = {
						let mut seen = HashSet::new();
						existing
							.iter()
							.chain(syllables.iter())
							.filter(|s| seen.insert(s.as_str()))
							.cloned()
							.collect()
					};
					*existing = union;
				}
				None => {
					self.transitions.insert(*pivot, syllables.clone());
				}
			}
		}
	}

	/// Returns the union of `self` and `other` without modifying either.
	pub fn merged(&self, other: &Self) -> Self {
		let mut out = self.clone();
		out.merge(other);
		out
	}

	/// Encodes the table with postcard.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	/// Decodes a table previously produced by [`TransitionTable::to_bytes`].
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		Ok(postcard::from_bytes(bytes)?)
	}
}
