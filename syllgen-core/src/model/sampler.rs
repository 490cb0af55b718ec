use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::transition_table::TransitionTable;
use crate::error::{NameGenError, Result};

/// Maximum number of syllable draws in one walk.
pub const MAX_WALK_STEPS: usize = 20;

/// Shortest name a successful sample may return.
pub const MIN_NAME_LEN: usize = 2;

/// Characters a name may not end with.
fn is_banned_tail(c: char) -> bool {
	matches!(c, '\'' | ' ' | '-')
}

/// Picks a syllable uniformly; an empty list behaves like an end of word.
fn draw<'a, R: Rng + ?Sized>(candidates: &'a [String], rng: &mut R) -> &'a str {
	candidates.choose(rng).map_or("", String::as_str)
}

/// Samples a new name from a transition table.
///
/// Performs a bounded random walk over the table, starting from the
/// start-of-word syllables, then polishes the result (capitalisation,
/// duplicate collapsing, short-part joining).
///
/// # Parameters
/// - `min_length`: a word ending before this length is restarted.
/// - `max_length`: a syllable that would overflow it ends the walk; it is
///   still appended when the word has not reached `min_length` yet.
/// - `no_duplicates`: characters collapsed when doubled.
///
/// # Errors
/// - `InvalidBase` if the table has no start-of-word entry.
/// - `GenerationFailure` if the polished name is shorter than 2 characters.
pub fn sample<R: Rng + ?Sized>(
	table: &TransitionTable,
	min_length: usize,
	max_length: usize,
	no_duplicates: &HashSet<char>,
	rng: &mut R,
) -> Result<String> {
	let start = table
		.start()
		.ok_or_else(|| NameGenError::InvalidBase("no start-of-word transitions".to_owned()))?;

	let word = walk(table, start, min_length, max_length, rng);
	let name = polish(word.trim_end_matches(is_banned_tail), no_duplicates);

	if name.chars().count() < MIN_NAME_LEN {
		return Err(NameGenError::GenerationFailure(name));
	}
	Ok(name)
}

/// Chains syllables until an end of word is drawn or a bound is hit.
fn walk<R: Rng + ?Sized>(
	table: &TransitionTable,
	start: &[String],
	min_length: usize,
	max_length: usize,
	rng: &mut R,
) -> String {
	let mut candidates = start;
	let mut word = String::new();
	let mut word_len = 0;
	let mut current = draw(candidates, rng);

	for _ in 0..MAX_WALK_STEPS {
		let current_len = current.chars().count();
		if current.is_empty() {
			if word_len >= min_length {
				break;
			}
			// end of word reached too early, start again
			word.clear();
			word_len = 0;
			candidates = start;
		} else {
			if word_len + current_len > max_length {
				if word_len < min_length {
					word.push_str(current);
				}
				break;
			}
			if let Some(next) = table.get(current.chars().last()) {
				candidates = next;
			}
		}

		word.push_str(current);
		word_len += current_len;
		current = draw(candidates, rng);
	}

	word
}

fn capitalize(part: &str) -> String {
	let mut chars = part.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Turns a raw walk into a displayable name.
fn polish(word: &str, no_duplicates: &HashSet<char>) -> String {
	let chars: Vec<char> = word.chars().collect();
	let mut name = String::with_capacity(word.len());

	for (i, &c) in chars.iter().enumerate() {
		let next = chars.get(i + 1).copied();

		// duplication is not allowed
		if next == Some(c) && no_duplicates.contains(&c) {
			continue;
		}

		match name.chars().last() {
			None => {
				name.extend(c.to_uppercase());
				continue;
			}
			Some('-') if c == ' ' => continue,
			Some(' ') | Some('-') => {
				name.extend(c.to_uppercase());
				continue;
			}
			Some(_) => {}
		}

		// "ae" => "e"
		if c == 'a' && next == Some('e') {
			continue;
		}

		// no three same letters in a row
		let mut tail = name.chars().rev();
		if tail.next() == Some(c) && tail.next() == Some(c) {
			continue;
		}

		name.push(c);
	}

	// join the word if any part has only 1 letter
	if name.split(' ').any(|part| part.chars().count() < MIN_NAME_LEN) {
		name = name.split(' ').map(capitalize).collect();
	}

	name
}
