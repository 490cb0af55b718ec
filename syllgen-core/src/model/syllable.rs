use regex::Regex;

use crate::error::{NameGenError, Result};

/// Hard cap on the number of characters in one syllable.
pub const MAX_SYLLABLE_LEN: usize = 5;

/// Characters treated as vowels by the splitter.
///
/// Covers plain latin vowels, the apostrophe (used as a glottal stop in
/// many bases), IPA vowels, cyrillic vowels and the common accented forms.
const VOWELS: &str = "aeiouy'ɑəøɛœæɶɒɨɪɔɐʊɤɯаоиеёэыуюяàèìòùỳẁȁȅȉȍȕáéíóúýẃőűâêîôûŷŵäëïöüÿẅãẽĩõũỹąęįǫųāēīōūȳăĕĭŏŭǎěǐǒǔȧėȯẏẇạẹịọụỵẉḛḭṵṳ";

/// Returns `true` if `c` counts as a vowel for syllable breaking.
pub(crate) fn is_vowel(c: char) -> bool {
	VOWELS.contains(c)
}

fn is_boundary(c: char) -> bool {
	c == ' ' || c == '-'
}

/// One step of a word decomposition.
///
/// `pivot` is the character right before the syllable (`None` at the start
/// of the word). An empty `syllable` marks the end of the word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
	pub pivot: Option<char>,
	pub syllable: String,
}

/// Decides whether English-like digraph rules may be applied to a word.
///
/// A word is "basic" when it only contains ASCII characters.
#[derive(Debug, Clone)]
pub struct WordClassifier {
	non_ascii: Regex,
}

impl WordClassifier {
	/// Compiles the classification pattern.
	///
	/// # Errors
	/// Returns `InvalidInput` if the pattern cannot be compiled.
	pub fn new() -> Result<Self> {
		let non_ascii = Regex::new(r"[^\x00-\x7F]").map_err(|e| {
			NameGenError::InvalidInput(format!("can not match basic chars and en rules can be applied (err = {e})"))
		})?;
		Ok(Self { non_ascii })
	}

	/// Returns `true` if the word only contains ASCII characters.
	pub fn is_basic(&self, word: &str) -> bool {
		!self.non_ascii.is_match(word)
	}
}

/// Pairs of characters that are never split into two syllables.
fn is_kept_digraph(that: char, next: char, basic: bool) -> bool {
	if that == 'y' && next == 'e' {
		return true;
	}
	basic && matches!((that, next), ('o', 'o') | ('e', 'e') | ('a', 'e') | ('c', 'h'))
}

/// Splits a word into pseudo-syllables.
///
/// The word is trimmed and lower-cased first. The result lists every
/// syllable in left-to-right order together with its pivot, and always
/// ends with an empty syllable keyed by the last character.
///
/// # Notes
/// - UTF-8 safe: works on characters, not bytes.
/// - `basic` enables the `oo`, `ee`, `ae` and `ch` digraph rules.
pub fn split(word: &str, basic: bool) -> Vec<Transition> {
	let chars: Vec<char> = word.trim().to_lowercase().chars().collect();
	let len = chars.len();
	let mut transitions = Vec::new();

	// Index of the pivot character, `None` before the first character
	let mut cursor: Option<usize> = None;
	loop {
		let start = cursor.map_or(0, |i| i + 1);
		if start > len {
			break;
		}

		let pivot = cursor.map(|i| chars[i]);
		let mut syllable = String::new();
		let mut size = 0;
		let mut has_vowel = false;

		let mut c = start;
		while c < len && size < MAX_SYLLABLE_LEN {
			let that = chars[c];
			let next = chars.get(c + 1).copied();
			syllable.push(that);
			size += 1;
			c += 1;

			if size == 1 && is_boundary(that) {
				break;
			}
			let next = match next {
				Some(n) if !is_boundary(n) => n,
				_ => break,
			};

			if is_vowel(that) {
				has_vowel = true;
			}

			if is_kept_digraph(that, next, basic) {
				continue;
			}

			// two same vowels in a row
			if is_vowel(that) && that == next {
				break;
			}

			// a vowel is coming right after the next character
			if has_vowel && chars.get(c + 1).is_some_and(|&after_next| is_vowel(after_next)) {
				break;
			}
		}

		transitions.push(Transition { pivot, syllable });
		cursor = Some(start + size.max(1) - 1);
	}

	transitions
}
