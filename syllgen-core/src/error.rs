use thiserror::Error;

/// Every failure the name generator can report.
///
/// Validation errors (`EmptyBase`, `InvalidOptions`, `InvalidInput`) are
/// raised before any chain is touched. `InvalidBase` and
/// `GenerationFailure` signal that a chain exists but cannot produce a
/// usable name. None of them are retried by the library.
#[derive(Error, Debug)]
pub enum NameGenError {
	/// No example words were supplied for a base that is not cached yet.
	#[error("base words is empty (base_name={0})")]
	EmptyBase(String),

	/// The chain has no start-of-word entry, or the base could not be cached.
	#[error("invalid base: {0}")]
	InvalidBase(String),

	/// The post-processed name is shorter than the minimum allowed.
	#[error("name is too short (name={0})")]
	GenerationFailure(String),

	/// Input could not be classified, or a construction parameter is out of range.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// Generation options are malformed (empty base name, bad lengths).
	#[error("invalid options: {0}")]
	InvalidOptions(String),

	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	#[error("snapshot error: {0}")]
	Snapshot(#[from] postcard::Error),
}

pub type Result<T> = std::result::Result<T, NameGenError>;
