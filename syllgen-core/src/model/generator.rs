use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::chain_cache::{ChainCache, MAX_CHAINS_COUNT};
use super::generate_options::GenerateOptions;
use super::sampler::sample;
use super::transition_table::TransitionTable;
use crate::error::{NameGenError, Result};
use crate::io;

/// Maximum number of attempts to get a base into the cache before sampling.
pub const MAX_POPULATE_ATTEMPTS: usize = 20;

/// Builds a chain from `words` and stores it in `cache` under `base_name`.
///
/// If the base is already cached, the new chain is merged into it.
///
/// # Errors
/// Returns `EmptyBase` if `words` is empty; the cache is left unchanged.
pub fn update_chain<S: AsRef<str>>(cache: &mut ChainCache, base_name: &str, words: &[S]) -> Result<()> {
	if words.is_empty() {
		return Err(NameGenError::EmptyBase(base_name.to_owned()));
	}
	let chain = TransitionTable::build(words)?;
	cache.upsert(base_name, chain);
	Ok(())
}

/// Generates one name for the base described by `options`.
///
/// The base chain is built from `options.words()` on a cache miss only;
/// a cached base is used as it is.
///
/// # Errors
/// - `InvalidOptions` if the options are malformed
/// - `EmptyBase` if the base is not cached and no words are given
/// - `InvalidBase` if the chain cannot start a word
/// - `GenerationFailure` if the sampled name is too short
pub fn generate<R: Rng + ?Sized>(cache: &mut ChainCache, options: &GenerateOptions, rng: &mut R) -> Result<String> {
	options.validate()?;
	let base_name = options.base_name();

	for _ in 0..MAX_POPULATE_ATTEMPTS {
		if cache.contains(base_name) {
			break;
		}
		update_chain(cache, base_name, options.words())?;
	}

	let table = cache
		.get(base_name)
		.filter(|table| !table.is_empty())
		.ok_or_else(|| NameGenError::InvalidBase(format!("base_name {base_name} is incorrect")))?;

	sample(table, options.min_length(), options.max_length(), options.no_duplicates(), rng)
}

/// Loads (or builds) the chain of one word-list file.
///
/// A valid `.bin` snapshot next to the file is used when present.
/// Otherwise the chain is built from the words and the snapshot written.
fn load_chain(path: &Path) -> Result<(String, TransitionTable)> {
	let base_name = io::base_name_of(path)?;
	let snapshot = io::snapshot_path(path)?;

	if snapshot.exists() {
		let restored = fs::read(&snapshot)
			.map_err(NameGenError::from)
			.and_then(|bytes| TransitionTable::from_bytes(&bytes));
		match restored {
			Ok(table) => {
				log::debug!("restored base {base_name} from {}", snapshot.display());
				return Ok((base_name, table));
			}
			Err(e) => log::warn!("can not read snapshot {} ({e}), rebuilding", snapshot.display()),
		}
	}

	let words = io::read_words(path)?;
	if words.is_empty() {
		return Err(NameGenError::EmptyBase(base_name));
	}
	let table = TransitionTable::build(&words)?;
	fs::write(&snapshot, table.to_bytes()?)?;

	Ok((base_name, table))
}

/// High-level name generator owning a chain cache and a random source.
///
/// # Responsibilities
/// - Keep learned chains, one per base, in a bounded cache
/// - Generate names from cached or newly supplied bases
/// - Load bases from word-list files
///
/// The generator is not synchronized: callers sharing it between threads
/// must wrap it (ex. in a `Mutex`).
#[derive(Debug)]
pub struct Generator<R = StdRng> {
	cache: ChainCache,
	rng: R,
}

impl Generator<StdRng> {
	/// Creates a generator with the default capacity and an OS-seeded RNG.
	pub fn new() -> Self {
		Self {
			cache: ChainCache::default(),
			rng: StdRng::from_os_rng(),
		}
	}

	/// Creates a generator holding at most `capacity` bases.
	///
	/// # Errors
	/// Returns `InvalidInput` if `capacity` is zero.
	pub fn with_capacity(capacity: usize) -> Result<Self> {
		Generator::with_rng(capacity, StdRng::from_os_rng())
	}

	/// Creates a reproducible generator from a seed.
	pub fn seeded(capacity: usize, seed: u64) -> Result<Self> {
		Generator::with_rng(capacity, StdRng::seed_from_u64(seed))
	}
}

impl Default for Generator<StdRng> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: Rng> Generator<R> {
	/// Creates a generator drawing its randomness from `rng`.
	pub fn with_rng(capacity: usize, rng: R) -> Result<Self> {
		Ok(Self {
			cache: ChainCache::new(capacity)?,
			rng,
		})
	}

	/// Generates one name. See [`generate`].
	pub fn generate(&mut self, options: &GenerateOptions) -> Result<String> {
		generate(&mut self.cache, options, &mut self.rng)
	}

	/// Learns `words` for `base_name`, merging into a cached chain if any.
	pub fn update_chain<S: AsRef<str>>(&mut self, base_name: &str, words: &[S]) -> Result<()> {
		update_chain(&mut self.cache, base_name, words)
	}

	/// Returns `true` if the base is cached.
	pub fn contains(&self, base_name: &str) -> bool {
		self.cache.contains(base_name)
	}

	/// Returns the cached base names, oldest first.
	pub fn base_names(&self) -> Vec<String> {
		self.cache.base_names().map(str::to_owned).collect()
	}

	pub fn cache(&self) -> &ChainCache {
		&self.cache
	}

	/// Loads a single word-list file; the base name is the file stem.
	///
	/// Returns the name of the loaded base.
	pub fn load_base_file<P: AsRef<Path>>(&mut self, path: P) -> Result<String> {
		let (base_name, table) = load_chain(path.as_ref())?;
		self.cache.upsert(&base_name, table);
		Ok(base_name)
	}

	/// Loads every `.dat` word-list file of a directory.
	///
	/// # Behavior
	/// - Splits the files into one chunk per CPU.
	/// - Spawns threads to load or build the chains of each chunk.
	/// - Stores the chains in base-name order.
	///
	/// # Errors
	/// - Returns an error if the path is not a directory.
	/// - Returns the first error met while loading a file.
	pub fn load_folder<P: AsRef<Path>>(&mut self, folder: P) -> Result<Vec<String>> {
		let folder = folder.as_ref();
		if !folder.is_dir() {
			return Err(NameGenError::InvalidInput(format!("Expected a directory, got: {}", folder.display())));
		}

		let files: Vec<PathBuf> = io::list_base_files(folder)?;
		if files.is_empty() {
			return Ok(Vec::new());
		}

		let workers = num_cpus::get().max(1);
		let chunk_size = files.len().div_ceil(workers);

		let (tx, rx) = mpsc::channel();
		for chunk in files.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<PathBuf> = chunk.to_vec();

			thread::spawn(move || {
				for path in chunk {
					if tx.send(load_chain(&path)).is_err() {
						log::warn!("loader stopped before {}", path.display());
						return;
					}
				}
			});
		}
		drop(tx);

		let mut loaded = rx.iter().collect::<Result<Vec<_>>>()?;
		loaded.sort_by(|a, b| a.0.cmp(&b.0));

		let mut names = Vec::with_capacity(loaded.len());
		for (base_name, table) in loaded {
			self.cache.upsert(&base_name, table);
			names.push(base_name);
		}
		log::info!("loaded {} bases from {}", names.len(), folder.display());

		Ok(names)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const CELTIC: [&str; 12] = [
		"Aberaman", "Aberdeen", "Inverness", "Kirkcaldy", "Lochinver", "Boudobriga",
		"Eburodunum", "Ceredigion", "Invergarry", "Windobona", "Salodurum", "Theorsa",
	];

	#[test]
	fn empty_words_for_new_base_fail_and_leave_cache_unchanged() {
		let mut cache = ChainCache::new(4).unwrap();
		let words: [&str; 0] = [];
		assert!(matches!(update_chain(&mut cache, "b", &words), Err(NameGenError::EmptyBase(_))));
		assert!(cache.is_empty());
	}

	#[test]
	fn update_chain_twice_keeps_syllable_sets() {
		let mut cache = ChainCache::new(4).unwrap();
		update_chain(&mut cache, "celtic", &CELTIC).unwrap();
		let first = cache.get("celtic").unwrap().clone();
		update_chain(&mut cache, "celtic", &CELTIC).unwrap();
		let second = cache.get("celtic").unwrap();
		for pivot in first.pivots() {
			let a: std::collections::HashSet<_> = first.get(pivot).unwrap().iter().collect();
			let b: std::collections::HashSet<_> = second.get(pivot).unwrap().iter().collect();
			assert_eq!(a, b);
		}
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn generate_builds_base_on_miss_only() {
		let mut generator = Generator::seeded(4, 42).unwrap();
		let options = GenerateOptions::new("celtic", 4, 10).unwrap().with_words(CELTIC);
		generator.generate(&options).unwrap_or_default();
		assert!(generator.contains("celtic"));
		let before = generator.cache().get("celtic").unwrap().clone();

		// words are ignored once the base is cached
		let other = GenerateOptions::new("celtic", 4, 10).unwrap().with_words(["Zzyzx"]);
		generator.generate(&other).unwrap_or_default();
		assert_eq!(generator.cache().get("celtic").unwrap(), &before);
	}

	#[test]
	fn generate_unknown_base_without_words_fails() {
		let mut generator = Generator::seeded(4, 1).unwrap();
		let options = GenerateOptions::new("norse", 4, 10).unwrap();
		assert!(matches!(generator.generate(&options), Err(NameGenError::EmptyBase(_))));
		assert!(generator.base_names().is_empty());
	}

	#[test]
	fn zero_capacity_generator_is_rejected() {
		assert!(matches!(Generator::seeded(0, 1), Err(NameGenError::InvalidInput(_))));
	}

	#[test]
	fn seeded_generators_agree() {
		let options = GenerateOptions::new("celtic", 4, 10).unwrap().with_words(CELTIC);
		let mut a = Generator::seeded(4, 9).unwrap();
		let mut b = Generator::seeded(4, 9).unwrap();
		for _ in 0..20 {
			assert_eq!(a.generate(&options).ok(), b.generate(&options).ok());
		}
	}

	#[test]
	fn load_base_file_writes_and_reuses_snapshot() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("celtic.dat");
		fs::write(&path, CELTIC.join("\n")).unwrap();

		let mut generator = Generator::seeded(4, 1).unwrap();
		assert_eq!(generator.load_base_file(&path).unwrap(), "celtic");
		let snapshot = dir.path().join("celtic.bin");
		assert!(snapshot.exists());
		let built = generator.cache().get("celtic").unwrap().clone();

		// the snapshot wins over the word list
		fs::write(&path, "Zzyzx\n").unwrap();
		let mut restored = Generator::seeded(4, 1).unwrap();
		restored.load_base_file(&path).unwrap();
		assert_eq!(restored.cache().get("celtic").unwrap(), &built);
	}

	#[test]
	fn corrupt_snapshot_is_rebuilt() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("celtic.dat");
		fs::write(&path, CELTIC.join("\n")).unwrap();
		fs::write(dir.path().join("celtic.bin"), [0xffu8, 0xff, 0xff]).unwrap();

		let mut generator = Generator::seeded(4, 1).unwrap();
		generator.load_base_file(&path).unwrap();
		assert_eq!(generator.cache().get("celtic").unwrap(), &TransitionTable::build(&CELTIC).unwrap());
	}

	#[test]
	fn load_base_file_only_accepts_word_lists() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("celtic.txt");
		fs::write(&path, CELTIC.join("\n")).unwrap();

		let mut generator = Generator::seeded(4, 1).unwrap();
		assert!(matches!(generator.load_base_file(&path), Err(NameGenError::Io(_))));
		assert!(generator.base_names().is_empty());
		assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
	}

	#[test]
	fn load_folder_registers_bases_in_name_order() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("norse.dat"), "Oslo\nBergen\nTrondheim\n").unwrap();
		fs::write(dir.path().join("celtic.dat"), CELTIC.join("\n")).unwrap();
		fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

		let mut generator = Generator::seeded(4, 1).unwrap();
		assert_eq!(generator.load_folder(dir.path()).unwrap(), vec!["celtic", "norse"]);
		assert_eq!(generator.base_names(), vec!["celtic", "norse"]);
	}

	#[test]
	fn load_folder_rejects_files() {
		let file = tempfile::NamedTempFile::new().unwrap();
		let mut generator = Generator::seeded(4, 1).unwrap();
		assert!(matches!(generator.load_folder(file.path()), Err(NameGenError::InvalidInput(_))));
	}
}
