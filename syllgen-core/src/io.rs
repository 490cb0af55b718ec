use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::ffi::OsStr;
use std::{fs, io};

/// Extension of base word-list files.
pub const BASE_EXTENSION: &str = "dat";

/// Extension of chain snapshot files.
pub const SNAPSHOT_EXTENSION: &str = "bin";

/// Reads a base word-list file, one example word per line.
///
/// - Surrounding whitespace of every line is trimmed
/// - Blank lines are skipped
pub fn read_words<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect())
}

fn is_word_list(path: &Path) -> bool {
	path.extension() == Some(OsStr::new(BASE_EXTENSION))
}

fn not_a_word_list(path: &Path) -> io::Error {
	io::Error::new(
		io::ErrorKind::InvalidInput,
		format!("{} is not a .{BASE_EXTENSION} word list", path.display()),
	)
}

/// Path of the snapshot stored next to a word-list file.
///
/// Example:
/// `data/celtic.dat` → `data/celtic.bin`
///
/// # Errors
/// Returns `InvalidInput` for a path without the word-list extension, so a
/// snapshot can never overwrite its own source file.
pub(crate) fn snapshot_path(word_list: &Path) -> io::Result<PathBuf> {
	if !is_word_list(word_list) {
		return Err(not_a_word_list(word_list));
	}
	Ok(word_list.with_extension(SNAPSHOT_EXTENSION))
}

/// Base name of a word-list file: `./data/celtic.dat` → `celtic`.
///
/// # Errors
/// Returns `InvalidInput` when the path is not a word list or when its
/// name is empty or not valid UTF-8.
pub(crate) fn base_name_of(word_list: &Path) -> io::Result<String> {
	if !is_word_list(word_list) {
		return Err(not_a_word_list(word_list));
	}
	word_list
		.file_stem()
		.and_then(OsStr::to_str)
		.filter(|name| !name.is_empty())
		.map(str::to_owned)
		.ok_or_else(|| {
			io::Error::new(io::ErrorKind::InvalidInput, format!("{} has no usable base name", word_list.display()))
		})
}

/// Lists the word-list files of a directory, sorted by name.
///
/// Returns full paths; subdirectories are ignored.
pub(crate) fn list_base_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && is_word_list(&path) {
			files.push(path);
		}
	}
	files.sort();

	Ok(files)
}

/// Lists the names of the bases available in a directory.
pub fn list_bases<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
	list_base_files(dir)?.iter().map(|path| base_name_of(path)).collect()
}
