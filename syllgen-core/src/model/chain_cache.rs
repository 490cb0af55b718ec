use std::collections::{HashMap, VecDeque};

use super::transition_table::TransitionTable;
use crate::error::{NameGenError, Result};

/// Default number of bases kept in a cache.
pub const MAX_CHAINS_COUNT: usize = 50;

/// Bounded store of transition tables, one per base name.
///
/// Bases are evicted in insertion order (oldest first) once the cache is
/// full and a new base name has to be inserted. Merging into a base that
/// is already cached keeps its position.
///
/// # Invariants
/// - `len() <= capacity()` at all times
/// - At most one table per base name
/// - `order` and `chains` always hold the same base names
#[derive(Debug, Clone)]
pub struct ChainCache {
	capacity: usize,
	/// Base names, oldest first.
	order: VecDeque<String>,
	chains: HashMap<String, TransitionTable>,
}

impl ChainCache {
	/// Creates an empty cache holding at most `capacity` bases.
	///
	/// # Errors
	/// Returns `InvalidInput` if `capacity` is zero.
	pub fn new(capacity: usize) -> Result<Self> {
		if capacity == 0 {
			return Err(NameGenError::InvalidInput("cache capacity must be >= 1".to_owned()));
		}
		Ok(Self {
			capacity,
			order: VecDeque::with_capacity(capacity),
			chains: HashMap::with_capacity(capacity),
		})
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	pub fn contains(&self, base_name: &str) -> bool {
		self.chains.contains_key(base_name)
	}

	/// Returns the table of a base, if cached.
	pub fn get(&self, base_name: &str) -> Option<&TransitionTable> {
		self.chains.get(base_name)
	}

	/// Returns the cached base names, oldest first.
	pub fn base_names(&self) -> impl Iterator<Item = &str> {
		self.order.iter().map(String::as_str)
	}

	/// Inserts a table for `base_name`, or merges it into the cached one.
	///
	/// - Unknown base: the oldest base is evicted first if the cache is
	///   full, then the table is appended as the newest entry.
	/// - Known base: the cached table becomes the union of both tables;
	///   its position and every other entry are left untouched.
	pub fn upsert(&mut self, base_name: &str, chain: TransitionTable) {
		if let Some(existing) = self.chains.get_mut(base_name) {
			existing.merge(&chain);
			log::debug!("merged new transitions into base {base_name}");
			return;
		}

		if self.order.len() >= self.capacity {
			if let Some(oldest) = self.order.pop_front() {
				self.chains.remove(&oldest);
				log::info!("chain cache full ({} bases), evicted base {oldest}", self.capacity);
			}
		}

		self.order.push_back(base_name.to_owned());
		self.chains.insert(base_name.to_owned(), chain);
		log::info!("registered base {base_name} ({}/{})", self.order.len(), self.capacity);
	}
}

impl Default for ChainCache {
	fn default() -> Self {
		Self {
			capacity: MAX_CHAINS_COUNT,
			order: VecDeque::new(),
			chains: HashMap::new(),
		}
	}
}
