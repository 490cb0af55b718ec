//! Syllable-chain based name generation library.
//!
//! This crate learns how the pseudo-syllables of a set of example words
//! follow each other, and walks that chain to invent new names in the
//! same style (ex. fantasy place-names), including:
//! - Heuristic syllable splitting of example words
//! - One transition table per named base, kept in a bounded FIFO cache
//! - Bounded random generation with length and duplication constraints
//! - Loading bases from word-list files, with binary snapshots

/// Syllable chains, cache and generation logic.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// Word-list file helpers (loading, listing bases).
pub mod io;

pub use error::{NameGenError, Result};
pub use model::chain_cache::{ChainCache, MAX_CHAINS_COUNT};
pub use model::generate_options::GenerateOptions;
pub use model::generator::{generate, update_chain, Generator};
pub use model::transition_table::TransitionTable;
