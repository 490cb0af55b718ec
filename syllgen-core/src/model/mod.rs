//! Top-level module for the syllable-chain name generation system.
//!
//! This module provides:
//! - A heuristic syllable splitter (`syllable`)
//! - Per-base syllable transition tables (`TransitionTable`)
//! - A bounded, insertion-ordered cache of tables (`ChainCache`)
//! - A bounded random-walk name sampler (`sampler`)
//! - Generation parameters (`GenerateOptions`)
//! - A high-level generation interface (`Generator`)

/// High-level interface tying the cache, the sampler and file loading together.
///
/// Exposes `generate` and `update_chain` both as free functions over a
/// caller-owned cache and as methods of `Generator`.
pub mod generator;

/// Bounded FIFO store of transition tables, one per base name.
pub mod chain_cache;

/// Transition table construction and merging.
pub mod transition_table;

/// Pseudo-syllable decomposition of a word.
pub mod syllable;

/// Random walk over a transition table and name polishing.
pub mod sampler;

/// Parameters of one generation (base, words, length bounds, duplicates).
pub mod generate_options;
