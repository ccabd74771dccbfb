//! A multi-pattern substring search engine built on the Aho–Corasick
//! automaton.
//!
//! Given a finite dictionary of pattern strings, this crate preprocesses
//! them into a deterministic trie augmented with failure links so that any
//! input can be scanned once, in time proportional to the input length plus
//! the number of matches, reporting every occurrence of every pattern with
//! its end position and identifier.
//!
//! # Quick Start
//!
//! ```rust
//! use ahocorasick::{Automaton, Pattern};
//!
//! let mut automaton = Automaton::new();
//! automaton.add(Pattern::new("he", "he"))?;
//! automaton.add(Pattern::new("she", "she"))?;
//! automaton.add(Pattern::new("his", "his"))?;
//! automaton.add(Pattern::new("hers", "hers"))?;
//! automaton.finalize()?;
//!
//! let mut found = Vec::new();
//! automaton.scan(b"ushers", false, |m| {
//!     found.push(m.position);
//!     false // keep scanning
//! })?;
//! assert_eq!(found, vec![4, 6]);
//! # Ok::<(), ahocorasick::AutomatonError>(())
//! ```
//!
//! # Architecture
//!
//! Four pieces, leaves-first:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  Node & Edge        (arena storage)   │
//! │  Pattern            (value object)    │
//! │  Automaton builder  (trie + finalize) │
//! │  Scanner            (stateful/-less)  │
//! └──────────────────────────────────────┘
//! ```
//!
//! Patterns are added one at a time, growing the trie. `finalize` computes
//! failure links by prefix search, closes each node's match set over its
//! failure chain, and sorts outgoing edges for binary search, after which
//! the automaton is immutable and ready to be scanned any number of times.
//!
//! # Non-goals
//!
//! No Unicode-aware case folding, normalization, or grapheme segmentation —
//! matching is over the raw byte alphabet. No regular-expression features.
//! No on-disk persistence format. No parallel construction; only the
//! stateless scan entry point is safe to call from multiple threads at once.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod automaton;
mod error;
mod node;
mod pattern;
mod scanner;

pub use crate::automaton::Automaton;
pub use crate::error::{AutomatonError, Result};
pub use crate::pattern::{Match, Pattern};

/// Maximum number of bytes a single pattern's text may contain.
///
/// Implementations MAY expose this as build-time configuration; this crate
/// does so via [`Automaton::with_max_pattern_length`].
pub const PATTERN_MAX_LENGTH: usize = 5000;

/// Initial capacity reserved for the failure-link working buffer.
///
/// This is a hint, not a cap — the buffer is a plain `Vec<u8>` that grows to
/// whatever depth a pattern requires, so [`AutomatonError::PathBufferOverflow`]
/// is unreachable in practice.
pub const PATH_BUFFER_INITIAL_CAPACITY: usize = 2000;
