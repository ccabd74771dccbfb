//! Pattern values and the matches reported by a scan.

/// An immutable pattern inserted into an [`crate::Automaton`].
///
/// The `identifier` is opaque to the automaton — it is carried through
/// unchanged and handed back in every [`Match`] that reports this pattern.
/// Two patterns are considered equal by `text` alone; duplicate detection
/// relies only on the byte sequence, never the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    identifier: String,
    text: Vec<u8>,
}

impl Pattern {
    /// Construct a new pattern from an identifier and its matched text.
    pub fn new(identifier: impl Into<String>, text: impl Into<Vec<u8>>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }

    /// The caller-supplied identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The byte sequence this pattern matches.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub(crate) fn len(&self) -> usize {
        self.text.len()
    }
}

/// A single pattern occurrence reported by a scan.
///
/// `position` is the 1-indexed end offset of the match (one past the last
/// matched byte), adjusted by any base offset carried across chunked scans.
/// The convention is end-exclusive-plus-one, not a 0-indexed start offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// 1-indexed end position of the match within the scanned stream.
    pub position: usize,
    /// Every pattern whose text ends at `position`, in the node's `matched`
    /// collection order (insertion order modulo failure-chain merge). The
    /// order is deterministic for a given automaton but not a promised part
    /// of the public contract — treat it as a set.
    pub patterns: Vec<Pattern>,
}
