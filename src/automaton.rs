//! Trie construction and failure-link finalization.
//!
//! [`Automaton`] owns the node arena and walks through two disjoint
//! lifecycles: an open, mutable phase during which patterns are inserted
//! with [`Automaton::add`], and a closed, immutable phase reached by
//! [`Automaton::finalize`] during which [`crate::scanner`] drives it.

use crate::error::{AutomatonError, Result};
use crate::node::{Node, ROOT};
use crate::pattern::Pattern;
use crate::{PATH_BUFFER_INITIAL_CAPACITY, PATTERN_MAX_LENGTH};

/// A multi-pattern Aho–Corasick automaton.
///
/// Nodes live in an append-only arena; outgoing edges and failure links are
/// arena indices. `add` grows the trie; `finalize` computes failure links,
/// closes match sets over the failure chain, and sorts edges for binary
/// search, after which the automaton is immutable except for the stateful
/// scanner cursor (see [`crate::scanner`]).
#[derive(Debug, Clone)]
pub struct Automaton {
    nodes: Vec<Node>,
    closed: bool,
    pattern_count: usize,
    max_pattern_len: usize,
    pub(crate) cursor: usize,
    pub(crate) base: usize,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    /// Open a fresh, empty automaton with just a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(0)],
            closed: false,
            pattern_count: 0,
            max_pattern_len: PATTERN_MAX_LENGTH,
            cursor: ROOT,
            base: 0,
        }
    }

    /// Open a fresh automaton with a non-default maximum pattern length.
    pub fn with_max_pattern_length(max_pattern_len: usize) -> Self {
        let mut automaton = Self::new();
        automaton.max_pattern_len = max_pattern_len;
        automaton
    }

    /// Total number of nodes, including the root.
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of patterns successfully added.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Whether `finalize` has already closed this automaton.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Insert a pattern, growing the trie along its text.
    ///
    /// Rejects the pattern without mutating the trie for every error kind
    /// except the trie walk itself, which always succeeds before the
    /// duplicate check runs (a prior pattern that is a proper prefix of this
    /// one does not count as a duplicate: only an exact-length match does).
    pub fn add(&mut self, pattern: Pattern) -> Result<()> {
        if self.closed {
            return Err(AutomatonError::Closed);
        }
        if pattern.len() == 0 {
            return Err(AutomatonError::ZeroLength);
        }
        if pattern.len() > self.max_pattern_len {
            return Err(AutomatonError::TooLong);
        }

        let mut current = ROOT;
        for &alpha in pattern.text() {
            current = match self.nodes[current].find_next(alpha, false) {
                Some(next) => next,
                None => {
                    let depth = self.nodes[current].depth + 1;
                    let new_id = self.nodes.len();
                    self.nodes.push(Node::new(depth));
                    self.nodes[current].create_next(alpha, new_id);
                    new_id
                }
            };
        }

        if self.nodes[current].is_final {
            return Err(AutomatonError::Duplicate);
        }
        self.nodes[current].is_final = true;
        self.nodes[current].register_pattern(pattern);
        self.pattern_count += 1;
        Ok(())
    }

    /// Insert every pattern in `patterns`, stopping at the first error.
    pub fn add_all<I: IntoIterator<Item = Pattern>>(&mut self, patterns: I) -> Result<()> {
        for pattern in patterns {
            self.add(pattern)?;
        }
        Ok(())
    }

    /// Compute failure links and close match sets, then lock the automaton.
    ///
    /// A second call on an already-closed automaton is a no-op: it does not
    /// corrupt state, and does not re-run either pass.
    pub fn finalize(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.compute_failure_links();
        self.close_matches_and_sort();
        self.closed = true;
        Ok(())
    }

    /// Failure-link pass: iterative preorder DFS over the trie, maintaining
    /// the current path's alphas in a growable working buffer.
    ///
    /// For a node at depth `d` with path `a_1..a_d`, tries progressively
    /// shorter proper suffixes `a_2..a_d`, `a_3..a_d`, ... against the
    /// *pre-sort* trie (linear `find_next`) starting from the root. The
    /// first suffix that fully resolves wins; none resolving means the
    /// failure link is the root. This is the direct, quadratic-in-depth
    /// construction; a node's own outgoing edges are never consulted, only
    /// root-rooted walks, so processing order across nodes does not matter.
    fn compute_failure_links(&mut self) {
        let mut path_buffer: Vec<u8> = Vec::with_capacity(PATH_BUFFER_INITIAL_CAPACITY);
        let mut stack: Vec<(usize, usize)> = vec![(ROOT, 0)];

        while let Some(&(node_id, edge_idx)) = stack.last() {
            if edge_idx >= self.nodes[node_id].outgoing.len() {
                stack.pop();
                if node_id != ROOT {
                    path_buffer.pop();
                }
                continue;
            }
            stack.last_mut().unwrap().1 += 1;

            let edge = self.nodes[node_id].outgoing[edge_idx];
            path_buffer.push(edge.alpha);
            self.nodes[edge.target].failure = self.failure_for_path(&path_buffer);
            stack.push((edge.target, 0));
        }
    }

    /// Longest proper-suffix search for a single node's path, per
    /// [`Self::compute_failure_links`].
    fn failure_for_path(&self, path: &[u8]) -> usize {
        let depth = path.len();
        for suffix_len in (1..depth).rev() {
            if let Some(node) = self.walk_from_root(&path[depth - suffix_len..]) {
                return node;
            }
        }
        ROOT
    }

    fn walk_from_root(&self, suffix: &[u8]) -> Option<usize> {
        let mut current = ROOT;
        for &alpha in suffix {
            current = self.nodes[current].find_next(alpha, false)?;
        }
        Some(current)
    }

    /// Match-closure + sort pass: for every non-root node, walk its failure
    /// chain to the root, merging in every pattern seen and becoming final
    /// if any chain member is final, then sort outgoing edges for binary
    /// search (invariant I6).
    ///
    /// Walking the full chain independently per node (rather than relying
    /// on an ancestor's chain already being closed) keeps this pass correct
    /// regardless of node processing order, since `is_final` only ever
    /// turns true and `register_pattern` is idempotent.
    fn close_matches_and_sort(&mut self) {
        for id in 0..self.nodes.len() {
            if id != ROOT {
                let mut is_final = self.nodes[id].is_final;
                let mut inherited: Vec<Pattern> = Vec::new();
                let mut current = self.nodes[id].failure;
                loop {
                    is_final = is_final || self.nodes[current].is_final;
                    inherited.extend(self.nodes[current].matched.iter().cloned());
                    if current == ROOT {
                        break;
                    }
                    current = self.nodes[current].failure;
                }
                for pattern in inherited {
                    self.nodes[id].register_pattern(pattern);
                }
                self.nodes[id].is_final = is_final;
            }
            self.nodes[id].sort_edges();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(automaton: &Automaton, text: &[u8]) -> usize {
        let mut current = ROOT;
        for &alpha in text {
            current = automaton.nodes[current].find_next(alpha, automaton.is_closed()).unwrap();
        }
        current
    }

    #[test]
    fn add_rejects_zero_length() {
        let mut a = Automaton::new();
        assert_eq!(a.add(Pattern::new("x", "")), Err(AutomatonError::ZeroLength));
    }

    #[test]
    fn add_rejects_too_long() {
        let mut a = Automaton::with_max_pattern_length(3);
        assert_eq!(a.add(Pattern::new("x", "abcd")), Err(AutomatonError::TooLong));
        assert!(a.add(Pattern::new("y", "abc")).is_ok());
    }

    #[test]
    fn add_rejects_exact_duplicate_but_not_prefix() {
        let mut a = Automaton::new();
        a.add(Pattern::new("a", "he")).unwrap();
        assert!(a.add(Pattern::new("b", "hers")).is_ok(), "prefix relationship is not a duplicate");
        assert_eq!(a.add(Pattern::new("c", "he")), Err(AutomatonError::Duplicate));
        assert_eq!(a.pattern_count(), 2);
    }

    #[test]
    fn add_after_close_is_rejected() {
        let mut a = Automaton::new();
        a.add(Pattern::new("a", "he")).unwrap();
        a.finalize().unwrap();
        assert_eq!(a.add(Pattern::new("b", "she")), Err(AutomatonError::Closed));
    }

    #[test]
    fn duplicate_add_leaves_node_count_unchanged() {
        let mut a = Automaton::new();
        a.add(Pattern::new("a", "abc")).unwrap();
        let before = a.number_of_nodes();
        let before_count = a.pattern_count();
        assert_eq!(a.add(Pattern::new("b", "abc")), Err(AutomatonError::Duplicate));
        assert_eq!(a.number_of_nodes(), before);
        assert_eq!(a.pattern_count(), before_count);
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut a = Automaton::new();
        a.add(Pattern::new("a", "he")).unwrap();
        a.finalize().unwrap();
        assert!(a.finalize().is_ok());
        assert!(a.is_closed());
    }

    #[test]
    fn failure_links_match_textbook_example() {
        // he / she / his / hers
        let mut a = Automaton::new();
        a.add_all([
            Pattern::new("a", "he"),
            Pattern::new("b", "she"),
            Pattern::new("c", "his"),
            Pattern::new("d", "hers"),
        ])
        .unwrap();
        a.finalize().unwrap();

        let he = leaf(&a, b"he");
        let she = leaf(&a, b"she");
        assert_eq!(a.nodes[she].failure, he, "she's failure should land on he");
    }

    #[test]
    fn nested_suffix_patterns_close_transitively() {
        let mut a = Automaton::new();
        a.add_all([
            Pattern::new("k", "abc"),
            Pattern::new("l", "bc"),
            Pattern::new("m", "c"),
        ])
        .unwrap();
        a.finalize().unwrap();

        let abc = leaf(&a, b"abc");
        let mut ids: Vec<&str> = a.nodes[abc].matched.iter().map(|p| p.identifier()).collect();
        ids.sort();
        assert_eq!(ids, vec!["k", "l", "m"]);
    }
}
