//! Scanning: driving a finalized automaton over input text.
//!
//! Both entry points share [`transition_loop`], which implements the
//! transition rule (try an alphabet transition, else follow the failure
//! link without consuming input, else advance past an unmatched root) and
//! reporting rule (report only on alphabet transitions, since failure-chain
//! matches were already merged into ancestor nodes during `finalize`).

use crate::automaton::Automaton;
use crate::error::{AutomatonError, Result};
use crate::node::{Node, ROOT};
use crate::pattern::Match;

impl Automaton {
    /// Scan `text`, remembering the cursor for the next call.
    ///
    /// If `keep_searching` is false, the cursor and base offset reset to the
    /// root before scanning. If true, scanning resumes from wherever the
    /// previous call left off, letting callers feed a logical stream in
    /// chunks: a match that straddles a chunk boundary is still reported.
    ///
    /// `callback` runs at every node reached by an alphabet transition that
    /// is final; returning `true` stops the scan early (`Ok(true)`).
    pub fn scan<F: FnMut(&Match) -> bool>(
        &mut self,
        text: &[u8],
        keep_searching: bool,
        mut callback: F,
    ) -> Result<bool> {
        if !self.is_closed() {
            return Err(AutomatonError::NotFinalized);
        }
        if !keep_searching {
            self.cursor = ROOT;
            self.base = 0;
        }
        let (next_cursor, consumed, stopped) =
            transition_loop(self.nodes(), text, self.cursor, 0, self.base, &mut callback);
        self.cursor = next_cursor;
        self.base += consumed;
        Ok(stopped)
    }

    /// Scan `text` starting at `start_position`, touching no automaton
    /// state. Reported positions are local to this call (no base offset is
    /// added); callers managing a chunked stream add their own offset.
    /// Safe to call concurrently from multiple threads on a shared,
    /// finalized automaton.
    pub fn scan_from<F: FnMut(&Match) -> bool>(
        &self,
        text: &[u8],
        start_position: usize,
        mut callback: F,
    ) -> Result<bool> {
        if !self.is_closed() {
            return Err(AutomatonError::NotFinalized);
        }
        let (_, _, stopped) =
            transition_loop(self.nodes(), text, ROOT, start_position, 0, &mut callback);
        Ok(stopped)
    }
}

/// Drive the automaton from `(start_node, start_pos)` through `text`,
/// reporting matches as `position = p + base`. Returns the final node, the
/// final input cursor `p` (the stateful caller folds this into its running
/// base), and whether the callback stopped the scan.
fn transition_loop<F: FnMut(&Match) -> bool>(
    nodes: &[Node],
    text: &[u8],
    start_node: usize,
    start_pos: usize,
    base: usize,
    callback: &mut F,
) -> (usize, usize, bool) {
    let mut current = start_node;
    let mut p = start_pos;
    let len = text.len();

    while p < len {
        let alpha = text[p];
        if let Some(next) = nodes[current].find_next(alpha, true) {
            current = next;
            p += 1;
            if nodes[current].is_final {
                let m = Match {
                    position: p + base,
                    patterns: nodes[current].matched.clone(),
                };
                if callback(&m) {
                    return (current, p, true);
                }
            }
        } else if current != ROOT {
            current = nodes[current].failure;
        } else {
            p += 1;
        }
    }
    (current, p, false)
}
