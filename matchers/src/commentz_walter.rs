use std::collections::{HashMap, VecDeque};

use crate::trie::{ROOT, Trie, propagate_links};
use crate::{BuildError, Match, MultiPatternSearch};

/// Insert-only phase of the Commentz-Walter construction. Patterns go into
/// the trie reversed; the character table and the minimum pattern length are
/// maintained here, during insertion, not during link construction.
#[derive(Debug, Default)]
pub struct CommentzWalterBuilder {
    trie: Trie,
    char_min_depth: HashMap<char, usize>,
    min_pattern_len: Option<usize>,
}

impl CommentzWalterBuilder {
    pub fn new() -> Self {
        CommentzWalterBuilder {
            trie: Trie::new(),
            char_min_depth: HashMap::new(),
            min_pattern_len: None,
        }
    }

    pub fn insert(&mut self, pattern: &str) -> Result<(), BuildError> {
        if pattern.is_empty() {
            return Err(BuildError::EmptyPattern);
        }

        // Reversed path, forward word: reports need no re-reversal.
        let reversed: Vec<char> = pattern.chars().rev().collect();
        self.trie.insert_path(&reversed, pattern);

        for (pos, &ch) in reversed.iter().enumerate() {
            let pos = pos + 1;
            let entry = self.char_min_depth.entry(ch).or_insert(pos);
            if *entry > pos {
                *entry = pos;
            }
        }

        let len = reversed.len();
        self.min_pattern_len = Some(self.min_pattern_len.map_or(len, |m| m.min(len)));
        Ok(())
    }

    /// Finalize the automaton: the shared failure-link BFS, the per-target
    /// minimal depth differences for the reverse suffix/output selection, and
    /// a top-down pass assigning `shift1`/`shift2`.
    pub fn build(self) -> Result<CommentzWalter, BuildError> {
        let Some(min_pattern_len) = self.min_pattern_len else {
            return Err(BuildError::EmptyPatternSet);
        };
        let trie = self.trie;

        let links = propagate_links(&trie);

        // Reverse suffix selection: for every node, the minimal depth
        // difference over candidates whose failure link points at it; `Some`
        // doubles as "a reverse suffix link exists".
        let mut min_diff_s1: Vec<Option<usize>> = vec![None; trie.len()];
        // Depth of the shallowest terminal whose failure chain passes
        // through each node. A terminal anywhere on the chain marks a whole
        // pattern ending with this node's path, and shift2 must see it even
        // when the intermediate chain nodes are not terminal themselves.
        // Walking the BFS order backward visits every node after all nodes
        // deeper than it, so carried values are complete when read.
        let mut min_term_depth: Vec<Option<usize>> = vec![None; trie.len()];
        for &v in links.order.iter().rev() {
            let target = links.failure[v];
            let diff = trie.node(v).depth() - trie.node(target).depth();
            if min_diff_s1[target].is_none_or(|m| m > diff) {
                min_diff_s1[target] = Some(diff);
            }

            let mut carried = min_term_depth[v];
            if trie.node(v).is_word() {
                let depth = trie.node(v).depth();
                carried = Some(carried.map_or(depth, |m| m.min(depth)));
            }
            if let Some(depth) = carried {
                if min_term_depth[target].is_none_or(|m| m > depth) {
                    min_term_depth[target] = Some(depth);
                }
            }
        }

        // Shifts propagate top-down. shift1 falls back to the minimum
        // pattern length when no reverse suffix link exists; shift2 never
        // exceeds the parent's value, since a terminal bounding a path also
        // bounds every extension of that path.
        let mut shift1 = vec![0usize; trie.len()];
        let mut shift2 = vec![0usize; trie.len()];
        shift1[ROOT] = 1;
        shift2[ROOT] = min_pattern_len;

        let mut queue: VecDeque<usize> = trie.children_of(ROOT).collect();
        while let Some(v) = queue.pop_front() {
            shift1[v] = min_diff_s1[v].unwrap_or(min_pattern_len);
            let parent = trie.node(v).parent().unwrap_or(ROOT);
            shift2[v] = match min_term_depth[v] {
                Some(depth) => shift2[parent].min(depth - trie.node(v).depth()),
                None => shift2[parent],
            };
            for child in trie.children_of(v) {
                queue.push_back(child);
            }
        }

        log::debug!(
            "commentz-walter automaton ready: {} nodes, {} patterns, min length {}",
            trie.len(),
            trie.pattern_count(),
            min_pattern_len
        );

        Ok(CommentzWalter {
            trie,
            shift1,
            shift2,
            char_min_depth: self.char_min_depth,
            min_pattern_len,
        })
    }

    /// Path lookup against the reversed-pattern trie: the query is reversed
    /// before the walk, so this reports whether `word` is a suffix of some
    /// inserted pattern.
    pub fn contains_prefix_path(&self, word: &str) -> bool {
        let reversed: String = word.chars().rev().collect();
        self.trie.contains_prefix_path(&reversed)
    }
}

/// Finalized Commentz-Walter matcher: a reversed-pattern trie with
/// precomputed shift tables. Scanning is read-only.
#[derive(Debug)]
pub struct CommentzWalter {
    trie: Trie,
    shift1: Vec<usize>,
    shift2: Vec<usize>,
    char_min_depth: HashMap<char, usize>,
    min_pattern_len: usize,
}

impl CommentzWalter {
    /// Minimum 1-based position of `ch` in any reversed pattern; characters
    /// absent from all patterns behave as `min_pattern_len + 1`.
    fn min_char_depth(&self, ch: char) -> usize {
        self.char_min_depth
            .get(&ch)
            .copied()
            .unwrap_or(self.min_pattern_len + 1)
    }

    /// Safe number of positions to skip after a window attempt that matched
    /// `j` characters and stopped at node `v`.
    fn shift(&self, v: usize, j: usize) -> usize {
        let s1 = match self.trie.node(v).character() {
            // Zero characters matched, v is the root.
            None => self.shift1[v],
            Some(ch) => {
                let char_shift = self.min_char_depth(ch).saturating_sub(j + 1);
                char_shift.max(self.shift1[v])
            }
        };
        s1.min(self.shift2[v])
    }

    /// Report every pattern occurrence in `text`. The cursor starts at
    /// `min_pattern_len - 1`, each window is scanned right-to-left along the
    /// reversed trie, and the cursor advances by the computed shift, never
    /// backward. Offsets are 0-based character offsets into the original
    /// text; matching lowercases the text only.
    pub fn find_all_matches(&self, text: &str) -> Vec<Match> {
        let chars: Vec<char> = text.to_lowercase().chars().collect();
        let mut matches = Vec::new();
        let mut i = self.min_pattern_len - 1;

        while i < chars.len() {
            let mut v = ROOT;
            let mut j = 0;

            while j <= i {
                let Some(child) = self.trie.child(v, chars[i - j]) else {
                    break;
                };
                v = child;
                j += 1;
                if let Some(word) = self.trie.node(v).word() {
                    matches.push(Match {
                        pattern: word.clone(),
                        start: i + 1 - j,
                    });
                }
            }

            // The walk ran into the left edge of the text.
            if j > i {
                j = i;
            }

            i += self.shift(v, j);
        }

        matches
    }

    pub fn contains_prefix_path(&self, word: &str) -> bool {
        let reversed: String = word.chars().rev().collect();
        self.trie.contains_prefix_path(&reversed)
    }

    pub fn pattern_count(&self) -> usize {
        self.trie.pattern_count()
    }

    pub fn min_pattern_len(&self) -> usize {
        self.min_pattern_len
    }
}

pub struct CommentzWalterSearch;

impl MultiPatternSearch for CommentzWalterSearch {
    type Automaton = CommentzWalter;

    fn build(patterns: &[&str]) -> Result<Self::Automaton, BuildError> {
        let mut builder = CommentzWalterBuilder::new();
        for pattern in patterns {
            builder.insert(pattern)?;
        }
        builder.build()
    }

    fn scan(automaton: &Self::Automaton, text: &str) -> Vec<Match> {
        automaton.find_all_matches(text)
    }
}
