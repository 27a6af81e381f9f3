use crate::trie::{ROOT, Trie, propagate_links};
use crate::{BuildError, Match, MultiPatternSearch};

/// Insert-only phase of the Aho-Corasick construction. Consumed by
/// [`AhoCorasickBuilder::build`], so a half-linked automaton can never be
/// scanned.
#[derive(Debug, Default)]
pub struct AhoCorasickBuilder {
    trie: Trie,
}

impl AhoCorasickBuilder {
    pub fn new() -> Self {
        AhoCorasickBuilder { trie: Trie::new() }
    }

    pub fn insert(&mut self, pattern: &str) -> Result<(), BuildError> {
        if pattern.is_empty() {
            return Err(BuildError::EmptyPattern);
        }
        self.trie.insert(pattern);
        Ok(())
    }

    /// Finalize failure and dictionary links; the result is frozen and safe
    /// for repeated scans.
    pub fn build(self) -> AhoCorasick {
        let links = propagate_links(&self.trie);
        log::debug!(
            "aho-corasick automaton ready: {} nodes, {} patterns",
            self.trie.len(),
            self.trie.pattern_count()
        );
        AhoCorasick {
            trie: self.trie,
            failure: links.failure,
            dictionary: links.dictionary,
        }
    }

    pub fn contains_prefix_path(&self, word: &str) -> bool {
        self.trie.contains_prefix_path(word)
    }
}

/// Finalized Aho-Corasick matcher. Scanning is read-only.
#[derive(Debug)]
pub struct AhoCorasick {
    trie: Trie,
    failure: Vec<usize>,
    dictionary: Vec<Option<usize>>,
}

impl AhoCorasick {
    /// Report every pattern occurrence in `text`, overlapping and nested ones
    /// included, in left-to-right (then innermost-to-outermost) order.
    /// Offsets are 0-based character offsets into the original text; matching
    /// lowercases the text only.
    pub fn find_all_matches(&self, text: &str) -> Vec<Match> {
        let text = text.to_lowercase();
        let mut matches = Vec::new();
        let mut current = ROOT;

        for (pos, ch) in text.chars().enumerate() {
            if let Some(child) = self.trie.child(current, ch) {
                current = child;
            } else {
                // Back off along failure links until the edge exists or we
                // are stuck at the root.
                while !self.trie.node(current).is_root() {
                    current = self.failure[current];
                    if let Some(child) = self.trie.child(current, ch) {
                        current = child;
                        break;
                    }
                }
            }

            if let Some(word) = self.trie.node(current).word() {
                matches.push(Match {
                    pattern: word.clone(),
                    start: pos + 1 - word.chars().count(),
                });
            }

            // Every terminal ancestor-by-suffix also ends here.
            let mut output = self.dictionary[current];
            while let Some(node) = output {
                if let Some(word) = self.trie.node(node).word() {
                    matches.push(Match {
                        pattern: word.clone(),
                        start: pos + 1 - word.chars().count(),
                    });
                }
                output = self.dictionary[node];
            }
        }

        matches
    }

    pub fn contains_prefix_path(&self, word: &str) -> bool {
        self.trie.contains_prefix_path(word)
    }

    pub fn pattern_count(&self) -> usize {
        self.trie.pattern_count()
    }
}

pub struct AhoCorasickSearch;

impl MultiPatternSearch for AhoCorasickSearch {
    type Automaton = AhoCorasick;

    fn build(patterns: &[&str]) -> Result<Self::Automaton, BuildError> {
        let mut builder = AhoCorasickBuilder::new();
        for pattern in patterns {
            builder.insert(pattern)?;
        }
        Ok(builder.build())
    }

    fn scan(automaton: &Self::Automaton, text: &str) -> Vec<Match> {
        automaton.find_all_matches(text)
    }
}
