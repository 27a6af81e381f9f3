mod aho_corasick;
mod commentz_walter;
mod rabin_karp;
mod trie;

use thiserror::Error;

/// Construction failures. All of these are reported before an automaton
/// exists; a finalized automaton never fails to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("pattern set must contain at least one pattern")]
    EmptyPatternSet,
    #[error("patterns must be non-empty strings")]
    EmptyPattern,
    #[error(
        "window width {0} exceeds the rolling hash limit of {}",
        crate::rabin_karp::MAX_HASH_WIDTH
    )]
    WidthTooLarge(usize),
}

/// One reported occurrence: the pattern and its 0-based character offset in
/// the original text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    pub pattern: String,
    pub start: usize,
}

/// Shared contract of the matching engines: build an immutable automaton
/// from a pattern set, then scan texts against it. Builders are consumed by
/// `build`, so scanning a half-built automaton is unrepresentable, and scans
/// take `&Automaton` so repeated or concurrent scans need no synchronization.
///
/// Matching is case-insensitive by lowercasing the text only; callers
/// supplying mixed-case patterns must pre-normalize them.
pub trait MultiPatternSearch {
    type Automaton;

    fn build(patterns: &[&str]) -> Result<Self::Automaton, BuildError>;
    fn scan(automaton: &Self::Automaton, text: &str) -> Vec<Match>;
}

pub use aho_corasick::{AhoCorasick, AhoCorasickBuilder, AhoCorasickSearch};
pub use commentz_walter::{CommentzWalter, CommentzWalterBuilder, CommentzWalterSearch};
pub use rabin_karp::{RabinKarp, RabinKarpSearch, RollingHash};
pub use trie::{Trie, TrieNode};
