use matchers::{
    AhoCorasickSearch, BuildError, CommentzWalterSearch, Match, MultiPatternSearch,
    RabinKarpSearch,
};

/// The available matching engines. All three honor the same contract; they
/// are alternative strategies, not layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    AhoCorasick,
    CommentzWalter,
    RabinKarp,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::AhoCorasick,
        Strategy::CommentzWalter,
        Strategy::RabinKarp,
    ];
}

/// Build the selected engine from `patterns` and scan `text` with it.
/// Patterns are expected pre-normalized (lowercase); the text is lowercased
/// by the engine.
pub fn search(strategy: Strategy, patterns: &[&str], text: &str) -> Result<Vec<Match>, BuildError> {
    match strategy {
        Strategy::AhoCorasick => {
            let automaton = AhoCorasickSearch::build(patterns)?;
            Ok(AhoCorasickSearch::scan(&automaton, text))
        }
        Strategy::CommentzWalter => {
            let automaton = CommentzWalterSearch::build(patterns)?;
            Ok(CommentzWalterSearch::scan(&automaton, text))
        }
        Strategy::RabinKarp => {
            let automaton = RabinKarpSearch::build(patterns)?;
            Ok(RabinKarpSearch::scan(&automaton, text))
        }
    }
}

/// Like [`search`], with the result sorted by offset then pattern. Engines
/// report matches in engine-specific order; this puts them in a comparable
/// one.
pub fn search_sorted(
    strategy: Strategy,
    patterns: &[&str],
    text: &str,
) -> Result<Vec<Match>, BuildError> {
    let mut matches = search(strategy, patterns, text)?;
    matches.sort_by(|a, b| (a.start, &a.pattern).cmp(&(b.start, &b.pattern)));
    Ok(matches)
}
