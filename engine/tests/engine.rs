use engine::{Strategy, search, search_sorted};
use matchers::{AhoCorasickBuilder, BuildError, CommentzWalterBuilder, Match};

const SEARCH_TEXT: &str = "Mozilla Firefox, or simply Firefox, is a free and open-source \
web browser developed by the Mozilla Foundation and its subsidiary, the Mozilla Corporation. \
Firefox uses the Gecko layout engine to render web pages, which implements current and \
anticipated web standards.";

const PATTERNS: [&str; 5] = ["render", "open-source", "free", "paid", "advertisements"];

fn m(pattern: &str, start: usize) -> Match {
    Match {
        pattern: pattern.to_string(),
        start,
    }
}

#[test]
fn every_strategy_finds_the_expected_article_matches() {
    let expected = vec![m("free", 41), m("open-source", 50), m("render", 195)];

    for strategy in Strategy::ALL {
        let matches = search(strategy, &PATTERNS, SEARCH_TEXT).unwrap();
        assert_eq!(matches, expected, "strategy {:?}", strategy);
    }
}

#[test]
fn strategies_agree_after_sorting() {
    let text = "abcdabcd";
    let patterns = ["ab", "abcd", "cd"];

    let baseline = search_sorted(Strategy::AhoCorasick, &patterns, text).unwrap();
    assert!(!baseline.is_empty());

    for strategy in Strategy::ALL {
        let matches = search_sorted(strategy, &patterns, text).unwrap();
        assert_eq!(matches, baseline, "strategy {:?}", strategy);
    }
}

#[test]
fn empty_pattern_set_fails_for_window_based_strategies() {
    for strategy in [Strategy::CommentzWalter, Strategy::RabinKarp] {
        assert_eq!(
            search(strategy, &[], SEARCH_TEXT),
            Err(BuildError::EmptyPatternSet),
            "strategy {:?}",
            strategy
        );
    }

    // Aho-Corasick accepts an empty set and simply matches nothing.
    assert_eq!(search(Strategy::AhoCorasick, &[], SEARCH_TEXT), Ok(vec![]));
}

#[test]
fn no_matches_is_a_successful_result() {
    for strategy in Strategy::ALL {
        let matches = search(strategy, &["zzzz"], SEARCH_TEXT).unwrap();
        assert_eq!(matches, vec![], "strategy {:?}", strategy);
    }
}

#[test]
fn trie_prefix_lookup_over_the_article_patterns() {
    let mut builder = AhoCorasickBuilder::new();
    for pattern in PATTERNS {
        builder.insert(pattern).unwrap();
    }

    assert!(builder.contains_prefix_path("free"));
    assert!(builder.contains_prefix_path("render"));
    assert!(!builder.contains_prefix_path("opens"));
    assert!(!builder.contains_prefix_path("ads"));

    // The same checks hold on the frozen automaton.
    let automaton = builder.build();
    assert!(automaton.contains_prefix_path("free"));
    assert!(!automaton.contains_prefix_path("opens"));
}

#[test]
fn reversed_trie_answers_prefix_lookups_in_forward_orientation() {
    let mut builder = CommentzWalterBuilder::new();
    for pattern in PATTERNS {
        builder.insert(pattern).unwrap();
    }

    assert!(builder.contains_prefix_path("free"));
    assert!(builder.contains_prefix_path("render"));
    assert!(!builder.contains_prefix_path("opens"));
    assert!(!builder.contains_prefix_path("ads"));
}
