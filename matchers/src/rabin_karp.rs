use std::collections::HashMap;

use crate::{BuildError, Match, MultiPatternSearch};

/// Fixed small radix for the polynomial hash. Not derived from the alphabet:
/// collisions are cheap because every hash hit is verified by a direct
/// comparison.
const BASE: u128 = 3;

/// Widest supported window. The hash of a full window of the largest char
/// scalars (`0x10FFFF * sum(BASE^k)` for `k < 64`) still fits in `u128`;
/// [`RabinKarp::build`] rejects anything wider.
pub(crate) const MAX_HASH_WIDTH: usize = 64;

/// Polynomial hash state over a fixed-width window:
/// `sum(ord(c_k) * BASE^k)` for the characters at `start..end`.
///
/// One immutable instance hashes each pattern prefix; one rolling instance
/// slides across the text. The divide-by-base step in [`roll`] is exact
/// because the leaving character is removed in full before dividing, leaving
/// a polynomial with a zero constant term. Widths are capped at
/// `MAX_HASH_WIDTH` so the arithmetic never overflows.
///
/// [`roll`]: RollingHash::roll
#[derive(Debug, Clone)]
pub struct RollingHash {
    width: usize,
    hash: u128,
    start: usize,
    end: usize,
    high_power: u128,
}

impl RollingHash {
    /// Hash the window `chars[start..start + width]`. `width` must be
    /// between 1 and `MAX_HASH_WIDTH` and the window must lie inside
    /// `chars`.
    pub fn new(chars: &[char], start: usize, width: usize) -> Self {
        debug_assert!((1..=MAX_HASH_WIDTH).contains(&width));
        let mut hash = 0u128;
        let mut power = 1u128;
        for &ch in &chars[start..start + width] {
            hash += ch as u128 * power;
            power *= BASE;
        }
        RollingHash {
            width,
            hash,
            start,
            end: start + width,
            high_power: BASE.pow(width as u32 - 1),
        }
    }

    /// Slide the window one position right: drop the leaving character's
    /// low-order term, divide by the base, add the entering character at the
    /// high-order term.
    pub fn roll(&mut self, chars: &[char]) {
        let leaving = chars[self.start] as u128;
        let entering = chars[self.end] as u128;
        self.hash = (self.hash - leaving) / BASE + entering * self.high_power;
        self.start += 1;
        self.end += 1;
    }

    pub fn value(&self) -> u128 {
        self.hash
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

#[derive(Debug)]
struct PatternEntry {
    text: String,
    chars: Vec<char>,
}

/// Rolling-hash multi-pattern matcher. Hashing covers only the first `width`
/// characters of each pattern (`width` = shortest pattern length); longer
/// patterns are recovered by the direct comparison that follows every hash
/// hit, which also filters collisions.
#[derive(Debug)]
pub struct RabinKarp {
    width: usize,
    patterns: Vec<PatternEntry>,
    buckets: HashMap<u128, Vec<usize>>,
}

impl RabinKarp {
    pub fn build(patterns: &[&str]) -> Result<Self, BuildError> {
        if patterns.is_empty() {
            return Err(BuildError::EmptyPatternSet);
        }

        let mut entries: Vec<PatternEntry> = Vec::new();
        for &pattern in patterns {
            if pattern.is_empty() {
                return Err(BuildError::EmptyPattern);
            }
            if entries.iter().any(|e| e.text == pattern) {
                continue;
            }
            entries.push(PatternEntry {
                text: pattern.to_string(),
                chars: pattern.chars().collect(),
            });
        }

        let width = entries
            .iter()
            .map(|e| e.chars.len())
            .min()
            .unwrap_or_default();
        if width > MAX_HASH_WIDTH {
            return Err(BuildError::WidthTooLarge(width));
        }

        let mut buckets: HashMap<u128, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            let hash = RollingHash::new(&entry.chars, 0, width).value();
            buckets.entry(hash).or_default().push(idx);
        }

        log::debug!(
            "rabin-karp matcher ready: {} patterns, window width {}",
            entries.len(),
            width
        );

        Ok(RabinKarp {
            width,
            patterns: entries,
            buckets,
        })
    }

    /// Report every pattern occurrence in `text`. Offsets are 0-based
    /// character offsets into the original text; matching lowercases the
    /// text only.
    pub fn find_all_matches(&self, text: &str) -> Vec<Match> {
        let chars: Vec<char> = text.to_lowercase().chars().collect();
        let mut matches = Vec::new();
        if chars.len() < self.width {
            return matches;
        }

        let mut window = RollingHash::new(&chars, 0, self.width);
        let last = chars.len() - self.width;
        for i in 0..=last {
            if let Some(candidates) = self.buckets.get(&window.value()) {
                for &idx in candidates {
                    let pattern = &self.patterns[idx];
                    let end = i + pattern.chars.len();
                    if end <= chars.len() && chars[i..end] == pattern.chars[..] {
                        matches.push(Match {
                            pattern: pattern.text.clone(),
                            start: i,
                        });
                    }
                }
            }
            if i < last {
                window.roll(&chars);
            }
        }

        matches
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

pub struct RabinKarpSearch;

impl MultiPatternSearch for RabinKarpSearch {
    type Automaton = RabinKarp;

    fn build(patterns: &[&str]) -> Result<Self::Automaton, BuildError> {
        RabinKarp::build(patterns)
    }

    fn scan(automaton: &Self::Automaton, text: &str) -> Vec<Match> {
        automaton.find_all_matches(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(pattern: &str, start: usize) -> Match {
        Match {
            pattern: pattern.to_string(),
            start,
        }
    }

    #[test]
    fn test_single_pattern() {
        let rk = RabinKarp::build(&["abc"]).unwrap();
        assert_eq!(rk.find_all_matches("zzabczz"), vec![m("abc", 2)]);
    }

    #[test]
    fn test_empty_pattern_set_is_an_error() {
        assert!(matches!(
            RabinKarp::build(&[]),
            Err(BuildError::EmptyPatternSet)
        ));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(
            RabinKarp::build(&["ok", ""]),
            Err(BuildError::EmptyPattern)
        ));
    }

    #[test]
    fn test_duplicates_are_deduplicated() {
        let rk = RabinKarp::build(&["aa", "aa"]).unwrap();
        assert_eq!(rk.pattern_count(), 1);
        assert_eq!(rk.find_all_matches("baab"), vec![m("aa", 1)]);
    }

    #[test]
    fn test_width_is_shortest_pattern_length() {
        let rk = RabinKarp::build(&["abcd", "xy"]).unwrap();
        assert_eq!(rk.width(), 2);
    }

    #[test]
    fn test_longer_patterns_recovered_after_prefix_hit() {
        // "ab" and "abcd" share the width-2 prefix, so both sit in the same
        // bucket; the direct comparison must recover each occurrence.
        let rk = RabinKarp::build(&["ab", "abcd"]).unwrap();
        assert_eq!(
            rk.find_all_matches("abcdab"),
            vec![m("ab", 0), m("abcd", 0), m("ab", 4)]
        );
    }

    #[test]
    fn test_hash_collisions_are_filtered() {
        // ord('a') + 3 * ord('c') == ord('d') + 3 * ord('b'): "ac" and "db"
        // collide under base 3 but must never cross-report.
        let ac_hash = RollingHash::new(&['a', 'c'], 0, 2).value();
        let db_hash = RollingHash::new(&['d', 'b'], 0, 2).value();
        assert_eq!(ac_hash, db_hash);

        let rk = RabinKarp::build(&["ac", "db"]).unwrap();
        assert_eq!(rk.find_all_matches("xacx"), vec![m("ac", 1)]);
        assert_eq!(rk.find_all_matches("xdbx"), vec![m("db", 1)]);
    }

    #[test]
    fn test_text_is_lowercased() {
        let rk = RabinKarp::build(&["free"]).unwrap();
        assert_eq!(
            rk.find_all_matches("FREE free"),
            vec![m("free", 0), m("free", 5)]
        );
    }

    #[test]
    fn test_text_shorter_than_window() {
        let rk = RabinKarp::build(&["abcd"]).unwrap();
        assert_eq!(rk.find_all_matches("abc"), Vec::new());
    }

    #[test]
    fn test_overlapping_occurrences() {
        let rk = RabinKarp::build(&["aa"]).unwrap();
        assert_eq!(
            rk.find_all_matches("aaaa"),
            vec![m("aa", 0), m("aa", 1), m("aa", 2)]
        );
    }

    #[test]
    fn test_rolled_hash_equals_fresh_hash() {
        let chars: Vec<char> = "the quick brown fox".chars().collect();
        for width in 1..=4 {
            let mut window = RollingHash::new(&chars, 0, width);
            for start in 1..=chars.len() - width {
                window.roll(&chars);
                let fresh = RollingHash::new(&chars, start, width);
                assert_eq!(window.value(), fresh.value(), "width {width} at {start}");
                assert_eq!(window.bounds(), (start, start + width));
            }
        }
    }

    #[test]
    fn test_window_wider_than_hash_range_is_rejected() {
        let widest = "a".repeat(MAX_HASH_WIDTH);
        assert!(RabinKarp::build(&[widest.as_str()]).is_ok());

        let too_wide = "a".repeat(MAX_HASH_WIDTH + 1);
        assert!(matches!(
            RabinKarp::build(&[too_wide.as_str()]),
            Err(BuildError::WidthTooLarge(w)) if w == MAX_HASH_WIDTH + 1
        ));

        // One short pattern keeps the window narrow; long patterns are fine.
        let rk = RabinKarp::build(&[too_wide.as_str(), "aa"]).unwrap();
        assert_eq!(rk.width(), 2);
    }

    #[test]
    fn test_width_one_window() {
        let rk = RabinKarp::build(&["a", "ba"]).unwrap();
        assert_eq!(
            rk.find_all_matches("aba"),
            vec![m("a", 0), m("ba", 1), m("a", 2)]
        );
    }
}
