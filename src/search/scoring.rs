//! Static relevance weights and result ordering.

use super::SearchResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Hook that replaces the computed score of every result.
pub type ScoreOverride = Arc<dyn Fn(&SearchResult) -> i64 + Send + Sync>;

/// Weights for each kind of match.
///
/// Configured under `[scorer]`; every field has a default so partial tables work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scorer {
    /// Query matches the full object name or its last dotted segment.
    pub obj_name_match: i64,
    /// Query is contained in the last dotted segment of an object name.
    pub obj_partial_match: i64,
    /// Additive score per object priority code (keys are the decimal code).
    pub obj_prio: BTreeMap<String, i64>,
    /// Used when the priority code has no entry in `obj_prio`.
    pub obj_prio_default: i64,
    /// Query found in a title.
    pub title: i64,
    pub partial_title: i64,
    /// Query found in body terms.
    pub term: i64,
    pub partial_term: i64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            obj_name_match: 11,
            obj_partial_match: 6,
            obj_prio: BTreeMap::from([
                ("0".to_string(), 15),
                ("1".to_string(), 5),
                ("2".to_string(), -5),
            ]),
            obj_prio_default: 0,
            title: 15,
            partial_title: 7,
            term: 5,
            partial_term: 2,
        }
    }
}

impl Scorer {
    /// Additive score for an object's priority code.
    pub fn priority(&self, code: i64) -> i64 {
        self.obj_prio
            .get(&code.to_string())
            .copied()
            .unwrap_or(self.obj_prio_default)
    }
}

/// Scale `weight` by how much of `text_len` the query covers, rounding half up.
pub(crate) fn scaled(weight: i64, query_len: usize, text_len: usize) -> i64 {
    if text_len == 0 {
        return weight;
    }
    (weight as f64 * query_len as f64 / text_len as f64 + 0.5).floor() as i64
}

/// Ascending by score, then descending by case-insensitive title.
///
/// Results are consumed by popping from the end, so the displayed order is
/// descending score with ties in ascending alphabetical order.
pub(crate) fn pop_order(a: &SearchResult, b: &SearchResult) -> Ordering {
    a.score.cmp(&b.score).then_with(|| {
        let left = a.title.to_lowercase();
        let right = b.title.to_lowercase();
        right.cmp(&left)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn result(title: &str, score: i64) -> SearchResult {
        SearchResult {
            doc_name: title.to_lowercase(),
            title: title.to_string(),
            anchor: String::new(),
            description: None,
            score,
            filename: String::new(),
        }
    }

    #[rstest]
    #[case(15, 5, 5, 15)]
    #[case(15, 5, 10, 8)] // 7.5 rounds up
    #[case(15, 3, 6, 8)]
    #[case(100, 4, 7, 57)]
    #[case(15, 1, 0, 15)]
    fn test_scaled(
        #[case] weight: i64,
        #[case] query_len: usize,
        #[case] text_len: usize,
        #[case] expected: i64,
    ) {
        check!(scaled(weight, query_len, text_len) == expected);
    }

    #[rstest]
    #[case(0, 15)]
    #[case(1, 5)]
    #[case(2, -5)]
    #[case(9, 0)]
    fn test_priority(#[case] code: i64, #[case] expected: i64) {
        check!(Scorer::default().priority(code) == expected);
    }

    #[test]
    fn test_pop_order_reverses_alphabetical_ties() {
        let mut results = vec![result("beta", 5), result("Alpha", 5), result("gamma", 9)];
        results.sort_by(pop_order);

        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        check!(titles == ["beta", "Alpha", "gamma"]);

        // Popping yields the display order.
        let displayed: Vec<String> = std::iter::from_fn(|| results.pop().map(|r| r.title)).collect();
        check!(displayed == ["gamma", "Alpha", "beta"]);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let scorer: Scorer = toml::from_str("title = 20\n[obj_prio]\n\"0\" = 30\n").unwrap();
        check!(scorer.title == 20);
        check!(scorer.term == 5);
        check!(scorer.priority(0) == 30);
        check!(scorer.priority(1) == 0);
    }
}
