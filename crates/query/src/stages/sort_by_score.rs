//! Orders titles by score, best first.

use crate::traits::RankStage;
use crate::types::ScoredTitle;
use std::cmp::Ordering;

/// Stable sort by score descending.
///
/// Equal scores keep their incoming order, which is graph iteration order
/// when fed straight from the engine.
pub struct SortByScore;

impl RankStage for SortByScore {
    fn name(&self) -> &str {
        "SortByScore"
    }

    fn apply(&self, mut ranked: Vec<ScoredTitle>) -> Vec<ScoredTitle> {
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_is_stable() {
        let ranked = vec![
            ScoredTitle::new("A", 1, 3),
            ScoredTitle::new("B", 2, 3),
            ScoredTitle::new("C", 1, 3),
            ScoredTitle::new("D", 2, 3),
        ];

        let sorted: Vec<String> = SortByScore
            .apply(ranked)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(sorted, vec!["B", "D", "A", "C"]);
    }
}
