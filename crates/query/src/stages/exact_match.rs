//! Exact-match exclusivity.
//!
//! If any title matched every queried value, lower-scoring titles are
//! dropped: an exact answer suppresses merely similar ones.

use crate::traits::RankStage;
use crate::types::ScoredTitle;

pub struct ExactMatchOnly;

impl RankStage for ExactMatchOnly {
    fn name(&self) -> &str {
        "ExactMatchOnly"
    }

    fn apply(&self, mut ranked: Vec<ScoredTitle>) -> Vec<ScoredTitle> {
        if ranked.iter().any(ScoredTitle::is_exact) {
            ranked.retain(ScoredTitle::is_exact);
        }
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_suppresses_partial() {
        let ranked = vec![
            ScoredTitle::new("Exact", 2, 2),
            ScoredTitle::new("Partial", 1, 2),
        ];

        let kept = ExactMatchOnly.apply(ranked);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "Exact");
    }

    #[test]
    fn test_no_exact_keeps_everything() {
        let ranked = vec![
            ScoredTitle::new("A", 2, 3),
            ScoredTitle::new("B", 1, 3),
        ];
        assert_eq!(ExactMatchOnly.apply(ranked).len(), 2);
    }
}
