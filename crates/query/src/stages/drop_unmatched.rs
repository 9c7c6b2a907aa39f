//! Removes titles that matched nothing.

use crate::traits::RankStage;
use crate::types::ScoredTitle;

/// Keeps only titles with a positive score
pub struct DropUnmatched;

impl RankStage for DropUnmatched {
    fn name(&self) -> &str {
        "DropUnmatched"
    }

    fn apply(&self, ranked: Vec<ScoredTitle>) -> Vec<ScoredTitle> {
        ranked.into_iter().filter(|t| t.matched > 0).collect()
    }
}
