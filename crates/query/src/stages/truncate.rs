//! Caps the number of results.

use crate::traits::RankStage;
use crate::types::ScoredTitle;

pub struct Truncate {
    limit: usize,
}

impl Truncate {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl RankStage for Truncate {
    fn name(&self) -> &str {
        "Truncate"
    }

    fn apply(&self, mut ranked: Vec<ScoredTitle>) -> Vec<ScoredTitle> {
        ranked.truncate(self.limit);
        ranked
    }
}
