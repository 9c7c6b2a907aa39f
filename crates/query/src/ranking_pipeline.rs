//! The RankingPipeline chains ranking stages.
//!
//! Raw per-title scores go in; the final result list comes out.

use crate::stages::{DropUnmatched, ExactMatchOnly, SortByScore, Truncate};
use crate::traits::RankStage;
use crate::types::ScoredTitle;

/// Chains multiple ranking stages together.
///
/// ## Usage
/// ```ignore
/// let pipeline = RankingPipeline::new()
///     .add_stage(DropUnmatched)
///     .add_stage(SortByScore)
///     .add_stage(ExactMatchOnly)
///     .add_stage(Truncate::new(5));
///
/// let results = pipeline.apply(scored);
/// ```
pub struct RankingPipeline {
    stages: Vec<Box<dyn RankStage>>,
}

impl RankingPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The standard ranking policy with a result cap of `limit`
    pub fn standard(limit: usize) -> Self {
        Self::new()
            .add_stage(DropUnmatched)
            .add_stage(SortByScore)
            .add_stage(ExactMatchOnly)
            .add_stage(Truncate::new(limit))
    }

    /// Add a stage to the pipeline (builder pattern).
    pub fn add_stage(mut self, stage: impl RankStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Apply all stages in sequence
    pub fn apply(&self, scored: Vec<ScoredTitle>) -> Vec<ScoredTitle> {
        let mut current = scored;
        for stage in &self.stages {
            let before = current.len();
            current = stage.apply(current);
            tracing::trace!(
                "Rank stage {}: {} -> {} titles",
                stage.name(),
                before,
                current.len()
            );
        }
        current
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for RankingPipeline {
    fn default() -> Self {
        Self::new()
    }
}
