//! Core trait for the ranking pipeline.

use crate::types::ScoredTitle;

/// One step of turning raw title scores into the final result list.
///
/// ## Design Note
/// - `Send + Sync` so an engine (and its pipeline) can be shared across threads
/// - Stages take ownership of the list and hand back the transformed list
pub trait RankStage: Send + Sync {
    /// Name of this stage (for logging)
    fn name(&self) -> &str;

    /// Apply this stage to the scored titles
    fn apply(&self, ranked: Vec<ScoredTitle>) -> Vec<ScoredTitle>;
}
