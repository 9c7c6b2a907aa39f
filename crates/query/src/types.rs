//! Result types of the query engine.

use serde::Serialize;

/// One ranked title
///
/// `score = matched / total`, where `total` is the size of the
/// queried-attribute set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTitle {
    pub title: String,
    pub score: f64,
    /// Queried values that found a matching neighbor
    pub matched: usize,
    /// Size of the queried-attribute set
    pub total: usize,
}

impl ScoredTitle {
    pub fn new(title: impl Into<String>, matched: usize, total: usize) -> Self {
        let score = if total == 0 {
            0.0
        } else {
            matched as f64 / total as f64
        };
        Self {
            title: title.into(),
            score,
            matched,
            total,
        }
    }

    /// Every queried value matched (score of exactly 1.0)
    pub fn is_exact(&self) -> bool {
        self.total > 0 && self.matched == self.total
    }
}
