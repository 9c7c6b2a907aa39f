//! Ranking stage implementations.
//!
//! The standard order is drop-unmatched, sort, exact-match-only, truncate.

pub mod drop_unmatched;
pub mod exact_match;
pub mod sort_by_score;
pub mod truncate;

// Re-export for convenience
pub use drop_unmatched::DropUnmatched;
pub use exact_match::ExactMatchOnly;
pub use sort_by_score::SortByScore;
pub use truncate::Truncate;
