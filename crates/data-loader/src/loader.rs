//! Dataset loading entry point.
//!
//! Wraps the CSV parser with logging and a light sanity pass so callers get
//! one call that turns a file into records ready for the graph builder.

use crate::error::Result;
use crate::parser;
use crate::types::MovieRecord;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load every movie record from a CSV file
///
/// Steps:
/// 1. Parse the file (rows are parsed in parallel)
/// 2. Report records without a year and duplicate titles
///
/// Duplicates and missing years are reported, not rejected here: the graph
/// builder owns those rules.
pub fn load_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    info!("Loading movie dataset from {:?}", path);

    let records = parser::parse_movies(path)?;

    let summary = summarize(&records);
    if summary.missing_year > 0 {
        warn!("{} records have no release year", summary.missing_year);
    }
    if summary.duplicate_titles > 0 {
        debug!("{} records repeat an earlier title", summary.duplicate_titles);
    }

    info!("Loaded {} movie records", records.len());
    Ok(records)
}

/// Counts gathered while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub records: usize,
    pub missing_year: usize,
    pub duplicate_titles: usize,
}

/// Compute a [`LoadSummary`] for a set of records
pub fn summarize(records: &[MovieRecord]) -> LoadSummary {
    let mut seen = HashSet::new();
    let mut summary = LoadSummary {
        records: records.len(),
        ..LoadSummary::default()
    };

    for record in records {
        if record.year.is_none() {
            summary.missing_year += 1;
        }
        if !seen.insert(record.title.as_str()) {
            summary.duplicate_titles += 1;
        }
    }
    summary
}
