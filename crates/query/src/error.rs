//! Error types for the query crate.
//!
//! Query evaluation itself never fails: unresolved references and empty
//! queries degrade to fewer (or no) results. The only typed failure is
//! translator output that cannot be read as parameters at all.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    /// Translator output was not valid YAML/JSON, or not a key/value map
    #[error("Invalid {format} query parameters: {reason}")]
    InvalidTranslation {
        format: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, QueryError>;
