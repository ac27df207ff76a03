//! Input validation errors
//!
//! Every failure of a render pass is a precondition violation on the data
//! handed in by the host. None of them are fatal: the caller keeps its last
//! valid scene and selection.

use thiserror::Error;

/// Rejected chart input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("chart data is empty")]
    EmptyData,

    #[error("line data has {line} points but area data has {area} records")]
    LengthMismatch { line: usize, area: usize },

    #[error("no series keys were declared")]
    NoSeriesKeys,

    #[error("series key `{0}` is declared more than once")]
    DuplicateSeriesKey(String),

    #[error("record {index} has no value for series `{key}`")]
    MissingSeriesValue { key: String, index: usize },

    #[error("{what} at index {index} is not a finite number")]
    NonFinite { what: &'static str, index: usize },
}

pub type Result<T> = std::result::Result<T, InvalidInput>;
