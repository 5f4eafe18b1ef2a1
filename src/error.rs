use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Caller-side precondition violations. Failing to place an item is not an error.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("bin id should be unique, '{0}' already exists")]
    DuplicateBinId(String),

    #[error("item id should be unique, '{0}' already exists")]
    DuplicateItemId(String),

    #[error("the number of digits should be more than or equal to zero, got {0}")]
    NegativePrecision(i64),

    #[error("invalid sort direction '{0}', expected 1 (ascending) or -1 (descending)")]
    InvalidSortDirection(String),

    #[error("invalid position, expected 3 coordinates (x, y, z) but got {0}")]
    MalformedPosition(usize),

    #[error("invalid rotation {0}, the value should be in between 0 and 5")]
    InvalidRotation(i64),

    #[error("invalid dimensions for '{id}': {reason}")]
    InvalidDimension { id: String, reason: String },

    #[error("weight of '{id}' must be non-negative, got {weight}")]
    InvalidWeight { id: String, weight: f64 },

    #[error("unknown strategy '{0}', expected: first-fit, first-fit-decreasing, or heaviest-first")]
    UnknownStrategy(String),
}
