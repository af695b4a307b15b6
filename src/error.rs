//! Error types for address and CIDR handling.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// Malformed address, CIDR or mask.
    #[error("Format error: {0}")]
    Format(String),

    /// An operation that needs at least one element got none.
    #[error("Empty input: {0} needs at least one element")]
    EmptyInput(&'static str),
}
