use thiserror::Error;

use crate::model::{Appearance, Section};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rich cell shorthand that cannot be decoded into runs.
    #[error("malformed rich text at row {row}, column {column}: {reason}")]
    MalformedRichInput {
        row: usize,
        column: usize,
        reason: String,
    },

    /// Plain section input with an unsupported shape.
    #[error("invalid table input: {0}")]
    InvalidInput(String),

    #[error("capacity probe for {appearance} did not overflow to page 2 after {iterations} passes")]
    ProbeNonTermination {
        appearance: Appearance,
        iterations: usize,
    },

    #[error("page delimits are not contiguous: {0}")]
    DelimitInvariantViolation(String),

    #[error("rich text grid does not match {section} content: {detail}")]
    IndexMismatch { section: Section, detail: String },
}
