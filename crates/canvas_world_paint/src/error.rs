//! Error types for the paint layer.

use std::error::Error;
use std::fmt;

use crate::geometry::Bounds;

/// Errors raised while decoding a stored paint record. Readers treat any of
/// these as a malformed entry: the record is skipped, never propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    Parse { message: String },
    WrongType { found: String },
    EmptyCells,
    BadCellKey { message: String },
    KeyMismatch { expected: String, found: String },
    BoundsMismatch { stored: Bounds, computed: Bounds },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Parse { message } => write!(f, "parse failed: {message}"),
            RecordError::WrongType { found } => write!(f, "unexpected record type: {found}"),
            RecordError::EmptyCells => write!(f, "record has no cells"),
            RecordError::BadCellKey { message } => write!(f, "bad cell key: {message}"),
            RecordError::KeyMismatch { expected, found } => {
                write!(f, "record id implies key {expected} but stored under {found}")
            }
            RecordError::BoundsMismatch { stored, computed } => write!(
                f,
                "stored bounds {stored:?} disagree with cell bounds {computed:?}"
            ),
        }
    }
}

impl Error for RecordError {}

impl From<serde_json::Error> for RecordError {
    fn from(error: serde_json::Error) -> Self {
        RecordError::Parse {
            message: error.to_string(),
        }
    }
}

/// Errors raised by paint operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintError {
    EmptyCellSet,
    Serde(String),
}

impl fmt::Display for PaintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintError::EmptyCellSet => write!(f, "a paint blob requires at least one cell"),
            PaintError::Serde(message) => write!(f, "serde error: {message}"),
        }
    }
}

impl Error for PaintError {}

impl From<serde_json::Error> for PaintError {
    fn from(error: serde_json::Error) -> Self {
        PaintError::Serde(error.to_string())
    }
}
