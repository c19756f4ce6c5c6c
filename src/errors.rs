//! Error types for loading a recorded trace
//!
//! A trace that fails to load is a configuration problem, not something to
//! retry: every variant here is fatal to the viewer.

use thiserror::Error;

/// Errors produced while turning a history file into a [`Trace`](crate::snapshot::Trace)
#[derive(Debug, Error)]
pub enum LoadError {
    /// The history text is not valid JSON, or does not have the snapshot layout
    #[error("history is not a valid snapshot list: {0}")]
    Json(#[from] serde_json::Error),

    /// A snapshot holds something the data model has no place for
    #[error("step {step}: {message}")]
    Shape { step: usize, message: String },

    /// Two heap objects in one snapshot share an identifier
    #[error("step {step}: duplicate heap identifier '{id}'")]
    DuplicateHeapId { step: usize, id: String },

    /// A frame's slots or a record's keys repeat a name
    #[error("step {step}: duplicate key '{key}' in {context}")]
    DuplicateKey {
        step: usize,
        context: String,
        key: String,
    },

    /// The recorded program counter is not a line of the source
    #[error("step {step}: line {line} is outside the source (1..={line_count})")]
    InvalidLine {
        step: usize,
        line: usize,
        line_count: usize,
    },
}

impl LoadError {
    /// 1-based step the error was found in, if it concerns a single snapshot
    pub fn step(&self) -> Option<usize> {
        match self {
            LoadError::Json(_) => None,
            LoadError::Shape { step, .. } => Some(*step),
            LoadError::DuplicateHeapId { step, .. } => Some(*step),
            LoadError::DuplicateKey { step, .. } => Some(*step),
            LoadError::InvalidLine { step, .. } => Some(*step),
        }
    }
}
