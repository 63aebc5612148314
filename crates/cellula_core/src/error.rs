//! Error types for the cellula engine.
//!
//! Unknown shape, neighborhood and edge names and malformed rule strings are not
//! errors: they resolve to documented defaults and are logged. What remains here
//! are the conditions a caller has to act on.

use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initial state or family selection the engine cannot start from.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Position lookup outside the current grid.
    #[error("Position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: isize,
        col: isize,
        rows: usize,
        cols: usize,
    },

    /// Grid and ruleset disagree about what a cell may hold.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Error with additional context.
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<EngineError>,
    },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a new invalid state error.
    #[must_use]
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Creates a new out-of-bounds error.
    #[must_use]
    pub fn out_of_bounds(row: isize, col: isize, rows: usize, cols: usize) -> Self {
        Self::OutOfBounds {
            row,
            col,
            rows,
            cols,
        }
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True for configuration errors, including wrapped ones.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::Context { source, .. } => source.is_configuration(),
            _ => false,
        }
    }
}

impl From<anyhow::Error> for EngineError {
    fn from(err: anyhow::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}
