//! # Error Types
//!
//! Typed conditions that callers branch on. Everything else travels as
//! `anyhow::Error` with context attached at the call site.

use std::process::ExitStatus;
use thiserror::Error;

/// Conditions raised by the ripping pipeline.
#[derive(Debug, Error)]
pub enum RipError {
    /// The backward line popper ran off the start of the file.
    ///
    /// On the queue file this is the "queue is empty" signal and ends the
    /// main loop normally.
    #[error("no line left to pop")]
    OutOfBounds,

    /// Operator typed something the interrupt menu cannot apply.
    #[error("invalid menu selection `{0}`")]
    InvalidMenuSelection(String),

    /// The external recorder exited abnormally without being interrupted.
    #[error("recorder `{program}` failed with {status}")]
    RecorderFailure { program: String, status: ExitStatus },

    /// Search backend named in the configuration is not implemented.
    #[error("search engine `{0}` is not implemented")]
    UnsupportedSearchBackend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RipError {
    /// Whether this is the popper's empty-file signal.
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds)
    }
}

pub type Result<T> = std::result::Result<T, RipError>;
