// src/error.rs

//! Error taxonomy for the editor core.
//!
//! Every variant here is fatal: the binary restores the terminal, clears the
//! screen and exits non-zero. Ambiguous escape sequences never show up here,
//! the input decoder absorbs them as a bare `Escape` key.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the editor core.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Terminal attributes could not be read or applied (typically: not a TTY).
    #[error("terminal control failed: {context}")]
    Terminal {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    /// Neither the direct size query nor the cursor-position probe worked.
    #[error("unable to determine terminal window size")]
    SizeUnavailable,

    /// Unexpected read or write failure on the terminal device.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file named at startup could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EditorError {
    pub(crate) fn terminal(context: &'static str, source: io::Error) -> Self {
        EditorError::Terminal { context, source }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EditorError>;
