//! Error types for unbb library.
//!
//! The markup pipeline itself never fails: malformed markup, unknown
//! attachment ids and unparsable colors or timestamps degrade to literal text
//! or defaults. Errors only come from the edges around it (files, JSON).

use std::io;
use thiserror::Error;

/// Result type alias for unbb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around the markup pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading markup or attachment files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The attachment table could not be decoded.
    #[error("Invalid attachment table: {0}")]
    InvalidAttachments(String),

    /// Error while serializing rendered blocks.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
