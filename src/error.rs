//! Error types for pastecondense operations.
//!
//! The condensation pipeline itself cannot fail; errors only arise at the
//! edges (reading input, decoding bytes, parsing options).

use thiserror::Error;

/// Errors that can occur around a condensation run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown empty-block policy: {0} (expected \"conservative\" or \"aggressive\")")]
    InvalidPolicy(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, Error>;
