//! Error types for fb2epub core

use thiserror::Error;

/// Result type alias using Fb2EpubError
pub type Result<T> = std::result::Result<T, Fb2EpubError>;

/// Top-level error type for one file conversion
#[derive(Debug, Error)]
pub enum Fb2EpubError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while reading the source document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    #[error("Invalid base64 in binary '{id}': {reason}")]
    InvalidBase64 { id: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while building the output container
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
