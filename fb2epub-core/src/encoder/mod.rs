//! Encoders for converting the book model to output formats

mod epub;

pub use epub::{EpubEncoder, EpubVersion, STYLESHEET};

use crate::error::ConversionError;
use crate::types::Book;
use std::io::Write;

/// Trait for encoding books to output formats
pub trait Encoder: Send + Sync {
    /// Encode a book to a writer
    fn encode(&self, book: &Book, writer: &mut dyn Write) -> Result<(), ConversionError>;
}
