//! Decoders for converting input formats to the book model

mod fb2;

pub use fb2::{Fb2Decoder, FB2_NAMESPACE};

use crate::error::ParseError;
use crate::types::Book;
use std::io::Read;

/// Trait for decoding ebook formats into the book model
pub trait Decoder: Send + Sync {
    /// Decode a book from a reader
    fn decode(&self, reader: &mut dyn Read) -> Result<Book, ParseError>;

    /// File extensions this decoder supports, lowercase
    fn supported_extensions(&self) -> &[&str];
}

/// Get the appropriate decoder for a file extension
pub fn decoder_for_extension(ext: &str) -> Option<Box<dyn Decoder>> {
    let ext_lower = ext.to_lowercase();
    let decoder = Fb2Decoder::new();

    decoder
        .supported_extensions()
        .contains(&ext_lower.as_str())
        .then(|| Box::new(decoder) as Box<dyn Decoder>)
}
