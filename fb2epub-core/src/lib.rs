//! fb2epub Core Library
//!
//! This crate converts FictionBook 2 (FB2) documents to EPUB. A source file
//! is decoded into a small in-memory [`Book`] model (metadata, chapters and
//! embedded images) which is then encoded as an EPUB container.

pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod types;

pub use convert::{convert_file, Converter};
pub use error::{ConversionError, Fb2EpubError, ParseError, Result};
pub use types::{Asset, Book, Chapter, Metadata};
