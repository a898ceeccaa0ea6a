//! Core types for the in-memory book model

mod asset;
mod book;
mod chapter;
mod metadata;

pub use asset::{Asset, DEFAULT_CONTENT_TYPE};
pub use book::Book;
pub use chapter::{Chapter, DEFAULT_CHAPTER_TITLE};
pub use metadata::{Metadata, DEFAULT_LANGUAGE};
