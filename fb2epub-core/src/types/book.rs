//! The main Book type - the root of the in-memory model

use super::{Asset, Chapter, Metadata};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete book representation produced by the decoder and consumed by
/// the encoder
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Book metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Ordered list of chapters
    pub chapters: Vec<Chapter>,

    /// Embedded assets keyed by identifier
    pub assets: BTreeMap<String, Asset>,
}

impl Book {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with existing metadata
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Append a chapter, numbering it after the existing ones
    pub fn add_chapter(&mut self, title: impl Into<String>, paragraphs: Vec<String>) {
        let index = self.chapters.len() + 1;
        self.chapters
            .push(Chapter::new(index, title).with_paragraphs(paragraphs));
    }

    /// Add an asset unless one with the same identifier is already present.
    ///
    /// Returns `false` when the asset was rejected as a duplicate.
    pub fn add_asset(&mut self, asset: Asset) -> bool {
        if self.assets.contains_key(&asset.id) {
            return false;
        }
        self.assets.insert(asset.id.clone(), asset);
        true
    }

    /// Get the book title
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    /// The cover asset, if the metadata names one that exists
    pub fn cover_asset(&self) -> Option<&Asset> {
        self.metadata
            .cover
            .as_deref()
            .and_then(|id| self.assets.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_creation() {
        let mut book = Book::with_metadata(Metadata::new().with_title("Test Book"));
        assert_eq!(book.title(), Some("Test Book"));
        assert_eq!(book.metadata.author, None);
        assert!(book.chapters.is_empty());

        book.add_chapter("Chapter 1", vec!["Hello, world!".to_string()]);
        book.add_chapter("Chapter 2", vec![]);

        assert_eq!(book.chapters.len(), 2);
        assert_eq!(book.chapters[0].title, "Chapter 1");
        assert_eq!(book.chapters[1].index, 2);
    }

    #[test]
    fn test_duplicate_asset_keeps_first() {
        let mut book = Book::new();
        assert!(book.add_asset(Asset::new("img", "image/png", vec![1])));
        assert!(!book.add_asset(Asset::new("img", "image/jpeg", vec![2])));

        assert_eq!(book.assets.len(), 1);
        assert_eq!(book.assets["img"].content_type, "image/png");
    }

    #[test]
    fn test_cover_asset_requires_existing_id() {
        let mut metadata = Metadata::new();
        metadata.cover = Some("cover.png".to_string());
        let mut book = Book::with_metadata(metadata);
        assert!(book.cover_asset().is_none());

        book.add_asset(Asset::new("cover.png", "image/png", vec![1, 2, 3]));
        assert_eq!(book.cover_asset().map(|a| a.data.len()), Some(3));
    }

    #[test]
    fn test_book_serialization() {
        let book = Book::with_metadata(Metadata::new().with_title("Serialization Test"));
        let json = serde_json::to_string(&book).unwrap();
        let deserialized: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(book, deserialized);
    }
}
