//! Chapter type representing one top-level section of a book

use serde::{Deserialize, Serialize};

/// Title used when a section carries no title of its own
pub const DEFAULT_CHAPTER_TITLE: &str = "Chapter";

/// A single chapter of a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
    /// 1-based position within the book
    pub index: usize,

    /// Chapter title
    pub title: String,

    /// Paragraph texts, each rendered as its own block
    pub paragraphs: Vec<String>,
}

impl Chapter {
    /// Create a new chapter at the given 1-based position
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            paragraphs: Vec::new(),
        }
    }

    /// Set the paragraphs
    pub fn with_paragraphs(mut self, paragraphs: Vec<String>) -> Self {
        self.paragraphs = paragraphs;
        self
    }

    /// File name of this chapter inside the container
    pub fn file_name(&self) -> String {
        format!("chap_{}.xhtml", self.index)
    }
}
