//! Book metadata types

use serde::{Deserialize, Serialize};

/// Language assumed for content documents when the book declares none
pub const DEFAULT_LANGUAGE: &str = "en";

/// Book metadata
///
/// Every field is optional: a source that lacks a value leaves it unset and
/// the encoder simply does not write it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    /// Book title
    pub title: Option<String>,

    /// Author display name ("First Last")
    pub author: Option<String>,

    /// Language code as written in the source
    pub language: Option<String>,

    /// Genre tags
    pub genres: Vec<String>,

    /// Book annotation/summary
    pub annotation: Option<String>,

    /// Asset identifier of the cover image
    pub cover: Option<String>,
}

impl Metadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Declared language, or [`DEFAULT_LANGUAGE`]
    pub fn language_or_default(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_default() {
        assert_eq!(Metadata::new().language_or_default(), "en");
        assert_eq!(
            Metadata::new().with_language("ru").language_or_default(),
            "ru"
        );
    }
}
