//! EPUB encoder implementation

use crate::error::ConversionError;
use crate::types::{Book, Chapter};
use std::io::Write;

/// Stylesheet shared by every content document
pub const STYLESHEET: &str = "body { font-family: Times, Times New Roman, serif; }";

/// Encoder for EPUB format
pub struct EpubEncoder {
    /// EPUB version to generate
    version: EpubVersion,
}

/// EPUB version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EpubVersion {
    V2,
    #[default]
    V3,
}

impl EpubVersion {
    fn to_builder(self) -> epub_builder::EpubVersion {
        match self {
            EpubVersion::V2 => epub_builder::EpubVersion::V20,
            EpubVersion::V3 => epub_builder::EpubVersion::V30,
        }
    }
}

impl EpubEncoder {
    pub fn new() -> Self {
        Self {
            version: EpubVersion::V3,
        }
    }

    /// Set EPUB version
    pub fn with_version(mut self, version: EpubVersion) -> Self {
        self.version = version;
        self
    }

    /// Configured EPUB version
    pub fn version(&self) -> EpubVersion {
        self.version
    }

    /// Render the body of a chapter: its title as a heading followed by one
    /// block per paragraph
    fn chapter_body(&self, chapter: &Chapter) -> String {
        let mut html = format!("<h1>{}</h1>\n", escape_html(&chapter.title));
        for paragraph in &chapter.paragraphs {
            html.push_str(&format!("<p>{}</p>\n", escape_html(paragraph)));
        }
        html
    }

    /// Generate XHTML document for a chapter
    fn chapter_to_xhtml(&self, chapter: &Chapter, lang: &str) -> String {
        let lang = escape_html(lang);
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" lang="{lang}" xml:lang="{lang}">
<head>
    <title>{}</title>
    <meta charset="UTF-8"/>
    <link rel="stylesheet" type="text/css" href="stylesheet.css"/>
</head>
<body>
{}
</body>
</html>"#,
            escape_html(&chapter.title),
            self.chapter_body(chapter)
        )
    }
}

impl Default for EpubEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Encoder for EpubEncoder {
    fn encode(&self, book: &Book, writer: &mut dyn Write) -> Result<(), ConversionError> {
        use epub_builder::{EpubBuilder, EpubContent, ReferenceType, ZipLibrary};

        let mut builder = EpubBuilder::new(ZipLibrary::new().map_err(|e| {
            ConversionError::EncodingFailed(format!("Failed to create zip: {}", e))
        })?)
        .map_err(|e| {
            ConversionError::EncodingFailed(format!("Failed to create EPUB builder: {}", e))
        })?;

        builder.epub_version(self.version.to_builder());

        // Metadata: only what the book actually has
        let metadata = &book.metadata;
        if let Some(title) = &metadata.title {
            builder
                .metadata("title", title)
                .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        }
        if let Some(author) = &metadata.author {
            builder
                .metadata("author", author)
                .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        }
        if let Some(language) = &metadata.language {
            builder
                .metadata("lang", language)
                .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        }
        for genre in &metadata.genres {
            builder
                .metadata("subject", genre)
                .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        }
        if let Some(annotation) = &metadata.annotation {
            builder
                .metadata("description", annotation)
                .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        }

        builder
            .stylesheet(STYLESHEET.as_bytes())
            .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;

        // Navigation document goes first in the spine
        builder.inline_toc();

        // Images
        let cover_id = book.cover_asset().map(|asset| asset.id.as_str());
        for asset in book.assets.values() {
            let result = if Some(asset.id.as_str()) == cover_id {
                builder.add_cover_image(
                    asset.file_name(),
                    asset.data.as_slice(),
                    asset.content_type.as_str(),
                )
            } else {
                builder.add_resource(
                    asset.file_name(),
                    asset.data.as_slice(),
                    asset.content_type.as_str(),
                )
            };
            result.map_err(|e| {
                ConversionError::EncodingFailed(format!(
                    "Failed to add image '{}': {}",
                    asset.id, e
                ))
            })?;
        }

        // Chapters, in book order
        let lang = metadata.language_or_default();
        for chapter in &book.chapters {
            let xhtml = self.chapter_to_xhtml(chapter, lang);

            builder
                .add_content(
                    EpubContent::new(chapter.file_name(), xhtml.as_bytes())
                        .title(chapter.title.as_str())
                        .reftype(ReferenceType::Text),
                )
                .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        }

        // Generate EPUB
        builder
            .generate(writer)
            .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;

        Ok(())
    }
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use crate::types::{Asset, Metadata};

    #[test]
    fn test_chapter_body() {
        let encoder = EpubEncoder::new();
        let chapter = Chapter::new(1, "Opening").with_paragraphs(vec![
            "First.".to_string(),
            "Second.".to_string(),
        ]);

        let html = encoder.chapter_body(&chapter);
        assert_eq!(html, "<h1>Opening</h1>\n<p>First.</p>\n<p>Second.</p>\n");
    }

    #[test]
    fn test_chapter_text_is_escaped() {
        let encoder = EpubEncoder::new();
        let chapter =
            Chapter::new(1, "Tom & Jerry").with_paragraphs(vec!["1 < 2 > 0".to_string()]);

        let html = encoder.chapter_body(&chapter);
        assert!(html.contains("<h1>Tom &amp; Jerry</h1>"));
        assert!(html.contains("<p>1 &lt; 2 &gt; 0</p>"));
    }

    #[test]
    fn test_chapter_document_language() {
        let encoder = EpubEncoder::new();
        let chapter = Chapter::new(1, "Title");

        let xhtml = encoder.chapter_to_xhtml(&chapter, "ru");
        assert!(xhtml.contains(r#"xml:lang="ru""#));
        assert!(xhtml.contains("stylesheet.css"));
    }

    #[test]
    fn test_encode_writes_zip() {
        let mut book = Book::with_metadata(Metadata::new().with_title("Zipped"));
        book.add_chapter("One", vec!["text".to_string()]);
        book.add_asset(Asset::new("pic.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]));

        let mut output = Vec::new();
        EpubEncoder::new().encode(&book, &mut output).unwrap();

        assert!(output.starts_with(b"PK"));
    }

    #[test]
    fn test_version_setting() {
        assert_eq!(EpubEncoder::new().version(), EpubVersion::V3);
        assert_eq!(
            EpubEncoder::new().with_version(EpubVersion::V2).version(),
            EpubVersion::V2
        );
    }
}
