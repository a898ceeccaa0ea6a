//! FictionBook 2 decoder implementation
//!
//! Only the `http://www.gribuser.ru/xml/fictionbook/2.0` namespace is
//! recognized; elements from any other namespace are ignored. Nothing in the
//! document is mandatory: missing metadata or body parts fall back to
//! defaults instead of failing the decode.

use crate::error::ParseError;
use crate::types::{
    Asset, Book, Chapter, Metadata, DEFAULT_CHAPTER_TITLE, DEFAULT_CONTENT_TYPE,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use roxmltree::Node;
use std::borrow::Cow;
use std::io::Read;

/// XML namespace of FictionBook 2.0 elements
pub const FB2_NAMESPACE: &str = "http://www.gribuser.ru/xml/fictionbook/2.0";

/// XML namespace used for `href` attributes on images
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Decoder for FictionBook 2.0 documents
#[derive(Debug, Default, Clone, Copy)]
pub struct Fb2Decoder;

impl Fb2Decoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode a book from raw source bytes
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Book, ParseError> {
        let source = decode_source(bytes);
        self.decode_str(&source)
    }

    /// Decode a book from an already decoded XML string
    pub fn decode_str(&self, source: &str) -> Result<Book, ParseError> {
        // FB2 files in the wild often carry a DOCTYPE line
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let document = roxmltree::Document::parse_with_options(source, options)
            .map_err(|e| ParseError::InvalidXml(e.to_string()))?;
        let root = document.root_element();

        if !root.has_tag_name((FB2_NAMESPACE, "FictionBook")) {
            tracing::debug!(
                "Root element is <{}>, not an FB2 FictionBook; extracting what matches",
                root.tag_name().name()
            );
        }

        let mut book = Book::with_metadata(extract_metadata(root));
        book.chapters = extract_chapters(root);

        for asset in extract_assets(root) {
            let id = asset.id.clone();
            if !book.add_asset(asset) {
                tracing::warn!("Dropping binary with duplicate id '{}'", id);
            }
        }

        // Only keep a cover reference that actually resolves to an asset
        if let Some(cover) = book.metadata.cover.take() {
            if book.assets.contains_key(&cover) {
                book.metadata.cover = Some(cover);
            } else {
                tracing::debug!("Cover image '{}' has no matching binary", cover);
            }
        }

        tracing::debug!(
            "Decoded FB2 with {} chapters and {} assets",
            book.chapters.len(),
            book.assets.len()
        );

        Ok(book)
    }
}

impl super::Decoder for Fb2Decoder {
    fn decode(&self, reader: &mut dyn Read) -> Result<Book, ParseError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.decode_bytes(&bytes)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["fb2"]
    }
}

// =============================================================================
// Metadata
// =============================================================================

fn extract_metadata(root: Node) -> Metadata {
    let mut metadata = Metadata::new();

    let Some(title_info) = child(root, "description").and_then(|d| child(d, "title-info"))
    else {
        return metadata;
    };

    metadata.title = child_text(title_info, "book-title");
    metadata.author = child(title_info, "author").and_then(author_name);
    metadata.language = child_text(title_info, "lang");
    metadata.genres = children(title_info, "genre").filter_map(text_of).collect();

    metadata.annotation = child(title_info, "annotation").and_then(|annotation| {
        let lines: Vec<String> = children(annotation, "p").filter_map(text_of).collect();
        (!lines.is_empty()).then(|| lines.join("\n"))
    });

    metadata.cover = child(title_info, "coverpage")
        .and_then(|coverpage| child(coverpage, "image"))
        .and_then(|image| image.attribute((XLINK_NAMESPACE, "href")))
        .map(|href| href.trim_start_matches('#').to_string())
        .filter(|id| !id.is_empty());

    metadata
}

/// "First Last", leaving out whichever part is missing
fn author_name(author: Node) -> Option<String> {
    let parts: Vec<String> = ["first-name", "last-name"]
        .into_iter()
        .filter_map(|name| child_text(author, name))
        .collect();

    (!parts.is_empty()).then(|| parts.join(" "))
}

// =============================================================================
// Body
// =============================================================================

/// One chapter per top-level section of the first body. Nested sections are
/// not descended into.
fn extract_chapters(root: Node) -> Vec<Chapter> {
    let Some(body) = child(root, "body") else {
        return Vec::new();
    };

    children(body, "section")
        .enumerate()
        .map(|(i, section)| {
            let title = child(section, "title")
                .and_then(|title| child_text(title, "p"))
                .unwrap_or_else(|| DEFAULT_CHAPTER_TITLE.to_string());
            let paragraphs = children(section, "p").filter_map(text_of).collect();

            Chapter::new(i + 1, title).with_paragraphs(paragraphs)
        })
        .collect()
}

// =============================================================================
// Binaries
// =============================================================================

fn extract_assets(root: Node) -> Vec<Asset> {
    children(root, "binary")
        .filter_map(|binary| match decode_binary(binary) {
            Ok(asset) => asset,
            Err(e) => {
                tracing::warn!("Skipping embedded binary: {}", e);
                None
            }
        })
        .collect()
}

/// `Ok(None)` for entries without an id or payload; `Err` for a payload that
/// is not valid base64.
fn decode_binary(binary: Node) -> Result<Option<Asset>, ParseError> {
    let Some(id) = binary.attribute("id").filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    let payload: Vec<u8> = binary
        .text()
        .unwrap_or_default()
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if payload.is_empty() {
        return Ok(None);
    }

    let data = STANDARD
        .decode(&payload)
        .map_err(|e| ParseError::InvalidBase64 {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

    let content_type = binary
        .attribute("content-type")
        .filter(|ct| !ct.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    Ok(Some(Asset::new(id, content_type, data)))
}

// =============================================================================
// Tree helpers
// =============================================================================

/// First FB2 child element with the given local name
fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.has_tag_name((FB2_NAMESPACE, name)))
}

/// All FB2 child elements with the given local name, in document order
fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.has_tag_name((FB2_NAMESPACE, name)))
}

fn child_text(node: Node, name: &str) -> Option<String> {
    child(node, name).and_then(text_of)
}

/// Concatenated text of an element and its descendants, or `None` when there
/// is none. Inline markup is flattened; whitespace-only text is kept.
fn text_of(node: Node) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();

    (!text.is_empty()).then_some(text)
}

// =============================================================================
// Source decoding
// =============================================================================

/// Decode source bytes to text: UTF-8 (with or without BOM) first, then the
/// encoding named in the XML declaration, then Windows-1252.
fn decode_source(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    if let Some(encoding) =
        declared_encoding(bytes).and_then(|label| encoding_rs::Encoding::for_label(label))
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// The `encoding` pseudo-attribute of a leading `<?xml ...?>` declaration
fn declared_encoding(bytes: &[u8]) -> Option<&[u8]> {
    let start = bytes.windows(5).position(|w| w == b"<?xml")?;
    let end = start + bytes[start..].windows(2).position(|w| w == b"?>")?;
    let decl = &bytes[start..end];

    let key = decl.windows(8).position(|w| w == b"encoding")?;
    let rest = &decl[key + 8..];
    let quote_pos = rest.iter().position(|&b| b == b'"' || b == b'\'')?;
    let quote = rest[quote_pos];
    let value = &rest[quote_pos + 1..];
    let close = value.iter().position(|&b| b == quote)?;

    Some(&value[..close])
}
