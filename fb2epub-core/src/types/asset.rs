//! Embedded binary assets (images)

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Media type used when the source does not declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Bytes kept verbatim in an image file name; everything else is escaped
const FILE_NAME_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// A single decoded binary payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    /// Identifier, unique within a document
    pub id: String,

    /// MIME type (e.g., "image/png"), written verbatim to the manifest
    pub content_type: String,

    /// Decoded bytes
    #[serde(with = "base64_serde")]
    pub data: Vec<u8>,
}

impl Asset {
    /// Create a new asset
    pub fn new(id: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Path of this asset inside the container.
    ///
    /// The id is percent-encoded with `~` in place of `%`, so the result is
    /// both a valid zip entry name and a manifest href that needs no further
    /// escaping. Distinct ids always give distinct names.
    pub fn file_name(&self) -> String {
        let escaped = utf8_percent_encode(&self.id, FILE_NAME_SET)
            .to_string()
            .replace('%', "~");
        format!("images/{}", escaped)
    }
}

/// Base64 serialization for binary data
mod base64_serde {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_under_images() {
        let asset = Asset::new("cover.jpg", "image/jpeg", vec![0xff, 0xd8]);
        assert_eq!(asset.file_name(), "images/cover.jpg");
    }

    #[test]
    fn test_file_name_escapes_unsafe_characters() {
        let name = |id: &str| Asset::new(id, "image/png", Vec::new()).file_name();

        assert_eq!(name("my pic.png"), "images/my~20pic.png");
        assert_eq!(name("a/b#c?.png"), "images/a~2Fb~23c~3F.png");
        assert_eq!(name("a~b"), "images/a~7Eb");
        assert_eq!(name("img_1-2.jpg"), "images/img_1-2.jpg");
        assert_ne!(name("a b"), name("a~20b"));
    }

    #[test]
    fn test_data_serializes_as_base64() {
        let asset = Asset::new("a.png", "image/png", b"hi".to_vec());
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["data"], "aGk=");

        let back: Asset = serde_json::from_value(json).unwrap();
        assert_eq!(back, asset);
    }
}
