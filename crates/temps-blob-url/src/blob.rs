//! Immutable binary payloads built from ordered parts

use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// Line ending handling for text parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endings {
    /// Text is stored exactly as given
    #[default]
    Transparent,
    /// `\r\n`, `\r` and `\n` in text parts become the host line ending
    Native,
}

/// Options applied when a blob is constructed
///
/// Field names follow the platform option bag, so `{"type": "text/plain",
/// "endings": "native"}` deserializes directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobOptions {
    #[serde(rename = "type", default)]
    pub content_type: String,
    #[serde(default)]
    pub endings: Endings,
}

impl BlobOptions {
    /// Options with the given content type and transparent endings
    pub fn with_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            endings: Endings::Transparent,
        }
    }

    pub fn endings(mut self, endings: Endings) -> Self {
        self.endings = endings;
        self
    }
}

/// One input part of a blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobPart {
    Bytes(Bytes),
    Text(String),
    Blob(Blob),
}

impl From<&str> for BlobPart {
    fn from(text: &str) -> Self {
        BlobPart::Text(text.to_string())
    }
}

impl From<String> for BlobPart {
    fn from(text: String) -> Self {
        BlobPart::Text(text)
    }
}

impl From<Bytes> for BlobPart {
    fn from(bytes: Bytes) -> Self {
        BlobPart::Bytes(bytes)
    }
}

impl From<Vec<u8>> for BlobPart {
    fn from(bytes: Vec<u8>) -> Self {
        BlobPart::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for BlobPart {
    fn from(bytes: &[u8]) -> Self {
        BlobPart::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<Blob> for BlobPart {
    fn from(blob: Blob) -> Self {
        BlobPart::Blob(blob)
    }
}

/// An immutable chunk of bytes with a content type
///
/// Cloning is cheap: the payload is reference counted and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
    content_type: String,
}

impl Blob {
    /// Build a blob by concatenating `parts` in order
    pub fn new<I, P>(parts: I, options: &BlobOptions) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<BlobPart>,
    {
        let mut data = BytesMut::new();
        for part in parts {
            match part.into() {
                BlobPart::Bytes(bytes) => data.extend_from_slice(&bytes),
                BlobPart::Text(text) => match options.endings {
                    Endings::Transparent => data.extend_from_slice(text.as_bytes()),
                    Endings::Native => {
                        let converted = convert_line_endings(&text, NATIVE_LINE_ENDING);
                        data.extend_from_slice(converted.as_bytes());
                    }
                },
                BlobPart::Blob(blob) => data.extend_from_slice(&blob.data),
            }
        }

        Self {
            data: data.freeze(),
            content_type: normalize_content_type(&options.content_type),
        }
    }

    /// A blob with no bytes and no content type
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Normalized content type; empty when unknown
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    /// Decode the payload as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

#[cfg(windows)]
const NATIVE_LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const NATIVE_LINE_ENDING: &str = "\n";

/// Replace every `\r\n`, lone `\r` and lone `\n` with `ending`
fn convert_line_endings(text: &str, ending: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(ending);
            }
            '\n' => out.push_str(ending),
            other => out.push(other),
        }
    }
    out
}

/// Content types with characters outside printable ASCII are dropped,
/// everything else is lowercased.
fn normalize_content_type(content_type: &str) -> String {
    if content_type.chars().any(|c| !(' '..='~').contains(&c)) {
        return String::new();
    }
    content_type.to_ascii_lowercase()
}
