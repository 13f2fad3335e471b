//! Tolerant decoding of stored chat message payloads.
//!
//! Rows written by the ingestion pipeline do not share one encoding: a
//! payload may be a JSON object, a JSON string holding an object, a JSON
//! string holding *another* JSON string, or text that was cut off mid-object.
//! [`normalize`] walks a fixed ladder of decoders and always produces a
//! [`NormalizedMessage`]; it never fails.
//!
//! The salvage rung is a heuristic. Inputs that fall all the way through are
//! tagged [`Resolution::Unparsed`] and logged so they can be found later.

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Maximum number of characters kept in a conversation preview.
pub const PREVIEW_CHARS: usize = 120;

fn content_re() -> &'static Regex {
    static CONTENT_RE: OnceLock<Regex> = OnceLock::new();
    CONTENT_RE.get_or_init(|| {
        Regex::new(r#"(?s)"content"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid content regex")
    })
}

/// A message payload as it comes out of storage.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagePayload {
    /// SQL `NULL`.
    Absent,
    /// A value the store already holds as JSON (object, array, number...).
    Structured(Value),
    /// Text that still has to be decoded.
    Raw(String),
}

impl MessagePayload {
    /// Classifies a value read through a JSON cast of the message column.
    /// Text columns come back as JSON strings and stay raw.
    pub fn from_stored(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::String(text)) => Self::Raw(text),
            Some(other) => Self::Structured(other),
        }
    }

    /// The text form served to clients.
    pub fn into_wire_string(self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Structured(value) => value.to_string(),
            Self::Raw(text) => text,
        }
    }
}

/// Speaker label of a message. Labels other than the exact `human`, `ai`
/// and `unknown` are kept verbatim so they serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MessageKind {
    Human,
    Ai,
    #[default]
    Unknown,
    Other(String),
}

impl MessageKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "human" => Self::Human,
            "ai" => Self::Ai,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Human => "human",
            Self::Ai => "ai",
            Self::Unknown => "unknown",
            Self::Other(label) => label,
        }
    }

    /// Case-insensitive, so `Human` still renders on the human side.
    pub fn is_human(&self) -> bool {
        match self {
            Self::Human => true,
            Self::Other(label) => label.eq_ignore_ascii_case("human"),
            _ => false,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MessageKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which rung of the decoding ladder produced a [`NormalizedMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Nothing stored.
    #[default]
    Empty,
    /// Read from an already-structured value's `content` field.
    Structured,
    /// Read from the `content` field after JSON-decoding text once or twice.
    Decoded,
    /// Decoded, but there was no `content` field; the content is the JSON
    /// text of the whole value.
    Serialized,
    /// JSON decoding failed and the `content` string was pattern-matched out.
    Salvaged,
    /// Nothing could be decoded; the content is the raw text.
    Unparsed,
}

impl Resolution {
    /// Whether the content came from a `content` field of the payload.
    pub fn reads_content_field(&self) -> bool {
        matches!(self, Self::Structured | Self::Decoded | Self::Salvaged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NormalizedMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    #[serde(skip)]
    pub resolution: Resolution,
}

impl NormalizedMessage {
    fn unknown(content: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            kind: MessageKind::Unknown,
            content: content.into(),
            resolution,
        }
    }

    /// First `max_chars` characters of the content, if the payload had a
    /// `content` field at all.
    pub fn preview(&self, max_chars: usize) -> Option<String> {
        self.resolution
            .reads_content_field()
            .then(|| self.content.chars().take(max_chars).collect())
    }
}

/// Resolves any stored payload into `{type, content}`.
pub fn normalize(payload: &MessagePayload) -> NormalizedMessage {
    match payload {
        MessagePayload::Absent | MessagePayload::Structured(Value::Null) => {
            NormalizedMessage::default()
        }
        MessagePayload::Structured(Value::String(text)) | MessagePayload::Raw(text) => {
            normalize_text(text)
        }
        MessagePayload::Structured(value) => resolve_value(value, Resolution::Structured),
    }
}

fn normalize_text(raw: &str) -> NormalizedMessage {
    if raw.is_empty() {
        return NormalizedMessage::default();
    }

    match decode_json(raw) {
        Ok(Value::Null) => NormalizedMessage::unknown(raw, Resolution::Serialized),
        // Still a string after two decodes: show the innermost text.
        Ok(Value::String(inner)) => NormalizedMessage::unknown(inner, Resolution::Decoded),
        Ok(value) => resolve_value(&value, Resolution::Decoded),
        Err(e) => salvage(raw).unwrap_or_else(|| {
            tracing::warn!(
                error = %e,
                raw_len = raw.len(),
                "Message payload could not be decoded, rendering raw text"
            );
            NormalizedMessage::unknown(raw, Resolution::Unparsed)
        }),
    }
}

/// Parses JSON, and parses once more when the first pass yields a string.
fn decode_json(raw: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str::<Value>(raw)? {
        Value::String(inner) => serde_json::from_str(&inner),
        other => Ok(other),
    }
}

fn resolve_value(value: &Value, resolution: Resolution) -> NormalizedMessage {
    let Value::Object(fields) = value else {
        return NormalizedMessage::unknown(value.to_string(), Resolution::Serialized);
    };

    let kind = fields
        .get("type")
        .and_then(Value::as_str)
        .map(MessageKind::from_label)
        .unwrap_or_default();

    let (content, resolution) = match fields.get("content") {
        Some(Value::String(text)) => (text.clone(), resolution),
        None | Some(Value::Null) => (value.to_string(), Resolution::Serialized),
        Some(other) => (other.to_string(), resolution),
    };

    NormalizedMessage {
        kind,
        content,
        resolution,
    }
}

fn salvage(raw: &str) -> Option<NormalizedMessage> {
    let content = extract_content(raw).or_else(|| {
        // Truncated double encoding: the quotes around `content` are escaped.
        raw.contains("\\\"")
            .then(|| unescape(raw))
            .and_then(|once| extract_content(&once))
    })?;

    tracing::debug!(raw_len = raw.len(), "Salvaged content from malformed payload");
    Some(NormalizedMessage::unknown(content, Resolution::Salvaged))
}

fn extract_content(text: &str) -> Option<String> {
    content_re()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| unescape(m.as_str()))
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
