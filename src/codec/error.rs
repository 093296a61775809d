//! Decode/encode error types.

use thiserror::Error;

/// Broad class of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Not valid JSON.
    Syntax,
    /// Valid JSON with the wrong shape: unknown `type`, missing `type`,
    /// or a value that cannot be coerced.
    Data,
    /// Input ended in the middle of a value.
    Eof,
}

impl DecodeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodeErrorKind::Syntax => "syntax",
            DecodeErrorKind::Data => "data",
            DecodeErrorKind::Eof => "eof",
        }
    }
}

/// A failed decode. `line`/`column` are 1-based; zero means unknown.
///
/// Shape errors inside nested components usually carry no position, so
/// `path` names the failing node instead (`$`, `$.children[2]`, ...).
#[derive(Debug, Error)]
#[error("{} error {}: {message}", .kind.as_str(), self.location())]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub path: Option<String>,
    #[source]
    pub source: Option<serde_json::Error>,
}

impl DecodeError {
    pub fn data(message: impl Into<String>) -> Self {
        Self {
            kind: DecodeErrorKind::Data,
            message: message.into(),
            line: 0,
            column: 0,
            path: None,
            source: None,
        }
    }

    /// Position for display: the line/column when known, else the node path.
    pub fn location(&self) -> String {
        match &self.path {
            Some(path) if self.line == 0 => format!("at {}", path),
            _ => format!("at line {}, column {}", self.line, self.column),
        }
    }

    /// True when the failure is an unrecognized `type` tag.
    pub fn is_unknown_type(&self) -> bool {
        self.kind == DecodeErrorKind::Data && self.message.contains("unknown variant")
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let kind = match err.classify() {
            Category::Syntax | Category::Io => DecodeErrorKind::Syntax,
            Category::Data => DecodeErrorKind::Data,
            Category::Eof => DecodeErrorKind::Eof,
        };
        // serde_json appends " at line X column Y"; keep the bare message.
        let full = err.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        Self {
            kind,
            message,
            line: err.line(),
            column: err.column(),
            path: None,
            source: Some(err),
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to encode component tree: {0}")]
    Json(#[from] serde_json::Error),
}
