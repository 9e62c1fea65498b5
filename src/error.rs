//! Error types shared by the addressing, interchange and validation layers.

use thiserror::Error;

use crate::tree::TreeKind;
use crate::validate::Violation;

/// Longest fragment preview embedded in a schema violation.
pub const FRAGMENT_PREVIEW_LEN: usize = 80;

/// Errors that can occur while resolving, persisting or certifying a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A range-address string does not split into four numeric fields.
    /// `path` is empty when the address was parsed outside a document.
    #[error("Malformed reference '{}'{}: {}", .reference, location(.path), .message)]
    MalformedReference {
        reference: String,
        message: String,
        path: String,
    },

    /// The address parses, but no token or node occupies it.
    #[error("Unresolved reference: {message}")]
    UnresolvedReference { message: String },

    /// The wire value does not have the shape the decoder expects.
    #[error("{message} at '{path}': {fragment}")]
    SchemaViolation {
        message: String,
        path: String,
        fragment: String,
    },

    /// A parsed tree breaks one of the structural invariants.
    #[error("{0}")]
    StructuralViolation(Box<Violation>),

    /// Encoding was requested for a kind the registry does not know.
    #[error("Unsupported tree kind: {kind}")]
    UnsupportedVariant { kind: TreeKind },

    /// The input is not JSON at all.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TreeError {
    pub fn malformed(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedReference {
            reference: reference.into(),
            message: message.into(),
            path: String::new(),
        }
    }

    pub fn unresolved(message: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            message: message.into(),
        }
    }

    /// Create a schema violation, truncating the fragment preview.
    pub fn schema(
        message: impl Into<String>,
        path: impl Into<String>,
        fragment: impl AsRef<str>,
    ) -> Self {
        Self::SchemaViolation {
            message: message.into(),
            path: path.into(),
            fragment: preview(fragment.as_ref()),
        }
    }

    pub fn structural(violation: Violation) -> Self {
        Self::StructuralViolation(Box::new(violation))
    }

    pub fn unsupported(kind: TreeKind) -> Self {
        Self::UnsupportedVariant { kind }
    }
}

fn location(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at '{path}'")
    }
}

/// Shorten `text` to at most [`FRAGMENT_PREVIEW_LEN`] characters.
pub fn preview(text: &str) -> String {
    if text.chars().count() <= FRAGMENT_PREVIEW_LEN {
        return text.to_string();
    }
    let mut out: String = text.chars().take(FRAGMENT_PREVIEW_LEN - 3).collect();
    out.push_str("...");
    out
}
