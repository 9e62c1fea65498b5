//! Lexical items shared by every front-end: tokens, comments, annotations.

use std::sync::Arc;

use super::position::TextRange;
use super::symbolic::symbolic_enum;

symbolic_enum! {
    /// Lexical category of a token. Front-ends only distinguish what the
    /// validator and downstream checks care about.
    #[derive(Default)]
    pub enum TokenKind {
        Keyword => "KEYWORD",
        StringLiteral => "STRING_LITERAL",
        #[default]
        Other => "OTHER",
    }
}

/// Minimal lexical unit with a range, raw text and kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub range: TextRange,
    pub text: Arc<str>,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(range: TextRange, text: impl Into<Arc<str>>, kind: TokenKind) -> Self {
        Self {
            range,
            text: text.into(),
            kind,
        }
    }

    /// A token of the default kind.
    pub fn other(range: TextRange, text: impl Into<Arc<str>>) -> Self {
        Self::new(range, text, TokenKind::Other)
    }

    pub fn keyword(range: TextRange, text: impl Into<Arc<str>>) -> Self {
        Self::new(range, text, TokenKind::Keyword)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A source comment. `range` covers the delimiters, `content_range` only
/// the text between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub range: TextRange,
    pub content_range: TextRange,
    pub text: Arc<str>,
    pub content_text: Arc<str>,
}

impl Comment {
    pub fn new(
        range: TextRange,
        content_range: TextRange,
        text: impl Into<Arc<str>>,
        content_text: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            range,
            content_range,
            text: text.into(),
            content_text: content_text.into(),
        }
    }
}

/// A language-level annotation (`@Foo(bar)`, `#[foo]`) attached to the
/// node that contains its range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub short_name: Arc<str>,
    pub argument_texts: Vec<Arc<str>>,
    pub range: TextRange,
}

impl Annotation {
    pub fn new(
        short_name: impl Into<Arc<str>>,
        argument_texts: Vec<Arc<str>>,
        range: TextRange,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            argument_texts,
            range,
        }
    }
}
