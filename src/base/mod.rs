//! Foundation types for gentree.
//!
//! This module provides the lexical primitives every front-end produces:
//! - [`TextPointer`], [`TextRange`] - line/column positions and spans
//! - [`Token`], [`TokenKind`] - lexical units
//! - [`Comment`], [`Annotation`] - trivia and annotations attached by range
//!
//! This module has NO dependencies on other gentree modules.

mod position;
mod symbolic;
mod token;

pub(crate) use symbolic::symbolic_enum;

pub use position::{TextPointer, TextRange};
pub use token::{Annotation, Comment, Token, TokenKind};
