//! # gentree
//!
//! Language-agnostic syntax trees for multi-language static analysis:
//! the tree model every front-end lowers into, its range-addressed JSON
//! persistence, and a validator that checks a tree against its source.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! validate     → Structural consistency checks against source text
//!   ↓
//! interchange  → Range-address codec, type registry, JSON (de)serializer
//!   ↓
//! tree         → Tree sum type, node kinds, metadata, MetaDataProvider
//!   ↓
//! base         → Primitives (TextPointer, TextRange, Token, Comment)
//! ```
//!
//! [`error::TreeError`] is the single error type shared by every layer.

// ============================================================================
// MODULES (dependency order: base → tree → interchange → validate)
// ============================================================================

/// Foundation types: positions, ranges, tokens, comments, annotations
pub mod base;

/// Error taxonomy shared by persistence and validation
pub mod error;

/// Generic syntax tree: node kinds and per-node metadata
pub mod tree;

/// Persistence: range addresses, type registry, JSON documents
pub mod interchange;

/// Structural consistency validator
pub mod validate;

// Re-export foundation types
pub use base::{Annotation, Comment, TextPointer, TextRange, Token, TokenKind};
pub use error::TreeError;
pub use tree::{Expected, MetaDataProvider, Tree, TreeKind, TreeMetaData};
