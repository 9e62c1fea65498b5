//! Range-addressed persistence of syntax trees.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────────────┐
//! │     Tree     │───▶│    Serializer    │───▶│  {"@type": ...}      │
//! └──────────────┘    └────────┬─────────┘    └──────────┬───────────┘
//!        ▲                     │ TypeRegistry             │
//!        │            ┌────────▼─────────┐                │
//!        └────────────│   Deserializer   │◀───────────────┘
//!                     │ + MetaDataProvider│
//!                     └──────────────────┘
//! ```
//!
//! Nodes reference each other and their tokens by range address
//! (`"line:col:endLine:endCol"`), never by identity, so the same tree
//! always produces the same bytes.
//!
//! ## Usage
//!
//! ```ignore
//! use gentree::interchange::{JsonTree, TypeRegistry};
//!
//! let registry = TypeRegistry::standard();
//! let json = JsonTree::new(&registry).to_json(&tree, &provider)?;
//! let file = JsonTree::new(&registry).from_json(&json)?;
//! assert_eq!(file.tree, tree);
//! ```

pub mod address;
mod converters;
mod deserialize;
mod json_tree;
mod registry;
mod serialize;

pub use deserialize::{DeserializationContext, Deserializer};
pub use json_tree::{JsonTree, TreeFile};
pub use registry::{Converter, DecodeFn, EncodeFn, RegistryBuilder, TypeRegistry};
pub use serialize::{
    SerializationContext, Serializer, comment_to_json, nullable_token_to_json, token_to_json,
};

/// A JSON object, keys in insertion order.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
