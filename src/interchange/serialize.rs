//! Tree → wire value.
//!
//! Every node becomes `{"@type": tag, "metaData": address, ...fields}`.
//! Output is deterministic: the same tree always produces the same bytes.

use serde_json::{Value, json};

use super::JsonObject;
use super::address;
use super::registry::TypeRegistry;
use crate::base::{Comment, TextRange, Token, TokenKind};
use crate::error::TreeError;
use crate::tree::Tree;

pub const TYPE: &str = "@type";
pub const META_DATA: &str = "metaData";

/// Helpers handed to each converter's encode function.
#[derive(Debug, Clone, Copy)]
pub struct SerializationContext<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> SerializationContext<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Encode a node and, recursively, everything it owns.
    pub fn tree_to_json(&self, tree: &Tree) -> Result<Value, TreeError> {
        let kind = tree.kind();
        let converter = self
            .registry
            .for_kind(kind)
            .ok_or_else(|| TreeError::unsupported(kind))?;
        let mut object = JsonObject::new();
        object.insert(TYPE.to_string(), json!(converter.tag));
        object.insert(META_DATA.to_string(), json!(address::tree_reference(tree)));
        (converter.encode)(self, tree, &mut object)?;
        Ok(Value::Object(object))
    }

    pub fn nullable_tree_to_json(&self, tree: Option<&Tree>) -> Result<Value, TreeError> {
        tree.map_or(Ok(Value::Null), |tree| self.tree_to_json(tree))
    }

    /// Encode a list, preserving source order.
    pub fn trees_to_json(&self, trees: &[Tree]) -> Result<Value, TreeError> {
        trees
            .iter()
            .map(|tree| self.tree_to_json(tree))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

/// `{"textRange", "text", "type"?}`; `type` is left out for [`TokenKind::Other`].
pub fn token_to_json(token: &Token) -> Value {
    let mut object = JsonObject::new();
    object.insert("textRange".to_string(), json!(address::token_reference(token)));
    object.insert("text".to_string(), json!(token.text()));
    if token.kind != TokenKind::Other {
        object.insert("type".to_string(), json!(token.kind.as_str()));
    }
    Value::Object(object)
}

pub fn nullable_token_to_json(token: Option<&Token>) -> Value {
    token.map_or(Value::Null, token_to_json)
}

/// `{"text", "contentText", "range", "contentRange"}`.
pub fn comment_to_json(comment: &Comment) -> Value {
    json!({
        "text": &*comment.text,
        "contentText": &*comment.content_text,
        "range": address::format(comment.range),
        "contentRange": address::format(comment.content_range),
    })
}

pub fn nullable_range_to_json(range: Option<TextRange>) -> Value {
    range.map_or(Value::Null, |range| json!(address::format(range)))
}

/// Encodes whole trees with a fixed registry.
#[derive(Debug, Clone, Copy)]
pub struct Serializer<'a> {
    context: SerializationContext<'a>,
}

impl<'a> Serializer<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            context: SerializationContext::new(registry),
        }
    }

    pub fn to_value(&self, tree: &Tree) -> Result<Value, TreeError> {
        self.context.tree_to_json(tree)
    }

    /// Compact JSON text of `tree`.
    pub fn to_json(&self, tree: &Tree) -> Result<String, TreeError> {
        let value = self.to_value(tree)?;
        tracing::debug!(kind = %tree.kind(), "serialized tree");
        Ok(serde_json::to_string(&value)?)
    }
}
