//! Whole-file documents: the per-file token/comment lists plus the tree.
//!
//! ```json
//! {
//!   "treeMetaData": {
//!     "comments": [
//!       {"text": "// c", "contentText": " c", "range": "1:0::4", "contentRange": "1:2::4"}
//!     ],
//!     "tokens": [{"textRange": "2:0::1", "text": "x"}]
//!   },
//!   "tree": {"@type": "TopLevel", "metaData": "1:0:2:1", ...}
//! }
//! ```
//!
//! The `treeMetaData` section is decoded first so that every node's
//! metadata can be resolved before the tree exists.

use serde_json::{Value, json};

use super::JsonObject;
use super::address;
use super::deserialize::{DeserializationContext, shape};
use super::registry::TypeRegistry;
use super::serialize::{SerializationContext, comment_to_json, token_to_json};
use crate::base::{Annotation, TextRange};
use crate::error::TreeError;
use crate::tree::{Expected, MetaDataProvider, Tree};

const TREE_META_DATA: &str = "treeMetaData";
const TREE: &str = "tree";
const TOKENS: &str = "tokens";
const COMMENTS: &str = "comments";
const ANNOTATIONS: &str = "annotations";

/// A decoded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    pub tree: Tree,
    pub provider: MetaDataProvider,
}

/// Reads and writes whole-file documents with a fixed registry.
#[derive(Debug, Clone, Copy)]
pub struct JsonTree<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> JsonTree<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn to_value(&self, tree: &Tree, provider: &MetaDataProvider) -> Result<Value, TreeError> {
        let mut meta = JsonObject::new();
        meta.insert(
            COMMENTS.to_string(),
            Value::Array(provider.comments().iter().map(comment_to_json).collect()),
        );
        meta.insert(
            TOKENS.to_string(),
            Value::Array(provider.tokens().iter().map(token_to_json).collect()),
        );
        if !provider.annotations().is_empty() {
            meta.insert(
                ANNOTATIONS.to_string(),
                Value::Array(provider.annotations().iter().map(annotation_to_json).collect()),
            );
        }

        let mut document = JsonObject::new();
        document.insert(TREE_META_DATA.to_string(), Value::Object(meta));
        document.insert(
            TREE.to_string(),
            SerializationContext::new(self.registry).tree_to_json(tree)?,
        );
        Ok(Value::Object(document))
    }

    /// Compact JSON text of the document.
    pub fn to_json(&self, tree: &Tree, provider: &MetaDataProvider) -> Result<String, TreeError> {
        let value = self.to_value(tree, provider)?;
        tracing::debug!(
            tokens = provider.tokens().len(),
            comments = provider.comments().len(),
            "serialized tree document"
        );
        Ok(serde_json::to_string(&value)?)
    }

    pub fn from_value(&self, value: &Value) -> Result<TreeFile, TreeError> {
        let provider = self.provider_from_json(value)?;
        let document = value.as_object().ok_or_else(|| {
            TreeError::schema("Expect Object for tree document", "", value.to_string())
        })?;
        let mut ctx = DeserializationContext::new(self.registry, &provider);
        let tree = ctx.field_to_tree(document, TREE, Expected::Any)?;
        Ok(TreeFile { tree, provider })
    }

    pub fn from_json(&self, json: &str) -> Result<TreeFile, TreeError> {
        let value: Value = serde_json::from_str(json)?;
        let file = self.from_value(&value)?;
        tracing::debug!(
            tokens = file.provider.tokens().len(),
            nodes = file.tree.descendants().count(),
            "deserialized tree document"
        );
        Ok(file)
    }

    fn provider_from_json(&self, value: &Value) -> Result<MetaDataProvider, TreeError> {
        let empty = MetaDataProvider::new(Vec::new(), Vec::new(), Vec::new());
        let mut ctx = DeserializationContext::new(self.registry, &empty);
        let document = ctx.as_object(value)?;
        let meta = ctx.as_object(ctx.required(document, TREE_META_DATA)?)?;
        ctx.push_path(TREE_META_DATA);

        let tokens = list(&ctx, meta, TOKENS)?
            .iter()
            .map(|token| ctx.token_from_json(token))
            .collect::<Result<Vec<_>, _>>()?;
        let comments = list(&ctx, meta, COMMENTS)?
            .iter()
            .map(|comment| ctx.comment_from_json(comment))
            .collect::<Result<Vec<_>, _>>()?;
        let annotations = list(&ctx, meta, ANNOTATIONS)?
            .iter()
            .map(|annotation| annotation_from_json(&ctx, annotation))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MetaDataProvider::new(tokens, comments, annotations))
    }
}

fn list<'v>(
    ctx: &DeserializationContext<'_>,
    object: &'v JsonObject,
    field: &str,
) -> Result<&'v [Value], TreeError> {
    match DeserializationContext::nullable(object, field) {
        None => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(ctx.schema_error(
            format!("Expect Array instead of {} for field '{field}'", shape(other)),
            other,
        )),
    }
}

fn annotation_to_json(annotation: &Annotation) -> Value {
    json!({
        "shortName": &*annotation.short_name,
        "argumentsText": annotation.argument_texts.iter().map(|a| &**a).collect::<Vec<&str>>(),
        "range": address::format(annotation.range),
    })
}

fn annotation_from_json(
    ctx: &DeserializationContext<'_>,
    value: &Value,
) -> Result<Annotation, TreeError> {
    let object = ctx.as_object(value)?;
    let short_name = ctx.field_to_string(object, "shortName")?;
    let range: TextRange = ctx.field_to_range(object, "range")?;
    let arguments = list(ctx, object, "argumentsText")?
        .iter()
        .map(|argument| {
            argument.as_str().map(Into::into).ok_or_else(|| {
                ctx.schema_error("Expect String for field 'argumentsText'", argument)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Annotation::new(short_name, arguments, range))
}
