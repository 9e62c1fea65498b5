//! Wire value → tree.
//!
//! Decoding needs the file's [`MetaDataProvider`] up front: each node only
//! stores its own address, and its tokens and comments are sliced out of
//! the provider by range. A path of field names and type tags is kept for
//! diagnostics; every failure names where it happened.

use serde_json::Value;

use super::JsonObject;
use super::address;
use super::registry::TypeRegistry;
use super::serialize::{META_DATA, TYPE};
use crate::base::{Comment, TextRange, Token, TokenKind};
use crate::error::TreeError;
use crate::tree::{Expected, MetaDataProvider, Tree, TreeMetaData};

/// Decoding state handed to each converter's decode function.
#[derive(Debug)]
pub struct DeserializationContext<'a> {
    registry: &'a TypeRegistry,
    provider: &'a MetaDataProvider,
    path: Vec<String>,
}

impl<'a> DeserializationContext<'a> {
    pub fn new(registry: &'a TypeRegistry, provider: &'a MetaDataProvider) -> Self {
        Self {
            registry,
            provider,
            path: Vec::new(),
        }
    }

    pub fn provider(&self) -> &'a MetaDataProvider {
        self.provider
    }

    pub fn push_path(&mut self, segment: impl Into<String>) {
        self.path.push(segment.into());
    }

    pub fn pop_path(&mut self) {
        self.path.pop();
    }

    /// Slash-joined path of the value being decoded.
    pub fn path(&self) -> String {
        self.path.join("/")
    }

    /// A schema violation at the current path, previewing `fragment`.
    pub fn schema_error(&self, message: impl Into<String>, fragment: &Value) -> TreeError {
        TreeError::schema(message, self.path(), fragment.to_string())
    }

    fn nested<T>(
        &mut self,
        segment: &str,
        decode: impl FnOnce(&mut Self) -> Result<T, TreeError>,
    ) -> Result<T, TreeError> {
        self.push_path(segment);
        let result = decode(self);
        self.pop_path();
        result
    }

    // ------------------------------------------------------------------------
    // Field access
    // ------------------------------------------------------------------------

    /// A field that must be present and non-null.
    pub fn required<'v>(
        &self,
        object: &'v JsonObject,
        field: &str,
    ) -> Result<&'v Value, TreeError> {
        match object.get(field) {
            None => Err(TreeError::schema(
                format!("Missing non-null value for field '{field}'"),
                self.path(),
                Value::Object(object.clone()).to_string(),
            )),
            Some(Value::Null) => Err(TreeError::schema(
                format!("Unexpected null value for field '{field}'"),
                self.path(),
                Value::Object(object.clone()).to_string(),
            )),
            Some(value) => Ok(value),
        }
    }

    /// A field that may be absent or null.
    pub fn nullable<'v>(object: &'v JsonObject, field: &str) -> Option<&'v Value> {
        object.get(field).filter(|value| !value.is_null())
    }

    pub fn field_to_string(&self, object: &JsonObject, field: &str) -> Result<String, TreeError> {
        let value = self.required(object, field)?;
        self.as_string(value, field).map(str::to_string)
    }

    pub fn field_to_nullable_string(
        &self,
        object: &JsonObject,
        field: &str,
    ) -> Result<Option<String>, TreeError> {
        Self::nullable(object, field)
            .map(|value| self.as_string(value, field).map(str::to_string))
            .transpose()
    }

    pub fn field_to_bool(&self, object: &JsonObject, field: &str) -> Result<bool, TreeError> {
        let value = self.required(object, field)?;
        value.as_bool().ok_or_else(|| {
            self.schema_error(
                format!("Expect Boolean instead of {} for field '{field}'", shape(value)),
                value,
            )
        })
    }

    /// An enum field, decoded by symbolic name.
    pub fn field_to_enum<E>(
        &self,
        object: &JsonObject,
        field: &str,
        enum_name: &str,
        from_name: fn(&str) -> Option<E>,
    ) -> Result<E, TreeError> {
        let value = self.required(object, field)?;
        let name = self.as_string(value, field)?;
        from_name(name).ok_or_else(|| {
            self.schema_error(
                format!("Illegal value for {enum_name} field '{field}': '{name}'"),
                value,
            )
        })
    }

    pub fn field_to_range(&self, object: &JsonObject, field: &str) -> Result<TextRange, TreeError> {
        let value = self.required(object, field)?;
        self.as_range(value, field)
    }

    pub fn field_to_nullable_range(
        &self,
        object: &JsonObject,
        field: &str,
    ) -> Result<Option<TextRange>, TreeError> {
        Self::nullable(object, field)
            .map(|value| self.as_range(value, field))
            .transpose()
    }

    pub fn field_to_token(&mut self, object: &JsonObject, field: &str) -> Result<Token, TreeError> {
        let value = self.required(object, field)?;
        self.nested(field, |ctx| ctx.token_from_json(value))
    }

    pub fn field_to_nullable_token(
        &mut self,
        object: &JsonObject,
        field: &str,
    ) -> Result<Option<Token>, TreeError> {
        match Self::nullable(object, field) {
            None => Ok(None),
            Some(value) => self.nested(field, |ctx| ctx.token_from_json(value)).map(Some),
        }
    }

    /// A field holding only the address of a token of this file.
    pub fn field_to_nullable_token_reference(
        &self,
        object: &JsonObject,
        field: &str,
    ) -> Result<Option<Token>, TreeError> {
        let Some(range) = self.field_to_nullable_range(object, field)? else {
            return Ok(None);
        };
        self.provider.first_token(range).cloned().map(Some).map_err(|_| {
            TreeError::unresolved(format!(
                "no token at '{}' for field '{field}' at '{}'",
                address::format(range),
                self.path()
            ))
        })
    }

    pub fn field_to_tree(
        &mut self,
        object: &JsonObject,
        field: &str,
        expected: Expected,
    ) -> Result<Tree, TreeError> {
        let value = self.required(object, field)?;
        self.nested(field, |ctx| ctx.tree_from_json(value, expected))
    }

    pub fn field_to_nullable_tree(
        &mut self,
        object: &JsonObject,
        field: &str,
        expected: Expected,
    ) -> Result<Option<Tree>, TreeError> {
        match Self::nullable(object, field) {
            None => Ok(None),
            Some(value) => self
                .nested(field, |ctx| ctx.tree_from_json(value, expected))
                .map(Some),
        }
    }

    /// A list field. Absent or null means empty.
    pub fn field_to_trees(
        &mut self,
        object: &JsonObject,
        field: &str,
        expected: Expected,
    ) -> Result<Vec<Tree>, TreeError> {
        let Some(value) = Self::nullable(object, field) else {
            return Ok(Vec::new());
        };
        let Value::Array(items) = value else {
            return Err(self.schema_error(
                format!("Expect Array instead of {} for field '{field}'", shape(value)),
                value,
            ));
        };
        self.nested(field, |ctx| {
            items
                .iter()
                .map(|item| ctx.tree_from_json(item, expected))
                .collect()
        })
    }

    // ------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------

    /// Decode a tagged object and check its kind against `expected`.
    pub fn tree_from_json(&mut self, value: &Value, expected: Expected) -> Result<Tree, TreeError> {
        let Value::Object(object) = value else {
            return Err(self.schema_error(
                format!("Expect Object instead of {}", shape(value)),
                value,
            ));
        };
        let tag = self.field_to_string(object, TYPE)?;
        let registry = self.registry;
        let converter = registry
            .for_tag(&tag)
            .ok_or_else(|| self.schema_error(format!("Invalid '{TYPE}' value '{tag}'"), value))?;
        let tree = self.nested(&tag, |ctx| (converter.decode)(ctx, object))?;
        if !expected.accepts(tree.kind()) {
            return Err(self.schema_error(
                format!("Unexpected '{}' type, expected '{expected}'", tree.kind()),
                value,
            ));
        }
        Ok(tree)
    }

    /// Metadata of the node `object` describes, resolved through the provider.
    pub fn meta_data(&self, object: &JsonObject) -> Result<TreeMetaData, TreeError> {
        let range = self.field_to_range(object, META_DATA)?;
        Ok(self.provider.meta_data(range))
    }

    pub fn token_from_json(&self, value: &Value) -> Result<Token, TreeError> {
        let object = self.as_object(value)?;
        let range = self.field_to_range(object, "textRange")?;
        let text = self.field_to_string(object, "text")?;
        let kind = match Self::nullable(object, "type") {
            None => TokenKind::Other,
            Some(_) => self.field_to_enum(object, "type", "TokenKind", TokenKind::from_name)?,
        };
        Ok(Token::new(range, text, kind))
    }

    pub fn comment_from_json(&self, value: &Value) -> Result<Comment, TreeError> {
        let object = self.as_object(value)?;
        Ok(Comment::new(
            self.field_to_range(object, "range")?,
            self.field_to_range(object, "contentRange")?,
            self.field_to_string(object, "text")?,
            self.field_to_string(object, "contentText")?,
        ))
    }

    pub fn as_object<'v>(&self, value: &'v Value) -> Result<&'v JsonObject, TreeError> {
        value.as_object().ok_or_else(|| {
            self.schema_error(format!("Expect Object instead of {}", shape(value)), value)
        })
    }

    fn as_string<'v>(&self, value: &'v Value, field: &str) -> Result<&'v str, TreeError> {
        value.as_str().ok_or_else(|| {
            self.schema_error(
                format!("Expect String instead of {} for field '{field}'", shape(value)),
                value,
            )
        })
    }

    fn as_range(&self, value: &Value, field: &str) -> Result<TextRange, TreeError> {
        address::parse(self.as_string(value, field)?).map_err(|err| self.locate(err, field))
    }

    /// Attach the current path and `field` to an address that failed to parse.
    pub fn locate(&self, err: TreeError, field: &str) -> TreeError {
        match err {
            TreeError::MalformedReference {
                reference, message, ..
            } => TreeError::MalformedReference {
                reference,
                message: format!("{message} in field '{field}'"),
                path: self.path(),
            },
            other => other,
        }
    }
}

/// JSON type name used in messages.
pub(super) fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// Decodes whole trees with a fixed registry and provider.
#[derive(Debug, Clone, Copy)]
pub struct Deserializer<'a> {
    registry: &'a TypeRegistry,
    provider: &'a MetaDataProvider,
}

impl<'a> Deserializer<'a> {
    pub fn new(registry: &'a TypeRegistry, provider: &'a MetaDataProvider) -> Self {
        Self { registry, provider }
    }

    pub fn from_value(&self, value: &Value) -> Result<Tree, TreeError> {
        DeserializationContext::new(self.registry, self.provider)
            .tree_from_json(value, Expected::Any)
    }

    pub fn from_json(&self, json: &str) -> Result<Tree, TreeError> {
        let value: Value = serde_json::from_str(json)?;
        let tree = self.from_value(&value)?;
        tracing::debug!(kind = %tree.kind(), "deserialized tree");
        Ok(tree)
    }
}
