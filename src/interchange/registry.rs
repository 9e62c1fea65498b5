//! Type registry: tree kind ↔ wire tag ↔ encode/decode functions.
//!
//! The registry is an ordinary value. Build it once at start-up with
//! [`TypeRegistry::standard`] (or a [`RegistryBuilder`] for a restricted
//! set) and pass it by reference to the serializer and deserializer; it is
//! never mutated afterwards, so any number of threads may share it.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::JsonObject;
use super::deserialize::DeserializationContext;
use super::serialize::SerializationContext;
use crate::error::TreeError;
use crate::tree::{Tree, TreeKind};

/// Writes the kind-specific fields of `tree` into an object that already
/// holds `@type` and `metaData`.
pub type EncodeFn =
    fn(&SerializationContext<'_>, &Tree, &mut JsonObject) -> Result<(), TreeError>;

/// Rebuilds a tree from an object whose `@type` selected this entry.
pub type DecodeFn = fn(&mut DeserializationContext<'_>, &JsonObject) -> Result<Tree, TreeError>;

/// One registry entry.
#[derive(Clone, Copy)]
pub struct Converter {
    pub kind: TreeKind,
    pub tag: &'static str,
    pub encode: EncodeFn,
    pub decode: DecodeFn,
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("kind", &self.kind)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Write-once table of converters.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    by_tag: IndexMap<&'static str, Converter>,
    by_kind: FxHashMap<TreeKind, &'static str>,
}

impl TypeRegistry {
    /// Every tree kind with its standard wire tag.
    pub fn standard() -> Self {
        super::converters::STANDARD
            .iter()
            .fold(Self::builder(), |builder, converter| builder.register(*converter))
            .build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            registry: Self {
                by_tag: IndexMap::new(),
                by_kind: FxHashMap::default(),
            },
        }
    }

    pub fn for_kind(&self, kind: TreeKind) -> Option<&Converter> {
        let tag = self.by_kind.get(&kind)?;
        tracing::trace!(%kind, tag, "registry lookup by kind");
        self.by_tag.get(tag)
    }

    pub fn for_tag(&self, tag: &str) -> Option<&Converter> {
        tracing::trace!(tag, "registry lookup by tag");
        self.by_tag.get(tag)
    }

    /// Wire tag of `kind`, if registered.
    pub fn tag(&self, kind: TreeKind) -> Option<&'static str> {
        self.by_kind.get(&kind).copied()
    }

    /// Registered converters in registration order.
    pub fn converters(&self) -> impl Iterator<Item = &Converter> {
        self.by_tag.values()
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Collects converters before the registry is frozen.
#[derive(Debug)]
pub struct RegistryBuilder {
    registry: TypeRegistry,
}

impl RegistryBuilder {
    /// Add `converter`, replacing any entry with the same kind or tag.
    pub fn register(mut self, converter: Converter) -> Self {
        if let Some(old_tag) = self.registry.by_kind.remove(&converter.kind) {
            self.registry.by_tag.shift_remove(old_tag);
        }
        if let Some(old) = self.registry.by_tag.shift_remove(converter.tag) {
            self.registry.by_kind.remove(&old.kind);
        }
        self.registry.by_kind.insert(converter.kind, converter.tag);
        self.registry.by_tag.insert(converter.tag, converter);
        self
    }

    /// Add the standard converter for each of `kinds`.
    pub fn register_standard(self, kinds: &[TreeKind]) -> Self {
        super::converters::STANDARD
            .iter()
            .filter(|converter| kinds.contains(&converter.kind))
            .fold(self, |builder, converter| builder.register(*converter))
    }

    pub fn build(self) -> TypeRegistry {
        self.registry
    }
}
