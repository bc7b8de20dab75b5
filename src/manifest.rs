//! JSON documents served by the v1 registry
//!
//! These types keep every field the registry sends, so a value that is
//! decoded and encoded again comes back unchanged apart from key order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record from `/v1/repositories/<namespace>/<repo>/tags`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TagEntry {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TagEntry {
    /// Short image id this tag points at, if the registry included one
    pub fn layer(&self) -> Option<&str> {
        self.extra.get("layer").and_then(Value::as_str)
    }
}

/// One record from `/v1/repositories/<namespace>/<repo>/images`
///
/// Every field is optional. Records the registry sends without an `id` are
/// kept as they are.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ImageEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageEntry {
    pub fn checksum(&self) -> Option<&str> {
        self.extra.get("checksum").and_then(Value::as_str)
    }
}

/// Result of a tag lookup
///
/// Listing all tags yields the registry's records in registry order. Looking
/// up a single tag yields whatever that endpoint returned, without any check
/// on its shape.
#[derive(Clone, Debug, PartialEq)]
pub enum TagLookup {
    All(Vec<TagEntry>),
    Tagged(Value),
}

impl TagLookup {
    /// Number of entries, counted the way the registry's JSON is shaped
    pub fn len(&self) -> usize {
        match self {
            TagLookup::All(tags) => tags.len(),
            TagLookup::Tagged(Value::Array(items)) => items.len(),
            TagLookup::Tagged(Value::Object(fields)) => fields.len(),
            TagLookup::Tagged(Value::Null) => 0,
            TagLookup::Tagged(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-layer JSON metadata from `/v1/images/<id>/json`
///
/// This is passed through without schema validation. The accessors only
/// read a few well-known fields when they happen to be present.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Manifest(Value);

impl Manifest {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The layer's own image id
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Image id of the layer this one was built on
    pub fn parent(&self) -> Option<&str> {
        self.0.get("parent").and_then(Value::as_str)
    }
}

impl From<Value> for Manifest {
    fn from(value: Value) -> Self {
        Manifest(value)
    }
}
