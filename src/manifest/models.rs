use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Addon manifest as served on `/manifest.json`.
///
/// Only the fields a client needs to route requests are typed. Anything else
/// the author put in the document is kept in `other` and echoed back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub resources: Vec<ResourceEntry>,
    pub types: Vec<String>,
    pub catalogs: Vec<CatalogDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_prefixes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior_hints: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// One entry of `manifest.resources`.
///
/// Clients accept both `"stream"` and
/// `{"name": "stream", "types": ["movie"], "idPrefixes": ["tt"]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceEntry {
    Short(String),
    Full(ResourceDescriptor),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_prefixes: Option<Vec<String>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ResourceEntry {
    pub fn name(&self) -> &str {
        match self {
            ResourceEntry::Short(name) => name,
            ResourceEntry::Full(descriptor) => &descriptor.name,
        }
    }
}

/// Catalog offered by the addon (`manifest.catalogs[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDescriptor {
    #[serde(rename = "type")]
    pub content_type: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Extra properties the catalog understands (`genre`, `skip`, `search`...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Vec<CatalogExtra>>,
    /// Legacy form of `extra`, still read by older clients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_supported: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_required: Option<Vec<String>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogExtra {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_limit: Option<u32>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}
