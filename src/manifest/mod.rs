//! Stremio addon manifest: typed model and validation.
//!
//! A [`Manifest`] can only be obtained through [`Manifest::from_value`] or
//! [`Manifest::from_json`], which run [`validate`] on the raw document before
//! deserializing it. Holding a `Manifest` therefore means holding a document
//! that passed validation and fits in [`MAX_MANIFEST_BYTES`].
//!
//! ```
//! use serde_json::json;
//! use stremio_addon::manifest::Manifest;
//!
//! let manifest = Manifest::from_value(json!({
//!     "id": "org.example.addon",
//!     "version": "1.0.0",
//!     "name": "Example",
//!     "resources": ["stream"],
//!     "types": ["movie"],
//!     "catalogs": []
//! }))
//! .unwrap();
//!
//! assert_eq!(manifest.resource_names().collect::<Vec<_>>(), ["stream"]);
//! ```

mod models;
mod validation;

pub use models::{CatalogDescriptor, CatalogExtra, Manifest, ResourceDescriptor, ResourceEntry};
pub use validation::{MAX_MANIFEST_BYTES, ManifestError, validate};

use serde_json::Value;

impl Manifest {
    /// Validate a raw document and convert it into a typed manifest
    pub fn from_value(value: Value) -> Result<Self, ManifestError> {
        validate(&value)?;
        serde_json::from_value(value).map_err(ManifestError::Schema)
    }

    /// Parse, validate and convert a JSON manifest
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Names of the declared resources, in declaration order
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(ResourceEntry::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_rejects_invalid_document() {
        let result = Manifest::from_value(json!({"id": "x", "version": "1.0"}));
        assert!(matches!(result, Err(ManifestError::MissingField(_))));
    }

    #[test]
    fn test_from_json_reports_syntax_errors() {
        let result = Manifest::from_json("{\"id\": ");
        assert!(matches!(result, Err(ManifestError::Json(_))));
    }

    #[test]
    fn test_resource_names_mixes_both_forms() {
        let manifest = Manifest::from_value(json!({
            "id": "x",
            "version": "1.0",
            "name": "t",
            "resources": ["catalog", {"name": "meta", "types": ["movie"]}, "stream"],
            "types": ["movie"],
            "catalogs": [{"type": "movie", "id": "top"}]
        }))
        .unwrap();

        let names: Vec<&str> = manifest.resource_names().collect();
        assert_eq!(names, ["catalog", "meta", "stream"]);
        assert_eq!(manifest.catalogs[0].content_type, "movie");
    }

    #[test]
    fn test_from_value_reports_field_errors_inside_catalog_extra() {
        let result = Manifest::from_value(json!({
            "id": "x",
            "version": "1.0",
            "name": "t",
            "resources": ["catalog"],
            "types": ["movie"],
            "catalogs": [{"type": "movie", "id": "top", "extra": [{"isRequired": true}]}]
        }));

        match result {
            Err(ManifestError::MissingField(field)) => {
                assert_eq!(field, "catalogs[0].extra[0].name");
            }
            other => panic!("expected a missing extra name, got {other:?}"),
        }
    }

    #[test]
    fn test_validated_document_converts() {
        let raw = json!({
            "id": "org.example",
            "version": "1.0.0",
            "name": "Example",
            "description": null,
            "logo": "https://example.com/logo.png",
            "idPrefixes": ["tt"],
            "resources": ["catalog", {"name": "meta", "types": ["movie"], "idPrefixes": ["tt"]}],
            "types": ["movie"],
            "catalogs": [{
                "type": "movie",
                "id": "top",
                "name": "Top",
                "extraSupported": ["genre"],
                "extra": [{"name": "genre", "isRequired": false, "options": ["Drama"], "optionsLimit": 1}]
            }],
            "behaviorHints": {"configurable": true}
        });

        assert!(validate(&raw).is_ok());
        let manifest = Manifest::from_value(raw).unwrap();
        let extra = &manifest.catalogs[0].extra.as_ref().unwrap()[0];
        assert_eq!(extra.options_limit, Some(1));
        assert_eq!(manifest.description, None);
    }
}
