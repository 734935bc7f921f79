use serde_json::{Map, Value};
use thiserror::Error;

/// Largest manifest the addon collection API accepts, in serialized bytes.
pub const MAX_MANIFEST_BYTES: usize = 8192;

const REQUIRED_STRINGS: [&str; 3] = ["id", "version", "name"];
const OPTIONAL_STRINGS: [&str; 4] = ["description", "logo", "background", "contactEmail"];

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest must be a JSON object")]
    NotAnObject,
    #[error("manifest is missing required field '{0}'")]
    MissingField(String),
    #[error("manifest field '{field}' must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },
    #[error(
        "manifest serializes to {size} bytes, over the {limit} byte limit of the addonCollection API"
    )]
    OversizedManifest { size: usize, limit: usize },
    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A document that passed [`validate`] but still does not fit the typed
    /// [`Manifest`](super::Manifest)
    #[error("manifest does not match the manifest format: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Check a raw manifest document.
///
/// Every field the typed [`Manifest`](super::Manifest) reads is checked here,
/// so a document accepted by `validate` also converts. Structural checks run
/// before the size check so a broken document reports what is wrong with it
/// rather than how big it is.
pub fn validate(manifest: &Value) -> Result<(), ManifestError> {
    let object = manifest.as_object().ok_or(ManifestError::NotAnObject)?;

    for field in REQUIRED_STRINGS {
        required_string(object, "", field)?;
    }
    for field in OPTIONAL_STRINGS {
        optional_string(object, "", field)?;
    }
    optional_string_array(object, "", "idPrefixes")?;

    validate_resources(object)?;
    validate_types(object)?;
    validate_catalogs(object)?;
    validate_size(manifest)?;

    Ok(())
}

fn validate_resources(object: &Map<String, Value>) -> Result<(), ManifestError> {
    let resources = required_array(object, "resources")?;

    for (index, resource) in resources.iter().enumerate() {
        match resource {
            Value::String(_) => {}
            Value::Object(descriptor) => {
                let prefix = format!("resources[{index}].");
                required_string(descriptor, &prefix, "name")?;
                optional_string_array(descriptor, &prefix, "types")?;
                optional_string_array(descriptor, &prefix, "idPrefixes")?;
            }
            _ => {
                return Err(invalid(
                    format!("resources[{index}]"),
                    "a resource name or an object with a name",
                ));
            }
        }
    }

    Ok(())
}

fn validate_types(object: &Map<String, Value>) -> Result<(), ManifestError> {
    let types = required_array(object, "types")?;

    if let Some(index) = types.iter().position(|value| !value.is_string()) {
        return Err(invalid(format!("types[{index}]"), "a string"));
    }

    Ok(())
}

fn validate_catalogs(object: &Map<String, Value>) -> Result<(), ManifestError> {
    let catalogs = required_array(object, "catalogs")?;

    for (index, catalog) in catalogs.iter().enumerate() {
        let catalog = catalog
            .as_object()
            .ok_or_else(|| invalid(format!("catalogs[{index}]"), "an object"))?;

        let prefix = format!("catalogs[{index}].");
        required_string(catalog, &prefix, "type")?;
        required_string(catalog, &prefix, "id")?;
        optional_string(catalog, &prefix, "name")?;
        optional_string_array(catalog, &prefix, "extraSupported")?;
        optional_string_array(catalog, &prefix, "extraRequired")?;
        validate_catalog_extra(catalog, &prefix)?;
    }

    Ok(())
}

fn validate_catalog_extra(catalog: &Map<String, Value>, prefix: &str) -> Result<(), ManifestError> {
    let extras = match catalog.get("extra") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(extras)) => extras,
        Some(_) => return Err(invalid(format!("{prefix}extra"), "an array")),
    };

    for (index, extra) in extras.iter().enumerate() {
        let path = format!("{prefix}extra[{index}]");
        let extra = extra
            .as_object()
            .ok_or_else(|| invalid(path.clone(), "an object"))?;

        let prefix = format!("{path}.");
        required_string(extra, &prefix, "name")?;
        optional_string_array(extra, &prefix, "options")?;

        match extra.get("isRequired") {
            None | Some(Value::Null | Value::Bool(_)) => {}
            Some(_) => return Err(invalid(format!("{prefix}isRequired"), "a boolean")),
        }
        match extra.get("optionsLimit") {
            None | Some(Value::Null) => {}
            Some(Value::Number(limit))
                if limit.as_u64().is_some_and(|limit| u32::try_from(limit).is_ok()) => {}
            Some(_) => {
                return Err(invalid(
                    format!("{prefix}optionsLimit"),
                    "a non-negative integer",
                ));
            }
        }
    }

    Ok(())
}

fn validate_size(manifest: &Value) -> Result<(), ManifestError> {
    let size = serde_json::to_vec(manifest)?.len();
    if size > MAX_MANIFEST_BYTES {
        return Err(ManifestError::OversizedManifest {
            size,
            limit: MAX_MANIFEST_BYTES,
        });
    }
    Ok(())
}

fn required_array<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, ManifestError> {
    match object.get(field) {
        None => Err(ManifestError::MissingField(field.to_string())),
        Some(Value::Array(values)) => Ok(values),
        Some(_) => Err(invalid(field, "an array")),
    }
}

fn required_string(
    object: &Map<String, Value>,
    prefix: &str,
    field: &str,
) -> Result<(), ManifestError> {
    match object.get(field) {
        None => Err(ManifestError::MissingField(format!("{prefix}{field}"))),
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(invalid(format!("{prefix}{field}"), "a string")),
    }
}

/// Absent and `null` are both accepted for optional fields
fn optional_string(
    object: &Map<String, Value>,
    prefix: &str,
    field: &str,
) -> Result<(), ManifestError> {
    match object.get(field) {
        None | Some(Value::Null | Value::String(_)) => Ok(()),
        Some(_) => Err(invalid(format!("{prefix}{field}"), "a string")),
    }
}

fn optional_string_array(
    object: &Map<String, Value>,
    prefix: &str,
    field: &str,
) -> Result<(), ManifestError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(values)) => match values.iter().position(|value| !value.is_string()) {
            Some(index) => Err(invalid(format!("{prefix}{field}[{index}]"), "a string")),
            None => Ok(()),
        },
        Some(_) => Err(invalid(format!("{prefix}{field}"), "an array of strings")),
    }
}

fn invalid(field: impl Into<String>, expected: &'static str) -> ManifestError {
    ManifestError::InvalidField {
        field: field.into(),
        expected,
    }
}
