use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Extra arguments of a resource request, keyed by argument name in the
/// order each name first appeared
pub type ExtraArgs = IndexMap<String, ExtraValue>;

/// Value of one extra argument.
///
/// An argument given once stays a plain string, an argument given several
/// times becomes a list in the order it appeared. Existing addon clients rely
/// on this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ExtraValue {
    /// First (or only) value
    pub fn first(&self) -> Option<&str> {
        match self {
            ExtraValue::Single(value) => Some(value),
            ExtraValue::Multiple(values) => values.first().map(String::as_str),
        }
    }

    /// All values, in order of occurrence
    pub fn values(&self) -> Vec<&str> {
        match self {
            ExtraValue::Single(value) => vec![value.as_str()],
            ExtraValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Input handed to a resource handler for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(rename = "extraArgs")]
    pub extra_args: Option<ExtraArgs>,
}

impl ResourceRequest {
    /// First value of an extra argument, if present
    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extra_args.as_ref()?.get(name)?.first()
    }
}

/// Parse the trailing `extra` path segment of a resource request.
///
/// The segment uses URL query syntax and is still percent-encoded. Pairs
/// with an empty value, or without `=`, do not count as an occurrence.
pub fn parse_extra_args(raw: Option<&str>) -> Option<ExtraArgs> {
    let raw = raw?;

    let mut collected: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        collected
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    Some(
        collected
            .into_iter()
            .map(|(key, mut values)| {
                let value = if values.len() == 1 {
                    ExtraValue::Single(values.remove(0))
                } else {
                    ExtraValue::Multiple(values)
                };
                (key, value)
            })
            .collect(),
    )
}
