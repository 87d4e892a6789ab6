//! Taxonomy records as they arrive from manifests and the API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TaxonomyError;
use crate::resource::ResourceType;

/// One member of a hierarchical taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "fides_key", alias = "key")]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryRecord {
    pub fn root(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            parent_key: None,
            name: None,
            description: None,
        }
    }

    pub fn child(key: impl Into<String>, parent_key: impl Into<String>) -> Self {
        Self {
            parent_key: Some(parent_key.into()),
            ..Self::root(key)
        }
    }

    /// The declared parent, treating an empty string like an absent one.
    pub fn parent(&self) -> Option<&str> {
        self.parent_key.as_deref().filter(|p| !p.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// First dot-segment of the key; used for colouring only.
    pub fn group(&self) -> &str {
        self.key.split('.').next().unwrap_or(self.key.as_str())
    }

    /// The key minus its last dot-segment, if it has more than one.
    pub fn dot_prefix(&self) -> Option<&str> {
        self.key.rsplit_once('.').map(|(prefix, _)| prefix)
    }
}

/// Parse a JSON array of records.
///
/// Unlike plain `serde` deserialization this reports *which* record is
/// malformed, and accepts `null`/empty `parent_key` as "no parent".
pub fn parse_records(value: &Value) -> Result<Vec<CategoryRecord>, TaxonomyError> {
    let Value::Array(items) = value else {
        return Err(TaxonomyError::InvalidRecord {
            index: 0,
            reason: "expected a JSON array of records".to_string(),
        });
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect()
}

fn parse_record(index: usize, item: &Value) -> Result<CategoryRecord, TaxonomyError> {
    let invalid = |reason: &str| TaxonomyError::InvalidRecord {
        index,
        reason: reason.to_string(),
    };
    let Value::Object(obj) = item else {
        return Err(invalid("expected an object"));
    };

    let key = match obj.get("fides_key").or_else(|| obj.get("key")) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::String(_)) => return Err(invalid("`fides_key` is empty")),
        Some(Value::Null) | None => return Err(invalid("missing required `fides_key`")),
        Some(_) => return Err(invalid("`fides_key` must be a string")),
    };
    let parent_key = match obj.get("parent_key") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(invalid("`parent_key` must be a string or null")),
    };

    Ok(CategoryRecord {
        key,
        parent_key,
        name: obj.get("name").and_then(Value::as_str).map(str::to_string),
        description: obj
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Records grouped by resource type, as found in a taxonomy manifest:
///
/// ```json
/// { "data_category": [ { "fides_key": "user" }, ... ], "data_use": [ ... ] }
/// ```
///
/// Sections for non-hierarchical resources (datasets, systems, policies) are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyManifest {
    sections: HashMap<ResourceType, Vec<CategoryRecord>>,
}

impl TaxonomyManifest {
    pub fn from_value(value: &Value) -> Result<Self, TaxonomyError> {
        let Value::Object(obj) = value else {
            return Err(TaxonomyError::InvalidRecord {
                index: 0,
                reason: "expected a taxonomy manifest object".to_string(),
            });
        };
        let mut sections = HashMap::new();
        for (section, items) in obj {
            match section.parse::<ResourceType>() {
                Ok(rt) => {
                    sections.insert(rt, parse_records(items)?);
                }
                Err(_) => {
                    tracing::debug!(section = %section, "skipping non-hierarchical manifest section");
                }
            }
        }
        Ok(Self { sections })
    }

    pub fn records(&self, resource_type: ResourceType) -> &[CategoryRecord] {
        self.sections
            .get(&resource_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Accept either a bare array of records or a manifest object.
    pub fn records_for(
        value: &Value,
        resource_type: ResourceType,
    ) -> Result<Vec<CategoryRecord>, TaxonomyError> {
        match value {
            Value::Array(_) => parse_records(value),
            _ => Ok(Self::from_value(value)?.records(resource_type).to_vec()),
        }
    }
}
