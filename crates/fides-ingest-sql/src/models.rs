//! Dataset resource models (dataset -> collection -> field).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_QUALIFIER: &str =
    "aggregated.anonymized.unlinked_pseudonymized.pseudonymized.identified";
pub const DEFAULT_ORGANIZATION: &str = "default_organization";

fn default_data_qualifier() -> String {
    DEFAULT_DATA_QUALIFIER.to_string()
}

fn default_organization() -> String {
    DEFAULT_ORGANIZATION.to_string()
}

/// A column, nested within a [`DatasetCollection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub data_categories: Vec<String>,
    #[serde(default = "default_data_qualifier")]
    pub data_qualifier: String,
}

/// A table, nested within a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCollection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub data_categories: Vec<String>,
    #[serde(default = "default_data_qualifier")]
    pub data_qualifier: String,
    pub fields: Vec<DatasetField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub fides_key: String,
    #[serde(default = "default_organization")]
    pub organization_fides_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub data_categories: Vec<String>,
    #[serde(default = "default_data_qualifier")]
    pub data_qualifier: String,
    pub collections: Vec<DatasetCollection>,
}

impl DatasetField {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            data_categories: Vec::new(),
            data_qualifier: default_data_qualifier(),
        }
    }
}

impl DatasetCollection {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        fields: Vec<DatasetField>,
    ) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            data_categories: Vec::new(),
            data_qualifier: default_data_qualifier(),
            fields,
        }
    }
}

impl Dataset {
    /// A dataset whose `fides_key` and `name` are both `key`.
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        collections: Vec<DatasetCollection>,
    ) -> Self {
        let key = key.into();
        Self {
            name: Some(key.clone()),
            fides_key: key,
            organization_fides_key: default_organization(),
            description: Some(description.into()),
            meta: None,
            data_categories: Vec::new(),
            data_qualifier: default_data_qualifier(),
            collections,
        }
    }
}
