//! Hierarchical resource types and their display titles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    DataCategory,
    DataUse,
    DataQualifier,
    DataSubject,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::DataCategory,
        ResourceType::DataUse,
        ResourceType::DataQualifier,
        ResourceType::DataSubject,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::DataCategory => "data_category",
            ResourceType::DataUse => "data_use",
            ResourceType::DataQualifier => "data_qualifier",
            ResourceType::DataSubject => "data_subject",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "data_category" => Ok(Self::DataCategory),
            "data_use" => Ok(Self::DataUse),
            "data_qualifier" => Ok(Self::DataQualifier),
            "data_subject" => Ok(Self::DataSubject),
            _ => Err(TaxonomyError::UnknownResourceType(s.to_string())),
        }
    }
}

/// `"data_category"` -> `"Fides Data Category Hierarchy"`.
///
/// Any label is accepted, not just the known [`ResourceType`]s: underscores
/// become spaces and each word is title-cased (a letter following a non-letter
/// is upper-cased, every other letter lower-cased).
pub fn hierarchy_title(resource_type: &str) -> String {
    format!("Fides {} Hierarchy", title_case(&resource_type.replace('_', " ")))
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_follow_resource_label() {
        assert_eq!(hierarchy_title("data_category"), "Fides Data Category Hierarchy");
        assert_eq!(hierarchy_title("DATA_use"), "Fides Data Use Hierarchy");
        assert_eq!(hierarchy_title("dataset2field"), "Fides Dataset2Field Hierarchy");
    }

    #[test]
    fn parses_known_resource_types() {
        for rt in ResourceType::ALL {
            assert_eq!(rt.as_str().parse::<ResourceType>().unwrap(), rt);
        }
        assert_eq!(
            "data-use".parse::<ResourceType>().unwrap(),
            ResourceType::DataUse
        );
        assert!(matches!(
            "system".parse::<ResourceType>(),
            Err(TaxonomyError::UnknownResourceType(_))
        ));
    }
}
