//! Links to the visualization pages served by the Fides web front end.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::VizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizeType {
    Sankey,
    Sunburst,
    Text,
}

impl VisualizeType {
    pub fn as_str(self) -> &'static str {
        match self {
            VisualizeType::Sankey => "sankey",
            VisualizeType::Sunburst => "sunburst",
            VisualizeType::Text => "text",
        }
    }
}

impl fmt::Display for VisualizeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualizeType {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sankey" => Ok(Self::Sankey),
            "sunburst" => Ok(Self::Sunburst),
            "text" => Ok(Self::Text),
            other => Err(VizError::UnknownVisualizeType(other.to_string())),
        }
    }
}

pub fn parse_server_url(s: &str) -> Result<Url, VizError> {
    Url::parse(s.trim()).map_err(|e| VizError::InvalidUrl {
        url: s.to_string(),
        reason: e.to_string(),
    })
}

/// `{server_url}/{resource_type}/visualize/{visualize_type}`
///
/// Any path already on `server_url` is kept (a trailing slash is ignored).
pub fn visualize_url(
    server_url: &Url,
    resource_type: &str,
    kind: VisualizeType,
) -> Result<Url, VizError> {
    let mut url = server_url.clone();
    url.path_segments_mut()
        .map_err(|()| VizError::InvalidUrl {
            url: server_url.to_string(),
            reason: "cannot be used as a base".to_string(),
        })?
        .pop_if_empty()
        .push(resource_type)
        .push("visualize")
        .push(kind.as_str());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_visualize_url_from_explicit_server() {
        let base = parse_server_url("http://localhost:8080").unwrap();
        let url = visualize_url(&base, "data_category", VisualizeType::Sankey).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/data_category/visualize/sankey");
    }

    #[test]
    fn keeps_base_path_and_ignores_trailing_slash() {
        let base = parse_server_url("https://fides.example.com/api/").unwrap();
        let url = visualize_url(&base, "data_use", VisualizeType::Text).unwrap();
        assert_eq!(url.as_str(), "https://fides.example.com/api/data_use/visualize/text");
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            parse_server_url("not a url"),
            Err(VizError::InvalidUrl { .. })
        ));
        let mailto = Url::parse("mailto:someone@example.com").unwrap();
        assert!(visualize_url(&mailto, "data_use", VisualizeType::Text).is_err());
        assert!(matches!(
            "graph".parse::<VisualizeType>(),
            Err(VizError::UnknownVisualizeType(_))
        ));
    }
}
