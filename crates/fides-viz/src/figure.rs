//! Plotly figure model (the subset the hierarchy views use).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::VizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Sunburst,
    Sankey,
    Icicle,
}

impl View {
    /// Trace order in the combined figure.
    pub const ALL: [View; 3] = [View::Sunburst, View::Sankey, View::Icicle];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Sunburst => "sunburst",
            View::Sankey => "sankey",
            View::Icicle => "icicle",
        }
    }

    /// Button label in the view switch.
    pub fn label(self) -> &'static str {
        match self {
            View::Sunburst => "Sunburst",
            View::Sankey => "Sankey",
            View::Icicle => "Icicle",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunburst" | "tree" => Ok(Self::Sunburst),
            "sankey" | "flow" => Ok(Self::Sankey),
            "icicle" => Ok(Self::Icicle),
            other => Err(VizError::UnknownView(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// The views whose traces are currently visible.
    pub fn visible_views(&self) -> Vec<View> {
        self.data
            .iter()
            .filter(|t| t.visible())
            .map(Trace::view)
            .collect()
    }

    /// Apply one of the update-menu visibility masks, as the front end would.
    pub fn apply_visibility(&mut self, mask: &[bool]) {
        for (trace, &visible) in self.data.iter_mut().zip(mask) {
            trace.set_visible(visible);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Sunburst(HierarchyTrace),
    Sankey(SankeyTrace),
    Icicle(HierarchyTrace),
}

impl Trace {
    pub fn view(&self) -> View {
        match self {
            Trace::Sunburst(_) => View::Sunburst,
            Trace::Sankey(_) => View::Sankey,
            Trace::Icicle(_) => View::Icicle,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Trace::Sunburst(t) | Trace::Icicle(t) => t.visible,
            Trace::Sankey(t) => t.visible,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self {
            Trace::Sunburst(t) | Trace::Icicle(t) => t.visible = visible,
            Trace::Sankey(t) => t.visible = visible,
        }
    }
}

/// Sunburst and icicle share the labels/parents encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyTrace {
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyTrace {
    pub valueformat: String,
    pub valuesuffix: String,
    pub node: SankeyNode,
    pub link: SankeyLink,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyNode {
    pub pad: u32,
    pub thickness: u32,
    pub line: Line,
    pub label: Vec<String>,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub showlegend: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updatemenus: Vec<UpdateMenu>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMenu {
    pub active: usize,
    pub buttons: Vec<MenuButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuButton {
    pub label: String,
    pub method: String,
    pub args: Vec<VisibilityUpdate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityUpdate {
    pub visible: Vec<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn traces_are_tagged_by_type() {
        let trace = Trace::Icicle(HierarchyTrace {
            labels: vec!["user".to_string()],
            parents: vec![String::new()],
            marker: None,
            visible: false,
            hoverinfo: Some("skip".to_string()),
        });
        assert_eq!(
            serde_json::to_value(&trace).unwrap(),
            json!({
                "type": "icicle",
                "labels": ["user"],
                "parents": [""],
                "visible": false,
                "hoverinfo": "skip",
            })
        );
    }

    #[test]
    fn parses_view_names() {
        assert_eq!("Sankey".parse::<View>().unwrap(), View::Sankey);
        assert_eq!("tree".parse::<View>().unwrap(), View::Sunburst);
        assert!(matches!("pie".parse::<View>(), Err(VizError::UnknownView(_))));
    }
}
