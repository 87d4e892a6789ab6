//! Figure construction and output rendering.

use std::collections::HashMap;

use fides_taxonomy::{hierarchy_title, IndexedHierarchy};

use crate::figure::{
    Figure, Font, HierarchyTrace, Layout, Line, Marker, MenuButton, SankeyLink, SankeyNode,
    SankeyTrace, Title, Trace, UpdateMenu, View, VisibilityUpdate,
};
use crate::VizError;

/// plotly's default qualitative palette; groups take colours in first-seen order.
const GROUP_PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    /// All three encodings with a view switch; sunburst visible first.
    Combined,
    Single(View),
}

/// Where the HTML document gets plotly.js from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlotlyScript {
    /// A `<script src=...>` tag pointing at the public CDN (condensed output).
    #[default]
    Cdn,
    /// The plotly.js bundle text, embedded into the page.
    Inline(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    Document(PlotlyScript),
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Html(String),
    Json(String),
}

impl Rendered {
    pub fn as_str(&self) -> &str {
        match self {
            Rendered::Html(s) | Rendered::Json(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Rendered::Html(s) | Rendered::Json(s) => s,
        }
    }
}

pub fn build_figure(hierarchy: &IndexedHierarchy, resource_type: &str, kind: FigureKind) -> Figure {
    let title = Title {
        text: hierarchy_title(resource_type),
    };
    match kind {
        FigureKind::Combined => Figure {
            data: View::ALL
                .iter()
                .map(|&view| {
                    let mut trace = trace_for(hierarchy, view, false);
                    trace.set_visible(view == View::ALL[0]);
                    trace
                })
                .collect(),
            layout: Layout {
                title,
                showlegend: false,
                updatemenus: vec![view_switch()],
                font: None,
            },
        },
        FigureKind::Single(view) => Figure {
            data: vec![trace_for(hierarchy, view, true)],
            layout: Layout {
                title,
                showlegend: false,
                updatemenus: Vec::new(),
                font: Some(Font { size: 10 }),
            },
        },
    }
}

/// One button per view; each only swaps the `visible` mask.
fn view_switch() -> UpdateMenu {
    let buttons = View::ALL
        .iter()
        .map(|&view| MenuButton {
            label: view.label().to_string(),
            method: "update".to_string(),
            args: vec![VisibilityUpdate {
                visible: View::ALL.iter().map(|&v| v == view).collect(),
            }],
        })
        .collect();
    UpdateMenu { active: 0, buttons }
}

fn trace_for(hierarchy: &IndexedHierarchy, view: View, single: bool) -> Trace {
    // The combined figure turns hover off on every trace.
    let hoverinfo = (!single).then(|| "skip".to_string());
    match view {
        View::Sunburst => Trace::Sunburst(HierarchyTrace {
            labels: hierarchy.labels.clone(),
            parents: hierarchy.parents.clone(),
            marker: single.then(|| group_marker(&hierarchy.groups)),
            visible: true,
            hoverinfo,
        }),
        View::Icicle => Trace::Icicle(HierarchyTrace {
            labels: hierarchy.labels.clone(),
            parents: hierarchy.parents.clone(),
            marker: None,
            visible: true,
            hoverinfo,
        }),
        View::Sankey => Trace::Sankey(SankeyTrace {
            valueformat: ".1f".to_string(),
            valuesuffix: "%".to_string(),
            node: SankeyNode {
                pad: 15,
                thickness: 20,
                line: Line {
                    color: "black".to_string(),
                    width: 0.5,
                },
                label: hierarchy.labels.clone(),
                color: "blue".to_string(),
                hovertemplate: single.then(|| "%{label}".to_string()),
            },
            link: SankeyLink {
                source: hierarchy.edges.source.clone(),
                target: hierarchy.edges.target.clone(),
                value: hierarchy.edges.target.clone(),
            },
            visible: true,
            hoverinfo,
        }),
    }
}

fn group_marker(groups: &[String]) -> Marker {
    let mut assigned: HashMap<&str, &str> = HashMap::new();
    let colors = groups
        .iter()
        .map(|g| {
            let next = GROUP_PALETTE[assigned.len() % GROUP_PALETTE.len()];
            assigned.entry(g.as_str()).or_insert(next).to_string()
        })
        .collect();
    Marker { colors }
}

pub fn render(
    hierarchy: &IndexedHierarchy,
    resource_type: &str,
    kind: FigureKind,
    mode: &RenderMode,
) -> Result<Rendered, VizError> {
    let figure = build_figure(hierarchy, resource_type, kind);
    tracing::debug!(
        traces = figure.data.len(),
        nodes = hierarchy.len(),
        edges = hierarchy.edges.len(),
        ?kind,
        "built hierarchy figure"
    );
    match mode {
        RenderMode::Json => Ok(Rendered::Json(render_json(&figure)?)),
        RenderMode::Document(script) => Ok(Rendered::Html(render_html(&figure, script)?)),
    }
}

pub fn render_json(figure: &Figure) -> Result<String, VizError> {
    Ok(serde_json::to_string(figure)?)
}

pub fn render_html(figure: &Figure, script: &PlotlyScript) -> Result<String, VizError> {
    // `</` is escaped so label text can never close the <script> element.
    let json = serde_json::to_string(figure)?.replace("</", "<\\/");
    let script_tag = match script {
        PlotlyScript::Cdn => {
            format!(r#"<script src="{PLOTLY_CDN}" charset="utf-8"></script>"#)
        }
        PlotlyScript::Inline(bundle) => format!(
            "<script type=\"text/javascript\">{}</script>",
            bundle.replace("</script", "<\\/script")
        ),
    };

    let template = include_str!("../templates/hierarchy.html");
    let mut html = template.to_string();
    html = html.replace("{{TITLE}}", &escape_html(&figure.layout.title.text));
    html = html.replace("{{FIGURE_JSON}}", &json);
    html = html.replace("{{PLOTLY_SCRIPT}}", &script_tag);
    Ok(html)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
