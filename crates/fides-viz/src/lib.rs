//! Hierarchy figures for Fides taxonomies.
//!
//! One [`fides_taxonomy::IndexedHierarchy`] feeds three equivalent encodings:
//! - sunburst (tree),
//! - sankey (flow),
//! - icicle (nested rectangles).
//!
//! The combined figure carries all three over identical node/edge data with
//! exactly one visible; an update menu flips `visible` flags and nothing else.
//! Output is either a self-contained HTML document (plotly.js) or the figure
//! JSON for custom frontends.

pub mod figure;
pub mod render;
pub mod visualize;

use thiserror::Error;

pub use figure::{Figure, Trace, View};
pub use render::{build_figure, render, FigureKind, PlotlyScript, RenderMode, Rendered};
pub use visualize::{visualize_url, VisualizeType};

#[derive(Debug, Error)]
pub enum VizError {
    #[error("failed to serialize figure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown view `{0}` (expected sunburst|sankey|icicle)")]
    UnknownView(String),

    #[error("unknown visualize type `{0}` (expected sankey|sunburst|text)")]
    UnknownVisualizeType(String),

    #[error("invalid server url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}
