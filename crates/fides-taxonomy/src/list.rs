//! Indented textual rendering of a [`HierarchyForest`].

use crate::forest::HierarchyForest;
use crate::resource::hierarchy_title;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    /// `<h2>` header, one `<li>` per node, nested `<ul>` blocks.
    #[default]
    Html,
    /// Title line, then `- name` bullets indented two spaces per level.
    Plain,
}

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub style: ListStyle,
    /// Indent level of the top-level entries (HTML style only).
    pub indent: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            style: ListStyle::Html,
            indent: 1,
        }
    }
}

const HTML_INDENT: &str = "   ";
const PLAIN_INDENT: &str = "  ";

pub fn render_list(forest: &HierarchyForest, resource_type: &str, options: &ListOptions) -> String {
    let title = hierarchy_title(resource_type);
    let mut out = String::new();
    match options.style {
        ListStyle::Html => {
            out.push_str(&format!("<h2>{}</h2>\n", escape_html(&title)));
            out.push_str(&html_lines(forest, options.indent).join("\n"));
        }
        ListStyle::Plain => {
            out.push_str(&title);
            out.push('\n');
            plain_lines(forest, 0, &mut out);
        }
    }
    out
}

/// Every entry is followed by its `<ul>` block, leaves included; a leaf's
/// block holds a single empty line.
fn html_lines(forest: &HierarchyForest, indent: usize) -> Vec<String> {
    let spacing = HTML_INDENT.repeat(indent);
    let mut lines = Vec::with_capacity(forest.len() * 2);
    for (name, children) in forest.iter() {
        lines.push(format!("{spacing}<li>{}</li>", escape_html(name)));
        let members = html_lines(children, indent + 1).join("\n");
        lines.push(format!("{spacing}<ul>\n{members}\n{spacing}</ul>"));
    }
    lines
}

fn plain_lines(forest: &HierarchyForest, depth: usize, out: &mut String) {
    for (name, children) in forest.iter() {
        out.push_str(&format!("{}- {}\n", PLAIN_INDENT.repeat(depth), name));
        plain_lines(children, depth + 1, out);
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
