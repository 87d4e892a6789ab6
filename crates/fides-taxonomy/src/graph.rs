//! Index-aligned projection of a taxonomy for the graph encodings.
//!
//! `labels[i]`, `parents[i]` and `groups[i]` all describe input record `i`.
//! Edges are `(source, target)` index pairs built from the literal
//! `parent_key -> key` references, one per non-root record.

use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;
use crate::hierarchy::{Hierarchy, IngestOptions};
use crate::record::CategoryRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges {
    pub source: Vec<usize>,
    pub target: Vec<usize>,
}

impl Edges {
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.source.iter().copied().zip(self.target.iter().copied())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedHierarchy {
    pub labels: Vec<String>,
    /// Declared parent key per record; `""` for roots.
    pub parents: Vec<String>,
    /// First dot-segment per record, for colouring.
    pub groups: Vec<String>,
    pub edges: Edges,
}

impl IndexedHierarchy {
    /// Validate with default [`IngestOptions`] and project.
    pub fn build(records: Vec<CategoryRecord>) -> Result<Self, TaxonomyError> {
        Ok(Hierarchy::ingest(records, &IngestOptions::default())?.indexed())
    }

    pub fn from_hierarchy(hierarchy: &Hierarchy) -> Self {
        let records = hierarchy.records();
        let mut out = Self {
            labels: Vec::with_capacity(records.len()),
            parents: Vec::with_capacity(records.len()),
            groups: Vec::with_capacity(records.len()),
            edges: Edges::default(),
        };
        for (i, (record, node)) in records.iter().zip(hierarchy.nodes()).enumerate() {
            out.labels.push(record.key.clone());
            out.parents
                .push(record.parent().unwrap_or_default().to_string());
            out.groups.push(record.group().to_string());
            if let Some(p) = node.parent {
                out.edges.source.push(p);
                out.edges.target.push(i);
            }
        }
        tracing::debug!(
            nodes = out.labels.len(),
            edges = out.edges.len(),
            "indexed taxonomy hierarchy"
        );
        out
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of the latest record carrying `key`, matching
    /// [`Hierarchy::index_of`] when duplicates were allowed.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.labels.iter().rposition(|l| l == key)
    }
}
