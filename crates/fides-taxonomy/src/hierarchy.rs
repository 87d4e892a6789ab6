//! Validated ingestion of taxonomy records.
//!
//! Every projection (forest, indexed graph, list) is built from a
//! [`Hierarchy`], so structural validation happens exactly once:
//!
//! - keys must be well-formed fides keys,
//! - a `parent_key` must name a key declared *earlier* in the input
//!   (forward references are opt-in),
//! - duplicate keys are rejected unless the caller opts into
//!   last-declaration-wins,
//! - the parent relation must be acyclic (a self-reference is a cycle).
//!
//! The arena stores one node per input record, addressed by input position,
//! each with an optional parent index resolved from the *literal*
//! `parent_key`.

use std::collections::HashMap;

use crate::error::TaxonomyError;
use crate::forest::{normalize, HierarchyForest};
use crate::graph::IndexedHierarchy;
use crate::record::CategoryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// A key declared twice is a [`TaxonomyError::DuplicateKey`].
    #[default]
    Reject,
    /// The latest declaration wins; parent lookups resolve to it from then on
    /// and the normalizer resets its subtree.
    LastWins,
}

#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    pub duplicates: DuplicatePolicy,
    /// Reject records whose `parent_key` differs from their key's dot-prefix.
    pub require_prefix_parent: bool,
    /// Resolve `parent_key` against the whole input instead of only the
    /// records before it.
    pub allow_forward_parents: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    pub key: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Hierarchy {
    records: Vec<CategoryRecord>,
    nodes: Vec<HierarchyNode>,
    index: HashMap<String, usize>,
    roots: Vec<usize>,
}

impl Hierarchy {
    pub fn ingest(
        records: Vec<CategoryRecord>,
        options: &IngestOptions,
    ) -> Result<Self, TaxonomyError> {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
        let mut nodes: Vec<HierarchyNode> = Vec::with_capacity(records.len());

        for (i, record) in records.iter().enumerate() {
            validate_fides_key(&record.key)?;
            if let Some(parent_key) = record.parent() {
                validate_fides_key(parent_key)?;
                if options.require_prefix_parent && record.dot_prefix() != Some(parent_key) {
                    return Err(TaxonomyError::ParentKeyMismatch {
                        key: record.key.clone(),
                        parent_key: parent_key.to_string(),
                        expected: record.dot_prefix().unwrap_or_default().to_string(),
                    });
                }
            }

            if let Some(&first) = index.get(&record.key) {
                match options.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(TaxonomyError::DuplicateKey {
                            key: record.key.clone(),
                            first,
                            second: i,
                        });
                    }
                    DuplicatePolicy::LastWins => {
                        tracing::warn!(key = %record.key, first, second = i, "duplicate key; latest declaration wins");
                    }
                }
            }
            // Indexed before the parent lookup, so a self-reference resolves
            // (and is then caught as a cycle).
            index.insert(record.key.clone(), i);

            let parent = match record.parent() {
                Some(parent_key) if !options.allow_forward_parents => {
                    Some(resolve_parent(&index, record, parent_key)?)
                }
                _ => None,
            };
            nodes.push(HierarchyNode {
                key: record.key.clone(),
                parent,
                children: Vec::new(),
            });
        }

        if options.allow_forward_parents {
            for (node, record) in nodes.iter_mut().zip(&records) {
                if let Some(parent_key) = record.parent() {
                    node.parent = Some(resolve_parent(&index, record, parent_key)?);
                }
            }
        }

        detect_cycles(&nodes)?;

        let mut roots = Vec::new();
        for i in 0..nodes.len() {
            let parent = nodes[i].parent;
            match parent {
                Some(p) => nodes[p].children.push(i),
                None => roots.push(i),
            }
        }

        let hierarchy = Self {
            records,
            nodes,
            index,
            roots,
        };
        let divergent = hierarchy.divergent_parents().len();
        if divergent > 0 {
            tracing::warn!(
                divergent,
                "records whose parent_key is not their dot-prefix; forest and graph views will differ"
            );
        }
        tracing::debug!(
            records = hierarchy.records.len(),
            roots = hierarchy.roots.len(),
            "ingested taxonomy hierarchy"
        );
        Ok(hierarchy)
    }

    pub fn records(&self) -> &[CategoryRecord] {
        &self.records
    }

    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the latest declaration of `key`.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Number of parent hops from node `i` to its root.
    pub fn depth(&self, i: usize) -> usize {
        let mut depth = 0;
        let mut cur = self.nodes.get(i).and_then(|n| n.parent);
        while let Some(p) = cur {
            depth += 1;
            cur = self.nodes[p].parent;
        }
        depth
    }

    /// Records whose declared parent is not the dot-prefix of their own key.
    ///
    /// For these the segment-shaped forest and the literal-parent graph place
    /// the record differently.
    pub fn divergent_parents(&self) -> Vec<&CategoryRecord> {
        self.records
            .iter()
            .filter(|r| r.parent().is_some() && r.parent() != r.dot_prefix())
            .collect()
    }

    pub fn forest(&self) -> HierarchyForest {
        normalize(&self.records)
    }

    pub fn indexed(&self) -> IndexedHierarchy {
        IndexedHierarchy::from_hierarchy(self)
    }
}

fn resolve_parent(
    index: &HashMap<String, usize>,
    record: &CategoryRecord,
    parent_key: &str,
) -> Result<usize, TaxonomyError> {
    index
        .get(parent_key)
        .copied()
        .ok_or_else(|| TaxonomyError::ParentNotFound {
            key: record.key.clone(),
            parent_key: parent_key.to_string(),
        })
}

/// Most dot-segments a key may have. Forest nesting follows the segments, so
/// this bounds the depth of every forest walk (list rendering, serialization).
pub const MAX_KEY_SEGMENTS: usize = 128;

/// Fides keys are non-empty, limited to `[A-Za-z0-9_.-]` and to
/// [`MAX_KEY_SEGMENTS`] dot-segments.
pub fn validate_fides_key(key: &str) -> Result<(), TaxonomyError> {
    if key.is_empty() {
        return Err(TaxonomyError::InvalidKey {
            key: key.to_string(),
            reason: "empty key".to_string(),
        });
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
    {
        return Err(TaxonomyError::InvalidKey {
            key: key.to_string(),
            reason: format!("character `{bad}` is not allowed (expected [A-Za-z0-9_.-])"),
        });
    }
    let segments = key.split('.').count();
    if segments > MAX_KEY_SEGMENTS {
        return Err(TaxonomyError::InvalidKey {
            key: key.to_string(),
            reason: format!("{segments} dot-segments (at most {MAX_KEY_SEGMENTS} allowed)"),
        });
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    OnPath,
    Done,
}

fn detect_cycles(nodes: &[HierarchyNode]) -> Result<(), TaxonomyError> {
    let mut state = vec![Visit::Unvisited; nodes.len()];
    for start in 0..nodes.len() {
        if state[start] != Visit::Unvisited {
            continue;
        }
        let mut path: Vec<usize> = Vec::new();
        let mut cur = Some(start);
        while let Some(i) = cur {
            match state[i] {
                Visit::Done => break,
                Visit::OnPath => {
                    let from = path.iter().position(|&j| j == i).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        path[from..].iter().map(|&j| nodes[j].key.clone()).collect();
                    cycle.push(nodes[i].key.clone());
                    return Err(TaxonomyError::CyclicHierarchy { cycle });
                }
                Visit::Unvisited => {
                    state[i] = Visit::OnPath;
                    path.push(i);
                    cur = nodes[i].parent;
                }
            }
        }
        for i in path {
            state[i] = Visit::Done;
        }
    }
    Ok(())
}
