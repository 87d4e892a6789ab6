//! Nested map-of-maps view of a taxonomy.
//!
//! Shape comes from each record's *own* key, split on `.`; the literal
//! `parent_key` only decides whether the record is a root. Leaves are empty
//! maps. Roots and siblings keep first-insertion order, and serialization
//! preserves it:
//!
//! ```json
//! { "user": { "provided": { "identifiable": {} } }, "system": {} }
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::record::CategoryRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyForest {
    entries: Vec<ForestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ForestEntry {
    name: String,
    children: HierarchyForest,
}

impl HierarchyForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&HierarchyForest> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.children)
    }

    /// Follow a path of segment names from this level down.
    pub fn get_path<'a>(&self, path: impl IntoIterator<Item = &'a str>) -> Option<&HierarchyForest> {
        path.into_iter().try_fold(self, |level, seg| level.get(seg))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HierarchyForest)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.children))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Total number of nodes at every level.
    pub fn node_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| 1 + e.children.node_count())
            .sum()
    }

    /// Number of levels; an empty forest has depth 0.
    pub fn depth(&self) -> usize {
        self.entries
            .iter()
            .map(|e| 1 + e.children.depth())
            .max()
            .unwrap_or(0)
    }

    fn child_or_insert(&mut self, name: &str) -> &mut HierarchyForest {
        let pos = match self.entries.iter().position(|e| e.name == name) {
            Some(pos) => pos,
            None => {
                self.entries.push(ForestEntry {
                    name: name.to_string(),
                    children: HierarchyForest::default(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].children
    }

    /// (Re)declare `name` at this level as an empty map, dropping any subtree
    /// it already had. An existing entry keeps its position.
    fn reset(&mut self, name: &str) {
        self.child_or_insert(name).entries.clear();
    }
}

impl Serialize for HierarchyForest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for e in &self.entries {
            map.serialize_entry(&e.name, &e.children)?;
        }
        map.end()
    }
}

/// Build the nested forest, processing records in input order.
///
/// - A root record inserts its whole key (unsplit) at the top level.
/// - Any other record walks its own key's segments, creating missing
///   intermediate levels, and resets the final segment to an empty map.
///
/// Re-declaring a key therefore wipes whatever had been nested under it
/// ("last structural declaration wins"); ancestors on the path survive
/// because every walk recreates them identically.
///
/// Nesting depth equals the longest key's segment count; records that went
/// through [`crate::Hierarchy::ingest`] have at most
/// [`crate::hierarchy::MAX_KEY_SEGMENTS`].
pub fn normalize(records: &[CategoryRecord]) -> HierarchyForest {
    let mut forest = HierarchyForest::new();
    for record in records {
        if record.is_root() {
            forest.reset(&record.key);
            continue;
        }
        let segments: Vec<&str> = record.key.split('.').collect();
        let Some((last, ancestors)) = segments.split_last() else {
            continue;
        };
        let mut level = &mut forest;
        for seg in ancestors {
            level = level.child_or_insert(seg);
        }
        level.reset(last);
    }
    forest
}
