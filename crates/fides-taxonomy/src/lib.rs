//! Fides taxonomy hierarchies
//!
//! Turns flat taxonomy records (dot-delimited `fides_key`s with optional
//! `parent_key` pointers) into the structures the renderers consume:
//!
//! - [`hierarchy::Hierarchy`]: a validated arena built once at ingestion
//!   (unresolved parents, duplicate keys and cycles are rejected here),
//! - [`forest::HierarchyForest`]: the nested map-of-maps view, shaped by each
//!   key's own dot-segments,
//! - [`graph::IndexedHierarchy`]: index-aligned labels/parents plus
//!   `parent_key -> key` edge lists for the graph encodings,
//! - [`list`]: indented textual rendering of a forest.
//!
//! The forest and the indexed view disagree about what "parent"
//! means when a record's `parent_key` is not its dot-prefix; see
//! [`hierarchy::Hierarchy::divergent_parents`].

pub mod error;
pub mod forest;
pub mod graph;
pub mod hierarchy;
pub mod list;
pub mod record;
pub mod resource;

pub use error::TaxonomyError;
pub use forest::{normalize, HierarchyForest};
pub use graph::{Edges, IndexedHierarchy};
pub use hierarchy::{DuplicatePolicy, Hierarchy, HierarchyNode, IngestOptions, MAX_KEY_SEGMENTS};
pub use list::{render_list, ListOptions, ListStyle};
pub use record::{parse_records, CategoryRecord, TaxonomyManifest};
pub use resource::{hierarchy_title, ResourceType};
