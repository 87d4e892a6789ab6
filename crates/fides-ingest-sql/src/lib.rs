//! Database catalog introspection for Fides
//!
//! Turns catalog metadata into the dataset resource hierarchy:
//! - schemas -> [`Dataset`]s
//! - tables -> [`DatasetCollection`]s
//! - columns -> [`DatasetField`]s
//!
//! The catalog query itself is an external collaborator behind
//! [`CatalogSource`]; this crate only walks it and shapes the result. A
//! DDL-backed source ([`DdlCatalog`]) is included for offline use.
//!
//! Generated datasets carry placeholder descriptions and no data categories;
//! they are a starting point for annotation, not an accepted classification.

pub mod catalog;
pub mod ddl;
pub mod introspect;
pub mod models;

pub use catalog::{collect_catalog, Catalog, CatalogSource, IntrospectionError, SchemaEntry, TableEntry};
pub use ddl::DdlCatalog;
pub use introspect::{create_dataset, create_dataset_collections, datasets_to_records, introspect};
pub use models::{Dataset, DatasetCollection, DatasetField};
