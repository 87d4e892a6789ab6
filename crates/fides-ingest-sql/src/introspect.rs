//! Catalog -> dataset hierarchy.

use std::collections::HashSet;

use fides_taxonomy::CategoryRecord;

use crate::catalog::{collect_catalog, Catalog, CatalogSource, IntrospectionError};
use crate::models::{Dataset, DatasetCollection, DatasetField};

const DESCRIPTION_PREFIX: &str = "Fides Generated Description for";

fn generated_description(kind: &str, name: &str) -> String {
    format!("{DESCRIPTION_PREFIX} {kind}: {name}")
}

/// One [`Dataset`] per schema, one collection per table, one field per
/// column, all in catalog order.
///
/// Collection names drop the `"{schema}."` prefix from the table identifier.
pub fn create_dataset_collections(catalog: &Catalog) -> Vec<Dataset> {
    catalog
        .schemas
        .iter()
        .map(|schema| {
            let collections = schema
                .tables
                .iter()
                .map(|table| {
                    let name = table
                        .identifier
                        .strip_prefix(&format!("{}.", schema.name))
                        .unwrap_or(table.identifier.as_str())
                        .to_string();
                    let fields = table
                        .columns
                        .iter()
                        .map(|column| {
                            DatasetField::new(column.clone(), generated_description("Column", column))
                        })
                        .collect();
                    DatasetCollection::new(name.clone(), generated_description("Table", &name), fields)
                })
                .collect();
            Dataset::new(
                schema.name.clone(),
                generated_description("Schema", &schema.name),
                collections,
            )
        })
        .collect()
}

/// A single database-level dataset wrapping already-built collections.
pub fn create_dataset(database: &str, collections: Vec<DatasetCollection>) -> Dataset {
    Dataset::new(database, generated_description("Dataset", database), collections)
}

/// Query the catalog and shape it into datasets.
pub fn introspect(source: &dyn CatalogSource) -> Result<Vec<Dataset>, IntrospectionError> {
    let catalog = collect_catalog(source)?;
    let datasets = create_dataset_collections(&catalog);
    tracing::debug!(datasets = datasets.len(), "introspected catalog");
    Ok(datasets)
}

/// Flatten datasets into taxonomy records so they can be drawn with the
/// same hierarchy views: `ds`, `ds.collection`, `ds.collection.field`.
///
/// Name segments are sanitized into fides-key characters (anything outside
/// `[A-Za-z0-9_-]`, including `.`, becomes `_`); the original name is kept
/// as the record's `name`. Names that sanitize to a segment already taken
/// under the same parent get a `_2`, `_3`, ... suffix, so every record key
/// is unique.
pub fn datasets_to_records(datasets: &[Dataset]) -> Vec<CategoryRecord> {
    let mut records = Vec::new();
    let mut dataset_keys = HashSet::new();
    for dataset in datasets {
        let ds_key = unique_segment(&mut dataset_keys, &dataset.fides_key);
        records.push(CategoryRecord {
            name: dataset.name.clone(),
            description: dataset.description.clone(),
            ..CategoryRecord::root(ds_key.clone())
        });
        let mut collection_keys = HashSet::new();
        for collection in &dataset.collections {
            let coll_key = format!(
                "{ds_key}.{}",
                unique_segment(&mut collection_keys, &collection.name)
            );
            records.push(CategoryRecord {
                name: Some(collection.name.clone()),
                description: collection.description.clone(),
                ..CategoryRecord::child(coll_key.clone(), ds_key.clone())
            });
            let mut field_keys = HashSet::new();
            for field in &collection.fields {
                let field_key = format!(
                    "{coll_key}.{}",
                    unique_segment(&mut field_keys, &field.name)
                );
                records.push(CategoryRecord {
                    name: Some(field.name.clone()),
                    description: field.description.clone(),
                    ..CategoryRecord::child(field_key, coll_key.clone())
                });
            }
        }
    }
    records
}

/// Sanitize `name` and claim it among its siblings in `taken`.
fn unique_segment(taken: &mut HashSet<String>, name: &str) -> String {
    let base = sanitize_key_segment(name);
    if taken.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn sanitize_key_segment(s: &str) -> String {
    let out: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if out.is_empty() {
        "_".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SchemaEntry, TableEntry};
    use crate::models::DEFAULT_DATA_QUALIFIER;

    #[test]
    fn generates_datasets_from_plain_table_names() {
        let catalog = Catalog {
            schemas: vec![SchemaEntry {
                name: "ds".to_string(),
                tables: vec![TableEntry::new("foo", ["1", "2"]), TableEntry::new("bar", ["4", "5"])],
            }],
        };
        let expected = vec![Dataset::new(
            "ds",
            "Fides Generated Description for Schema: ds",
            vec![
                DatasetCollection::new(
                    "foo",
                    "Fides Generated Description for Table: foo",
                    vec![
                        DatasetField::new("1", "Fides Generated Description for Column: 1"),
                        DatasetField::new("2", "Fides Generated Description for Column: 2"),
                    ],
                ),
                DatasetCollection::new(
                    "bar",
                    "Fides Generated Description for Table: bar",
                    vec![
                        DatasetField::new("4", "Fides Generated Description for Column: 4"),
                        DatasetField::new("5", "Fides Generated Description for Column: 5"),
                    ],
                ),
            ],
        )];
        assert_eq!(create_dataset_collections(&catalog), expected);
        assert_eq!(expected[0].data_qualifier, DEFAULT_DATA_QUALIFIER);
    }

    #[test]
    fn empty_schema_yields_dataset_without_collections() {
        let catalog = Catalog {
            schemas: vec![SchemaEntry {
                name: "empty".to_string(),
                tables: Vec::new(),
            }],
        };
        let datasets = create_dataset_collections(&catalog);
        assert_eq!(datasets.len(), 1);
        assert!(datasets[0].collections.is_empty());
    }

    #[test]
    fn database_level_dataset_uses_dataset_description() {
        let collections = vec![DatasetCollection::new(
            "bar",
            "Fides Generated Description for Table: bar",
            vec![DatasetField::new("4", "Fides Generated Description for Column: 4")],
        )];
        let ds = create_dataset("fidesdb", collections.clone());
        assert_eq!(ds.fides_key, "fidesdb");
        assert_eq!(ds.name.as_deref(), Some("fidesdb"));
        assert_eq!(
            ds.description.as_deref(),
            Some("Fides Generated Description for Dataset: fidesdb")
        );
        assert_eq!(ds.collections, collections);
    }

    #[test]
    fn records_mirror_dataset_nesting() {
        let catalog = Catalog {
            schemas: vec![SchemaEntry {
                name: "app".to_string(),
                tables: vec![TableEntry::new("app.users", ["id", "e-mail", "first name"])],
            }],
        };
        let records = datasets_to_records(&create_dataset_collections(&catalog));
        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["app", "app.users", "app.users.id", "app.users.e-mail", "app.users.first_name"]
        );
        assert_eq!(records[4].parent(), Some("app.users"));
        assert_eq!(records[4].name.as_deref(), Some("first name"));
        assert!(records[0].is_root());
    }

    #[test]
    fn colliding_sanitized_names_get_distinct_keys() {
        let catalog = Catalog {
            schemas: vec![SchemaEntry {
                name: "app".to_string(),
                tables: vec![
                    TableEntry::new("app.users", ["first name", "first_name", "first.name"]),
                    TableEntry::new("app.user list", Vec::<String>::new()),
                    TableEntry::new("app.user_list", Vec::<String>::new()),
                ],
            }],
        };
        let records = datasets_to_records(&create_dataset_collections(&catalog));
        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "app",
                "app.users",
                "app.users.first_name",
                "app.users.first_name_2",
                "app.users.first_name_3",
                "app.user_list",
                "app.user_list_2",
            ]
        );
        assert_eq!(records[3].name.as_deref(), Some("first_name"));
        assert_eq!(records[4].name.as_deref(), Some("first.name"));

        let indexed = fides_taxonomy::IndexedHierarchy::build(records).unwrap();
        assert_eq!(indexed.edges.len(), 6);
    }

    #[test]
    fn suffixes_skip_names_already_taken_literally() {
        let mut taken = HashSet::new();
        assert_eq!(unique_segment(&mut taken, "a_b_2"), "a_b_2");
        assert_eq!(unique_segment(&mut taken, "a b"), "a_b");
        assert_eq!(unique_segment(&mut taken, "a_b"), "a_b_3");
    }
}
