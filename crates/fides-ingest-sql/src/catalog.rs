//! The catalog seam: schemas, tables and columns in catalog order.

use serde_json::Value;
use thiserror::Error;

/// Schemas that never become datasets.
pub const SYSTEM_SCHEMAS: [&str; 2] = ["information_schema", "pg_catalog"];

#[derive(Debug, Error)]
pub enum IntrospectionError {
    /// The underlying catalog query failed; `message` is its full error chain.
    #[error("catalog query `{operation}` failed: {message}")]
    Query { operation: String, message: String },

    #[error("malformed catalog: {0}")]
    Malformed(String),
}

/// The external catalog query (a live connection's inspector, a DDL dump,
/// a test double). Connection lifetime belongs to the implementor.
pub trait CatalogSource {
    fn schema_names(&self) -> anyhow::Result<Vec<String>>;
    fn table_names(&self, schema: &str) -> anyhow::Result<Vec<String>>;
    fn column_names(&self, schema: &str, table: &str) -> anyhow::Result<Vec<String>>;
}

/// `schema -> "schema.table" -> [column, ...]`, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub schemas: Vec<SchemaEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub name: String,
    pub tables: Vec<TableEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// Usually `"{schema}.{table}"`.
    pub identifier: String,
    pub columns: Vec<String>,
}

impl TableEntry {
    pub fn new<I, S>(identifier: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifier: identifier.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl Catalog {
    /// Read the `{ schema: { table: [column, ...] } }` JSON shape, keeping
    /// document order.
    pub fn from_json(value: &Value) -> Result<Self, IntrospectionError> {
        let Value::Object(schemas) = value else {
            return Err(IntrospectionError::Malformed(
                "expected an object keyed by schema name".to_string(),
            ));
        };
        let mut catalog = Catalog::default();
        for (schema, tables) in schemas {
            let Value::Object(tables) = tables else {
                return Err(IntrospectionError::Malformed(format!(
                    "schema `{schema}` must map table identifiers to column lists"
                )));
            };
            let mut entry = SchemaEntry {
                name: schema.clone(),
                tables: Vec::with_capacity(tables.len()),
            };
            for (table, columns) in tables {
                let columns = columns
                    .as_array()
                    .and_then(|cols| {
                        cols.iter()
                            .map(|c| c.as_str().map(str::to_string))
                            .collect::<Option<Vec<_>>>()
                    })
                    .ok_or_else(|| {
                        IntrospectionError::Malformed(format!(
                            "table `{table}` must list its columns as strings"
                        ))
                    })?;
                entry.tables.push(TableEntry::new(table.clone(), columns));
            }
            catalog.schemas.push(entry);
        }
        Ok(catalog)
    }
}

fn query_failed(operation: String, err: anyhow::Error) -> IntrospectionError {
    IntrospectionError::Query {
        operation,
        message: format!("{err:#}"),
    }
}

pub fn is_system_schema(name: &str) -> bool {
    SYSTEM_SCHEMAS
        .iter()
        .any(|s| s.eq_ignore_ascii_case(name))
}

/// Walk a [`CatalogSource`] into a [`Catalog`], skipping system schemas.
///
/// Failures are not retried; the first one is returned as-is.
pub fn collect_catalog(source: &dyn CatalogSource) -> Result<Catalog, IntrospectionError> {
    let schema_names = source
        .schema_names()
        .map_err(|e| query_failed("schema_names".to_string(), e))?;

    let mut catalog = Catalog::default();
    for schema in schema_names {
        if is_system_schema(&schema) {
            tracing::debug!(schema = %schema, "skipping system schema");
            continue;
        }
        let tables = source
            .table_names(&schema)
            .map_err(|e| query_failed(format!("table_names({schema})"), e))?;
        let mut entry = SchemaEntry {
            name: schema.clone(),
            tables: Vec::with_capacity(tables.len()),
        };
        for table in tables {
            let columns = source
                .column_names(&schema, &table)
                .map_err(|e| query_failed(format!("column_names({schema}.{table})"), e))?;
            entry
                .tables
                .push(TableEntry::new(format!("{schema}.{table}"), columns));
        }
        catalog.schemas.push(entry);
    }
    Ok(catalog)
}
