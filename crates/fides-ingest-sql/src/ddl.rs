//! A [`CatalogSource`] read from SQL DDL instead of a live connection.
//!
//! Only `CREATE TABLE` statements contribute; tables and columns keep their
//! order of appearance. A table named `schema.table` lands in `schema`,
//! an unqualified one in the default schema given at parse time.

use anyhow::{anyhow, Result};
use sqlparser::ast::Statement;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use crate::catalog::CatalogSource;

#[derive(Debug, Clone, Default)]
pub struct DdlCatalog {
    schemas: Vec<DdlSchema>,
}

#[derive(Debug, Clone)]
struct DdlSchema {
    name: String,
    tables: Vec<DdlTable>,
}

#[derive(Debug, Clone)]
struct DdlTable {
    name: String,
    columns: Vec<String>,
}

impl DdlCatalog {
    pub fn parse(sql: &str, default_schema: &str) -> Result<Self> {
        let dialect = GenericDialect {};
        let statements = Parser::parse_sql(&dialect, sql)?;

        let mut catalog = DdlCatalog::default();
        for stmt in statements {
            if let Statement::CreateTable {
                name,
                columns: sql_columns,
                ..
            } = stmt
            {
                let mut parts: Vec<String> = name.0.into_iter().map(|ident| ident.value).collect();
                let table = parts
                    .pop()
                    .ok_or_else(|| anyhow!("CREATE TABLE without a table name"))?;
                let schema = parts.pop().unwrap_or_else(|| default_schema.to_string());
                let columns = sql_columns.into_iter().map(|c| c.name.value).collect();
                catalog.add_table(schema, table, columns);
            }
        }
        tracing::debug!(
            schemas = catalog.schemas.len(),
            tables = catalog.schemas.iter().map(|s| s.tables.len()).sum::<usize>(),
            "parsed DDL catalog"
        );
        Ok(catalog)
    }

    fn add_table(&mut self, schema: String, table: String, columns: Vec<String>) {
        let pos = match self.schemas.iter().position(|s| s.name == schema) {
            Some(pos) => pos,
            None => {
                self.schemas.push(DdlSchema {
                    name: schema,
                    tables: Vec::new(),
                });
                self.schemas.len() - 1
            }
        };
        let tables = &mut self.schemas[pos].tables;
        match tables.iter_mut().find(|t| t.name == table) {
            // A repeated CREATE TABLE replaces the earlier definition.
            Some(existing) => existing.columns = columns,
            None => tables.push(DdlTable {
                name: table,
                columns,
            }),
        }
    }

    fn schema(&self, name: &str) -> Result<&DdlSchema> {
        self.schemas
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| anyhow!("schema `{name}` not found"))
    }
}

impl CatalogSource for DdlCatalog {
    fn schema_names(&self) -> Result<Vec<String>> {
        Ok(self.schemas.iter().map(|s| s.name.clone()).collect())
    }

    fn table_names(&self, schema: &str) -> Result<Vec<String>> {
        Ok(self
            .schema(schema)?
            .tables
            .iter()
            .map(|t| t.name.clone())
            .collect())
    }

    fn column_names(&self, schema: &str, table: &str) -> Result<Vec<String>> {
        self.schema(schema)?
            .tables
            .iter()
            .find(|t| t.name == table)
            .map(|t| t.columns.clone())
            .ok_or_else(|| anyhow!("table `{schema}.{table}` not found"))
    }
}
