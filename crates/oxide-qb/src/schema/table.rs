//! Table elements.

use std::collections::BTreeMap;

use super::column::{column, ColumnElem};
use super::constraint::{ForeignKeyConstraint, IndexElem, UniqueKeyConstraint};
use crate::clause::{AliasClause, Clause};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::types::TypeElem;

/// A table: ordered columns plus table-level constraints.
///
/// Column order is declaration order; it drives DDL output and the column
/// order of INSERT, UPDATE and UPSERT statements.
#[derive(Debug, Clone, PartialEq)]
pub struct TableElem {
    name: String,
    columns: Vec<ColumnElem>,
    primary_key: Vec<String>,
    foreign_keys: Vec<ForeignKeyConstraint>,
    unique_keys: Vec<UniqueKeyConstraint>,
    indices: Vec<IndexElem>,
    // referenced table name -> positions in `foreign_keys`
    fk_index: BTreeMap<String, Vec<usize>>,
}

/// Creates a table from its columns.
///
/// ```rust
/// use oxide_qb::schema::{column, table};
/// use oxide_qb::types::{int, varchar};
///
/// let user = table("user", [
///     column("id", int()).primary_key(),
///     column("email", varchar().not_null()),
/// ]);
/// assert_eq!(user.columns().len(), 2);
/// assert_eq!(user.c("email").table(), "user");
/// ```
#[must_use]
pub fn table(name: impl Into<String>, columns: impl IntoIterator<Item = ColumnElem>) -> TableElem {
    columns
        .into_iter()
        .fold(TableElem::new(name), TableElem::column)
}

impl TableElem {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
            unique_keys: Vec::new(),
            indices: Vec::new(),
            fk_index: BTreeMap::new(),
        }
    }

    /// Adds a column. A column with the same name is replaced in place.
    #[must_use]
    pub fn column(mut self, column: ColumnElem) -> Self {
        let mut column = column.with_table(&self.name);
        if self.primary_key.iter().any(|pk| pk == column.name()) {
            column.mark_primary_key();
        }
        match self.columns.iter_mut().find(|c| c.name() == column.name()) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        self
    }

    /// Declares a table-level primary key.
    #[must_use]
    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| String::from(*c)).collect();
        for column in &mut self.columns {
            if columns.contains(&column.name()) {
                column.mark_primary_key();
            }
        }
        self
    }

    /// Adds a foreign key.
    #[must_use]
    pub fn foreign_key(mut self, fk: ForeignKeyConstraint) -> Self {
        self.fk_index
            .entry(String::from(fk.ref_table()))
            .or_default()
            .push(self.foreign_keys.len());
        self.foreign_keys.push(fk);
        self
    }

    /// Adds a unique key named `u_<table>_<cols>`.
    #[must_use]
    pub fn unique_key(mut self, columns: &[&str]) -> Self {
        self.unique_keys
            .push(UniqueKeyConstraint::new(&self.name, columns));
        self
    }

    /// Adds an index named `i_<table>_<cols>`.
    #[must_use]
    pub fn index(mut self, columns: &[&str]) -> Self {
        self.indices.push(IndexElem::new(&self.name, columns));
        self
    }

    /// Adds a prepared index, e.g. a unique one.
    #[must_use]
    pub fn with_index(mut self, index: IndexElem) -> Self {
        self.indices.push(index);
        self
    }

    /// Table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnElem] {
        &self.columns
    }

    /// Looks up a declared column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColumnElem> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Returns the column `name` for use in expressions.
    ///
    /// An undeclared name yields a reference to `table.name` with an empty
    /// type; it renders like any other column. Statements that write values
    /// reject undeclared columns when they are built.
    #[must_use]
    pub fn c(&self, name: &str) -> ColumnElem {
        self.get(name).cloned().unwrap_or_else(|| {
            column(name, TypeElem::new("")).with_table(&self.name)
        })
    }

    /// Primary key columns, in key order.
    #[must_use]
    pub fn primary_key_columns(&self) -> Vec<&ColumnElem> {
        if self.primary_key.is_empty() {
            self.columns
                .iter()
                .filter(|c| c.options().primary_key)
                .collect()
        } else {
            self.primary_key.iter().filter_map(|pk| self.get(pk)).collect()
        }
    }

    /// Foreign keys in declaration order.
    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKeyConstraint] {
        &self.foreign_keys
    }

    /// Foreign keys from this table to `table`.
    pub fn foreign_keys_to<'a>(
        &'a self,
        table: &str,
    ) -> impl Iterator<Item = &'a ForeignKeyConstraint> + 'a {
        self.fk_index
            .get(table)
            .into_iter()
            .flatten()
            .map(move |&i| &self.foreign_keys[i])
    }

    /// Names of the tables this table references.
    pub fn referenced_tables(&self) -> impl Iterator<Item = &str> {
        self.fk_index.keys().map(String::as_str)
    }

    /// Unique keys.
    #[must_use]
    pub fn unique_keys(&self) -> &[UniqueKeyConstraint] {
        &self.unique_keys
    }

    /// Indexes.
    #[must_use]
    pub fn indices(&self) -> &[IndexElem] {
        &self.indices
    }

    /// Wraps the table in an alias for use in FROM or JOIN.
    #[must_use]
    pub fn alias(&self, alias: impl Into<String>) -> Clause {
        Clause::Alias(AliasClause::new(alias, self.clone()))
    }

    /// Renders `CREATE TABLE` followed by one `CREATE INDEX` per index.
    ///
    /// The primary key is declared in the column definition only when the
    /// dialect supports it, the key is a single column declared with
    /// [`ColumnElem::primary_key`] and no table-level key was set. Otherwise
    /// the key becomes one `PRIMARY KEY(...)` table constraint.
    ///
    /// # Errors
    ///
    /// Fails when a column definition cannot be rendered on this dialect.
    pub fn create(&self, dialect: &dyn Dialect) -> Result<String> {
        let pk = self.primary_key_columns();
        let inline = match pk.as_slice() {
            [only] if self.primary_key.is_empty() && dialect.supports_inline_primary_key() => {
                only.options().inline_primary_key.then(|| only.name())
            }
            _ => None,
        };

        let mut defs = self
            .columns
            .iter()
            .map(|c| c.definition(dialect, inline == Some(c.name())))
            .collect::<Result<Vec<_>>>()?;
        if !pk.is_empty() && inline.is_none() {
            let cols: Vec<String> = pk.iter().map(|c| dialect.escape(c.name())).collect();
            defs.push(format!("PRIMARY KEY({})", cols.join(", ")));
        }
        defs.extend(self.foreign_keys.iter().map(|fk| fk.to_sql(dialect)));
        defs.extend(self.unique_keys.iter().map(|uk| uk.to_sql(dialect)));

        let mut sql = format!(
            "CREATE TABLE {} (\n\t{}\n);",
            dialect.escape(&self.name),
            defs.join(",\n\t")
        );
        for index in &self.indices {
            sql.push('\n');
            sql.push_str(&index.to_sql(dialect));
        }
        Ok(sql)
    }

    /// Renders `DROP TABLE`.
    #[must_use]
    pub fn drop(&self, dialect: &dyn Dialect) -> String {
        format!("DROP TABLE {};", dialect.escape(&self.name))
    }
}
