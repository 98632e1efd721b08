//! Column elements.

use crate::dialect::Dialect;
use crate::error::Result;
use crate::types::TypeElem;

/// Key and sequencing options of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnOptions {
    /// Part of the table's primary key.
    pub primary_key: bool,
    /// Values are generated by the database.
    pub auto_increment: bool,
    /// Primary key declared in the column definition itself.
    pub inline_primary_key: bool,
}

/// A named, typed column.
///
/// `table` is the owning table's name. It is a lookup key used to decide
/// table qualification, not an owning reference; [`TableElem`] sets it when
/// the column is added.
///
/// [`TableElem`]: super::TableElem
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnElem {
    name: String,
    table: String,
    ty: TypeElem,
    options: ColumnOptions,
}

/// Creates a column that is not attached to a table yet.
#[must_use]
pub fn column(name: impl Into<String>, ty: TypeElem) -> ColumnElem {
    ColumnElem {
        name: name.into(),
        table: String::new(),
        ty,
        options: ColumnOptions::default(),
    }
}

impl ColumnElem {
    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning table name; empty for detached columns.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Column type.
    #[must_use]
    pub const fn ty(&self) -> &TypeElem {
        &self.ty
    }

    /// Key and sequencing options.
    #[must_use]
    pub const fn options(&self) -> ColumnOptions {
        self.options
    }

    /// Declares the column as an inline primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.options.primary_key = true;
        self.options.inline_primary_key = true;
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.options.auto_increment = true;
        self
    }

    pub(crate) fn with_table(mut self, table: &str) -> Self {
        self.table = String::from(table);
        self
    }

    pub(crate) fn mark_primary_key(&mut self) {
        self.options.primary_key = true;
    }

    /// Renders the column definition for `CREATE TABLE`.
    ///
    /// `inline_primary_key` says whether this column carries the table's
    /// primary key in its own definition; [`TableElem::create`] decides it
    /// once per table.
    ///
    /// [`TableElem::create`]: super::TableElem::create
    ///
    /// # Errors
    ///
    /// Fails when the dialect cannot auto-increment this column.
    pub fn definition(&self, dialect: &dyn Dialect, inline_primary_key: bool) -> Result<String> {
        let mut parts = vec![dialect.escape(&self.name), dialect.column_type(self)];
        let constraints = self.ty.constraints_sql();
        if !constraints.is_empty() {
            parts.push(constraints);
        }
        if inline_primary_key {
            parts.push(String::from("PRIMARY KEY"));
        }
        if self.options.auto_increment {
            let modifier = dialect.auto_increment(self, inline_primary_key)?;
            if !modifier.is_empty() {
                parts.push(modifier);
            }
        }
        Ok(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{DefaultDialect, MysqlDialect, PostgresDialect, SqliteDialect};
    use crate::error::Error;
    use crate::types::{big_int, int, varchar};

    #[test]
    fn test_detached_column() {
        let col = column("email", varchar());
        assert_eq!(col.name(), "email");
        assert_eq!(col.table(), "");
        assert_eq!(col.options(), ColumnOptions::default());
    }

    #[test]
    fn test_definition_default() {
        let col = column("email", varchar().size(40).not_null());
        assert_eq!(
            col.definition(&DefaultDialect::new(), false),
            Ok(String::from("email VARCHAR(40) NOT NULL"))
        );
    }

    #[test]
    fn test_auto_increment_per_dialect() {
        let id = column("id", int().unsigned()).primary_key().auto_increment();
        assert_eq!(
            id.definition(&MysqlDialect::new(), false),
            Ok(String::from("id INT UNSIGNED AUTO_INCREMENT"))
        );
        assert_eq!(
            id.definition(&PostgresDialect::new(), false),
            Ok(String::from("id SERIAL"))
        );
        assert_eq!(
            id.definition(&SqliteDialect::new(), true),
            Ok(String::from("id INTEGER PRIMARY KEY AUTOINCREMENT"))
        );
        assert_eq!(
            column("id", big_int())
                .auto_increment()
                .definition(&PostgresDialect::new(), false),
            Ok(String::from("id BIGSERIAL"))
        );
    }

    #[test]
    fn test_sqlite_auto_increment_needs_inline_primary_key() {
        let id = column("id", int()).auto_increment();
        let err = id.definition(&SqliteDialect::new(), false).unwrap_err();
        assert!(matches!(err, Error::Unsupported { dialect: "sqlite", .. }));
    }
}
