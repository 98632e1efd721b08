//! UPSERT statement builder.
//!
//! There is no portable UPSERT: the dialect compiler decides the whole
//! rendering. SQLite emits `REPLACE INTO`, MySQL appends
//! `ON DUPLICATE KEY UPDATE` and PostgreSQL appends
//! `ON CONFLICT (...) DO UPDATE SET`. The latter two bind every value a
//! second time for the update part.

use super::{Assignments, Statement};
use crate::clause::{Clause, ReturningClause};
use crate::compiler::CompilerContext;
use crate::error::{Error, Result};
use crate::schema::TableElem;
use crate::value::Value;

/// An UPSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertStmt {
    table: TableElem,
    values: Assignments,
    conflict: Vec<String>,
    returning: Option<ReturningClause>,
}

/// Starts an UPSERT into `table`.
#[must_use]
pub fn upsert(table: &TableElem) -> UpsertStmt {
    UpsertStmt {
        table: table.clone(),
        values: Assignments::default(),
        conflict: Vec::new(),
        returning: None,
    }
}

impl UpsertStmt {
    /// Sets several column values.
    #[must_use]
    pub fn values<K, V>(mut self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (column, value) in values {
            self.values.set(&self.table, column.as_ref(), value.into());
        }
        self
    }

    /// Sets one column value.
    #[must_use]
    pub fn value(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.values.set(&self.table, column, value.into());
        self
    }

    /// Sets the conflict target. Defaults to the primary key.
    #[must_use]
    pub fn on_conflict(mut self, columns: &[&str]) -> Self {
        for column in columns {
            if self.table.get(column).is_none() {
                self.values.record(Error::UnknownColumn {
                    table: String::from(self.table.name()),
                    column: String::from(*column),
                });
            }
        }
        self.conflict = columns.iter().map(|c| String::from(*c)).collect();
        self
    }

    /// Adds `RETURNING`. Rendered only where
    /// [`Dialect::supports_returning`] holds, i.e. PostgreSQL.
    ///
    /// [`Dialect::supports_returning`]: crate::dialect::Dialect::supports_returning
    #[must_use]
    pub fn returning<C: Into<Clause>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.returning = Some(ReturningClause::new(columns));
        self
    }

    /// Target table.
    #[must_use]
    pub const fn table(&self) -> &TableElem {
        &self.table
    }

    /// Conflict target columns: the explicit target, else the primary key.
    ///
    /// # Errors
    ///
    /// [`Error::MissingConflictTarget`] when neither exists.
    pub fn conflict_columns(&self) -> Result<Vec<String>> {
        if !self.conflict.is_empty() {
            return Ok(self.conflict.clone());
        }
        let pk: Vec<String> = self
            .table
            .primary_key_columns()
            .into_iter()
            .map(|c| String::from(c.name()))
            .collect();
        if pk.is_empty() {
            return Err(Error::MissingConflictTarget {
                table: String::from(self.table.name()),
            });
        }
        Ok(pk)
    }

    /// Renders `VERB INTO t(cols)\nVALUES(...)`, binding every value.
    ///
    /// # Errors
    ///
    /// Returns the accumulated builder errors, or [`Error::EmptyValues`].
    pub fn render_head(&self, ctx: &mut CompilerContext<'_>, verb: &str) -> Result<String> {
        self.values.render_insert(ctx, &self.table, "UPSERT", verb)
    }

    /// Renders `a = ?, b = ?`, binding every value again.
    ///
    /// # Errors
    ///
    /// Same as [`UpsertStmt::render_head`].
    pub fn render_set(&self, ctx: &mut CompilerContext<'_>) -> Result<String> {
        self.values.render_set(ctx, &self.table, "UPSERT")
    }

    /// Renders `RETURNING ...`, or nothing when the statement has none or
    /// the dialect does not support it.
    ///
    /// # Errors
    ///
    /// Propagates errors from the returned expressions.
    pub fn render_returning(&self, ctx: &mut CompilerContext<'_>) -> Result<String> {
        match &self.returning {
            Some(returning) if ctx.dialect().supports_returning() => {
                ctx.compiler().visit_returning(ctx, returning)
            }
            _ => Ok(String::new()),
        }
    }
}

impl Statement for UpsertStmt {
    fn compile(&self, ctx: &mut CompilerContext<'_>) -> Result<String> {
        ctx.compiler().visit_upsert(ctx, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{
        DefaultDialect, MysqlCompiler, MysqlDialect, PostgresCompiler, PostgresDialect,
        SqliteDialect,
    };
    use crate::schema::{column, table};
    use crate::types::{int, varchar};

    fn user() -> TableElem {
        table(
            "user",
            [column("id", int()).primary_key(), column("name", varchar())],
        )
    }

    #[test]
    fn test_sqlite_replace() {
        let user = user();
        let stmt = upsert(&user)
            .values([("id", Value::from(1)), ("name", Value::from("a"))])
            .returning([user.c("id")])
            .build(&SqliteDialect::new())
            .unwrap();
        assert_eq!(stmt.sql(), "REPLACE INTO user(id, name)\nVALUES(?, ?);");
        assert_eq!(stmt.binds().len(), 2);
    }

    #[test]
    fn test_mysql_on_duplicate_key() {
        let stmt = upsert(&user())
            .value("id", 1)
            .value("name", "a")
            .build(&MysqlDialect::new())
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "INSERT INTO user(id, name)\nVALUES(?, ?)\nON DUPLICATE KEY UPDATE id = ?, name = ?;"
        );
        assert_eq!(stmt.binds().len(), 4);
    }

    #[test]
    fn test_postgres_on_conflict() {
        let user = user();
        let stmt = upsert(&user)
            .value("id", 1)
            .value("name", "a")
            .returning([user.c("name")])
            .build(&PostgresDialect::new())
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "INSERT INTO user(id, name)\nVALUES($1, $2)\n\
             ON CONFLICT (id) DO UPDATE SET id = $3, name = $4\n\
             RETURNING name;"
        );
        assert_eq!(
            stmt.binds(),
            &[
                Value::Int(1),
                Value::from("a"),
                Value::Int(1),
                Value::from("a")
            ]
        );
    }

    #[test]
    fn test_explicit_conflict_target() {
        let stmt = upsert(&user())
            .value("name", "a")
            .on_conflict(&["name"])
            .build(&PostgresDialect::new())
            .unwrap();
        assert!(stmt.sql().contains("ON CONFLICT (name) DO UPDATE SET name = $2"));
    }

    #[test]
    fn test_missing_conflict_target() {
        let tag = table("tag", [column("name", varchar())]);
        let err = upsert(&tag).value("name", "a").build(&PostgresDialect::new());
        assert_eq!(
            err,
            Err(Error::MissingConflictTarget {
                table: String::from("tag")
            })
        );
        // sqlite does not need one
        assert!(upsert(&tag).value("name", "a").build(&SqliteDialect::new()).is_ok());
    }

    #[test]
    fn test_unsupported_on_default_dialect() {
        let err = upsert(&user()).value("id", 1).build(&DefaultDialect::new());
        assert!(matches!(err, Err(Error::Unsupported { dialect: "default", .. })));
    }

    #[test]
    fn test_unknown_conflict_column() {
        let err = upsert(&user())
            .value("id", 1)
            .on_conflict(&["nope"])
            .build(&PostgresDialect::new());
        assert!(matches!(err, Err(Error::UnknownColumn { .. })));
    }

    #[test]
    fn test_returning_follows_dialect_support() {
        let user = user();
        let stmt = upsert(&user).value("id", 1).returning([user.c("id")]);

        let mysql = MysqlDialect::new();
        let mut ctx = CompilerContext::with_compiler(&mysql, &PostgresCompiler);
        let sql = stmt.build_in(&mut ctx).unwrap();
        assert!(!sql.sql().contains("RETURNING"));

        let postgres = PostgresDialect::new();
        let mut ctx = CompilerContext::with_compiler(&postgres, &MysqlCompiler);
        assert_eq!(
            stmt.build_in(&mut ctx).unwrap().sql(),
            "INSERT INTO user(id)\nVALUES($1)\nON DUPLICATE KEY UPDATE id = $2\nRETURNING id;"
        );
    }
}
