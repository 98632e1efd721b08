//! Statement builders.
//!
//! Every builder is a plain value: chained calls consume it and return the
//! modified statement, so a partially built statement can be cloned and
//! branched into variants.
//!
//! # Example
//!
//! ```rust
//! use oxide_qb::clause::eq;
//! use oxide_qb::dialect::DefaultDialect;
//! use oxide_qb::schema::{column, table};
//! use oxide_qb::statement::{select, Statement};
//! use oxide_qb::types::{int, varchar};
//! use oxide_qb::Value;
//!
//! let user = table("user", [column("id", int()), column("name", varchar())]);
//! let stmt = select([user.c("name")])
//!     .from(&user)
//!     .where_clause(eq(user.c("id"), 5))
//!     .build(&DefaultDialect::new())
//!     .unwrap();
//!
//! assert_eq!(stmt.sql(), "SELECT name\nFROM user\nWHERE id = ?;");
//! assert_eq!(stmt.binds(), &[Value::Int(5)]);
//! ```

mod delete;
mod insert;
mod select;
mod update;
mod upsert;

pub use delete::{delete, DeleteStmt};
pub use insert::{insert, InsertStmt};
pub use select::{select, SelectStmt};
pub use update::{update, UpdateStmt};
pub use upsert::{upsert, UpsertStmt};

use core::fmt;
use std::collections::BTreeMap;

use tracing::debug;

use crate::compiler::CompilerContext;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::schema::{ColumnElem, TableElem};
use crate::value::Value;

/// Compiled SQL text and its bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    sql: String,
    binds: Vec<Value>,
}

impl Stmt {
    /// SQL text, terminated by a semicolon.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values in placeholder order.
    #[must_use]
    pub fn binds(&self) -> &[Value] {
        &self.binds
    }

    /// Splits into SQL text and binds.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.binds)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// A top-level statement.
pub trait Statement {
    /// Renders the statement body (without the trailing semicolon).
    ///
    /// # Errors
    ///
    /// Returns the usage errors of the statement or its clauses.
    fn compile(&self, ctx: &mut CompilerContext<'_>) -> Result<String>;

    /// Compiles against `dialect` in a fresh context, so placeholder
    /// numbering starts at 1.
    ///
    /// # Errors
    ///
    /// Returns the usage errors of the statement or its clauses.
    fn build(&self, dialect: &dyn Dialect) -> Result<Stmt> {
        let mut ctx = CompilerContext::new(dialect);
        self.build_in(&mut ctx)
    }

    /// Compiles into an existing context.
    ///
    /// Placeholder numbering continues from the statements already compiled
    /// into `ctx` until [`CompilerContext::reset`] is called. The returned
    /// binds are the ones this statement added. On error the context is left
    /// as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns the usage errors of the statement or its clauses.
    fn build_in(&self, ctx: &mut CompilerContext<'_>) -> Result<Stmt> {
        let checkpoint = ctx.checkpoint();
        match self.compile(ctx) {
            Ok(body) => {
                let sql = format!("{body};");
                let binds = ctx.binds_since(checkpoint).to_vec();
                debug!(
                    dialect = ctx.dialect().name(),
                    sql = %sql,
                    binds = binds.len(),
                    "built statement"
                );
                Ok(Stmt { sql, binds })
            }
            Err(err) => {
                ctx.restore(checkpoint);
                Err(err)
            }
        }
    }
}

/// Column values of INSERT, UPDATE and UPSERT.
///
/// Values are keyed by column name and emitted in the table's declaration
/// order. Unknown columns are recorded and reported at build time.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Assignments {
    values: BTreeMap<String, Value>,
    errors: Vec<Error>,
}

impl Assignments {
    pub(crate) fn set(&mut self, table: &TableElem, column: &str, value: Value) {
        if table.get(column).is_some() {
            self.values.insert(String::from(column), value);
        } else {
            self.errors.push(Error::UnknownColumn {
                table: String::from(table.name()),
                column: String::from(column),
            });
        }
    }

    pub(crate) fn record(&mut self, error: Error) {
        self.errors.push(error);
    }

    fn checked<'t>(
        &self,
        table: &'t TableElem,
        statement: &'static str,
    ) -> Result<Vec<(&'t ColumnElem, &Value)>> {
        Error::from_accumulated(&self.errors)?;
        let ordered: Vec<_> = table
            .columns()
            .iter()
            .filter_map(|c| self.values.get(c.name()).map(|v| (c, v)))
            .collect();
        if ordered.is_empty() {
            return Err(Error::EmptyValues {
                statement,
                table: String::from(table.name()),
            });
        }
        Ok(ordered)
    }

    /// `VERB INTO t(a, b)\nVALUES(?, ?)`.
    pub(crate) fn render_insert(
        &self,
        ctx: &mut CompilerContext<'_>,
        table: &TableElem,
        statement: &'static str,
        verb: &str,
    ) -> Result<String> {
        let ordered = self.checked(table, statement)?;
        let columns: Vec<String> = ordered.iter().map(|(c, _)| ctx.escape(c.name())).collect();
        let placeholders: Vec<String> = ordered
            .into_iter()
            .map(|(_, v)| ctx.bind(v.clone()))
            .collect();
        Ok(format!(
            "{verb} INTO {}({})\nVALUES({})",
            ctx.escape(table.name()),
            columns.join(", "),
            placeholders.join(", ")
        ))
    }

    /// `a = ?, b = ?`.
    pub(crate) fn render_set(
        &self,
        ctx: &mut CompilerContext<'_>,
        table: &TableElem,
        statement: &'static str,
    ) -> Result<String> {
        let ordered = self.checked(table, statement)?;
        let parts: Vec<String> = ordered
            .into_iter()
            .map(|(c, v)| {
                let column = ctx.escape(c.name());
                format!("{column} = {}", ctx.bind(v.clone()))
            })
            .collect();
        Ok(parts.join(", "))
    }
}
