//! INSERT statement builder.

use super::{Assignments, Statement};
use crate::clause::{Clause, ReturningClause};
use crate::compiler::CompilerContext;
use crate::error::Result;
use crate::schema::TableElem;
use crate::value::Value;

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStmt {
    pub(crate) table: TableElem,
    pub(crate) values: Assignments,
    pub(crate) returning: Option<ReturningClause>,
}

/// Starts an INSERT into `table`.
#[must_use]
pub fn insert(table: &TableElem) -> InsertStmt {
    InsertStmt {
        table: table.clone(),
        values: Assignments::default(),
        returning: None,
    }
}

impl InsertStmt {
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

    /// Adds `RETURNING`. Only meaningful on dialects that support it.
    #[must_use]
    pub fn returning<C: Into<Clause>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.returning = Some(ReturningClause::new(columns));
        self
    }
}

impl Statement for InsertStmt {
    fn compile(&self, ctx: &mut CompilerContext<'_>) -> Result<String> {
        ctx.compiler().visit_insert(ctx, self)
    }
}
