//! UPDATE statement builder.

use super::{Assignments, Statement};
use crate::clause::{Clause, ReturningClause, WhereClause};
use crate::compiler::CompilerContext;
use crate::error::Result;
use crate::schema::TableElem;
use crate::value::Value;

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStmt {
    pub(crate) table: TableElem,
    pub(crate) values: Assignments,
    pub(crate) where_: Option<WhereClause>,
    pub(crate) returning: Option<ReturningClause>,
}

/// Starts an UPDATE of `table`.
#[must_use]
pub fn update(table: &TableElem) -> UpdateStmt {
    UpdateStmt {
        table: table.clone(),
        values: Assignments::default(),
        where_: None,
        returning: None,
    }
}

impl UpdateStmt {
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
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.values.set(&self.table, column, value.into());
        self
    }

    /// Sets the WHERE condition, replacing any previous one.
    #[must_use]
    pub fn where_clause(mut self, condition: Clause) -> Self {
        self.where_ = Some(WhereClause::new(condition));
        self
    }

    /// Adds `RETURNING`.
    #[must_use]
    pub fn returning<C: Into<Clause>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.returning = Some(ReturningClause::new(columns));
        self
    }
}

impl Statement for UpdateStmt {
    fn compile(&self, ctx: &mut CompilerContext<'_>) -> Result<String> {
        ctx.compiler().visit_update(ctx, self)
    }
}
