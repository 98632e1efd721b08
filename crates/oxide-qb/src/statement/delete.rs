//! DELETE statement builder.

use super::Statement;
use crate::clause::{Clause, ReturningClause, WhereClause};
use crate::compiler::CompilerContext;
use crate::error::Result;
use crate::schema::TableElem;

/// A DELETE statement.
///
/// `RETURNING` is rendered on every dialect; engines without it reject the
/// SQL when it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStmt {
    pub(crate) table: TableElem,
    pub(crate) where_: Option<WhereClause>,
    pub(crate) returning: Option<ReturningClause>,
}

/// Starts a DELETE from `table`.
#[must_use]
pub fn delete(table: &TableElem) -> DeleteStmt {
    DeleteStmt {
        table: table.clone(),
        where_: None,
        returning: None,
    }
}

impl DeleteStmt {
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

impl Statement for DeleteStmt {
    fn compile(&self, ctx: &mut CompilerContext<'_>) -> Result<String> {
        ctx.compiler().visit_delete(ctx, self)
    }
}
