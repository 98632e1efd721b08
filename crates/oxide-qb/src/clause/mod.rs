//! The clause tree.
//!
//! [`Clause`] is a closed sum type: every SQL fragment the compiler knows how
//! to render is one variant. Rendering goes through [`Clause::accept`], which
//! dispatches to the matching `visit_*` method of the context's compiler.
//!
//! ```rust
//! use oxide_qb::clause::{and, eq, not_eq};
//! use oxide_qb::compiler::CompilerContext;
//! use oxide_qb::dialect::DefaultDialect;
//! use oxide_qb::schema::column;
//! use oxide_qb::types::varchar;
//!
//! let cond = and([
//!     eq(column("col1", varchar()), "v1"),
//!     not_eq(column("col2", varchar()), 1),
//! ]);
//! let dialect = DefaultDialect::new();
//! let mut ctx = CompilerContext::new(&dialect);
//! assert_eq!(cond.accept(&mut ctx).unwrap(), "(col1 = ? AND col2 != ?)");
//! assert_eq!(ctx.binds().len(), 2);
//! ```

mod elements;
mod expr;
mod parts;

pub use elements::{Aggregate, AggregateClause, AliasClause, BindClause, ListClause, TextClause};
pub use expr::{
    alias, and, avg, bind, count, eq, exists, gt, gte, in_list, in_select, is_not_null, is_null,
    like, lt, lte, max, min, not_eq, not_exists, not_in_list, not_like, or, sql_text, sum,
    BinaryExpressionClause, Combinator, CombinerClause, Operator,
};
pub use parts::{
    Direction, ExistsClause, ForUpdateClause, GroupByClause, HavingClause, JoinClause, JoinKind,
    LimitClause, OrderByClause, ReturningClause, WhereClause,
};

use crate::compiler::CompilerContext;
use crate::error::Result;
use crate::schema::{ColumnElem, TableElem};
use crate::statement::{DeleteStmt, InsertStmt, SelectStmt, UpdateStmt, UpsertStmt};
use crate::value::Value;

/// A node of the SQL fragment tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Raw SQL text.
    Text(TextClause),
    /// A bound value, rendered as a placeholder.
    Bind(BindClause),
    /// Comma-separated clauses.
    List(ListClause),
    /// A column reference.
    Column(ColumnElem),
    /// A table reference.
    Table(TableElem),
    /// `inner AS name`.
    Alias(AliasClause),
    /// `COUNT(x)`, `SUM(x)`, ...
    Aggregate(AggregateClause),
    /// `left OP right`.
    Binary(BinaryExpressionClause),
    /// `(a AND b)`, `(a OR b)`.
    Combiner(CombinerClause),
    /// A join with an optional ON condition.
    Join(JoinClause),
    /// `WHERE ...`.
    Where(WhereClause),
    /// `HAVING ...`.
    Having(HavingClause),
    /// `GROUP BY ...`.
    GroupBy(GroupByClause),
    /// `ORDER BY ... ASC|DESC`.
    OrderBy(OrderByClause),
    /// `LIMIT ... OFFSET ...`.
    Limit(LimitClause),
    /// `EXISTS(...)`, `NOT EXISTS(...)`.
    Exists(ExistsClause),
    /// `FOR UPDATE [OF ...]`.
    ForUpdate(ForUpdateClause),
    /// `RETURNING ...`.
    Returning(ReturningClause),
    /// A nested SELECT, rendered as a parenthesised subquery.
    Select(Box<SelectStmt>),
    /// INSERT statement.
    Insert(Box<InsertStmt>),
    /// UPDATE statement.
    Update(Box<UpdateStmt>),
    /// DELETE statement.
    Delete(Box<DeleteStmt>),
    /// UPSERT statement.
    Upsert(Box<UpsertStmt>),
}

impl Clause {
    /// Renders the clause into `ctx`, appending its bound values to the
    /// context in the order their placeholders appear.
    ///
    /// # Errors
    ///
    /// Propagates any usage error raised while rendering the subtree.
    pub fn accept(&self, ctx: &mut CompilerContext<'_>) -> Result<String> {
        let compiler = ctx.compiler();
        match self {
            Self::Text(c) => compiler.visit_text(ctx, c),
            Self::Bind(c) => compiler.visit_bind(ctx, c),
            Self::List(c) => compiler.visit_list(ctx, c),
            Self::Column(c) => compiler.visit_column(ctx, c),
            Self::Table(c) => compiler.visit_table(ctx, c),
            Self::Alias(c) => compiler.visit_alias(ctx, c),
            Self::Aggregate(c) => compiler.visit_aggregate(ctx, c),
            Self::Binary(c) => compiler.visit_binary(ctx, c),
            Self::Combiner(c) => compiler.visit_combiner(ctx, c),
            Self::Join(c) => compiler.visit_join(ctx, c),
            Self::Where(c) => compiler.visit_where(ctx, c),
            Self::Having(c) => compiler.visit_having(ctx, c),
            Self::GroupBy(c) => compiler.visit_group_by(ctx, c),
            Self::OrderBy(c) => compiler.visit_order_by(ctx, c),
            Self::Limit(c) => compiler.visit_limit(ctx, c),
            Self::Exists(c) => compiler.visit_exists(ctx, c),
            Self::ForUpdate(c) => compiler.visit_for_update(ctx, c),
            Self::Returning(c) => compiler.visit_returning(ctx, c),
            Self::Select(s) => {
                let sql = ctx.subquery(|ctx| compiler.visit_select(ctx, s))?;
                Ok(format!("({sql})"))
            }
            Self::Insert(s) => compiler.visit_insert(ctx, s),
            Self::Update(s) => compiler.visit_update(ctx, s),
            Self::Delete(s) => compiler.visit_delete(ctx, s),
            Self::Upsert(s) => compiler.visit_upsert(ctx, s),
        }
    }
}

impl From<ColumnElem> for Clause {
    fn from(column: ColumnElem) -> Self {
        Self::Column(column)
    }
}

impl From<&ColumnElem> for Clause {
    fn from(column: &ColumnElem) -> Self {
        Self::Column(column.clone())
    }
}

impl From<TableElem> for Clause {
    fn from(table: TableElem) -> Self {
        Self::Table(table)
    }
}

impl From<&TableElem> for Clause {
    fn from(table: &TableElem) -> Self {
        Self::Table(table.clone())
    }
}

impl From<SelectStmt> for Clause {
    fn from(select: SelectStmt) -> Self {
        Self::Select(Box::new(select))
    }
}

impl From<InsertStmt> for Clause {
    fn from(stmt: InsertStmt) -> Self {
        Self::Insert(Box::new(stmt))
    }
}

impl From<UpdateStmt> for Clause {
    fn from(stmt: UpdateStmt) -> Self {
        Self::Update(Box::new(stmt))
    }
}

impl From<DeleteStmt> for Clause {
    fn from(stmt: DeleteStmt) -> Self {
        Self::Delete(Box::new(stmt))
    }
}

impl From<UpsertStmt> for Clause {
    fn from(stmt: UpsertStmt) -> Self {
        Self::Upsert(Box::new(stmt))
    }
}

/// The right-hand side of a comparison.
///
/// Plain values become bound placeholders; clauses, columns and subqueries
/// are rendered in place.
pub trait IntoOperand {
    /// Converts into the operand clause.
    fn into_operand(self) -> Clause;
}

macro_rules! impl_bound_operand {
    ($($ty:ty),+) => {
        $(
            impl IntoOperand for $ty {
                fn into_operand(self) -> Clause {
                    Clause::Bind(BindClause::new(self))
                }
            }
        )+
    };
}

impl_bound_operand!(
    bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, &str, String, &String, Vec<u8>, Value
);

impl<T: Into<Value>> IntoOperand for Option<T> {
    fn into_operand(self) -> Clause {
        Clause::Bind(BindClause::new(self))
    }
}

impl IntoOperand for Clause {
    fn into_operand(self) -> Clause {
        self
    }
}

impl IntoOperand for ColumnElem {
    fn into_operand(self) -> Clause {
        Clause::Column(self)
    }
}

impl IntoOperand for &ColumnElem {
    fn into_operand(self) -> Clause {
        Clause::Column(self.clone())
    }
}

impl IntoOperand for SelectStmt {
    fn into_operand(self) -> Clause {
        Clause::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DefaultDialect;
    use crate::schema::table;
    use crate::statement::select;
    use crate::types::int;

    #[test]
    fn test_operands() {
        assert!(matches!(5.into_operand(), Clause::Bind(_)));
        assert!(matches!(None::<i32>.into_operand(), Clause::Bind(b) if b.value.is_null()));
        assert!(matches!(sql_text("NOW()").into_operand(), Clause::Text(_)));
    }

    #[test]
    fn test_subquery_is_parenthesised_and_qualified() {
        let user = table("user", [crate::schema::column("id", int())]);
        let sub = Clause::from(select([user.c("id")]).from(&user));
        let dialect = DefaultDialect::new();
        let mut ctx = CompilerContext::new(&dialect);
        assert_eq!(
            sub.accept(&mut ctx).unwrap(),
            "(SELECT user.id\nFROM user)"
        );
        assert!(!ctx.in_subquery());
    }
}
