//! SELECT statement builder.

use super::Statement;
use crate::clause::{
    Clause, Direction, ForUpdateClause, GroupByClause, HavingClause, JoinClause, JoinKind,
    LimitClause, OrderByClause, WhereClause,
};
use crate::compiler::CompilerContext;
use crate::error::{Error, Result};

/// A SELECT statement.
///
/// Clauses render in fixed order: select list, FROM, joins, WHERE, GROUP BY,
/// HAVING, ORDER BY, LIMIT/OFFSET, FOR UPDATE. Empty parts are omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStmt {
    pub(crate) columns: Vec<Clause>,
    pub(crate) distinct: bool,
    pub(crate) from: Option<Clause>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) where_: Option<WhereClause>,
    pub(crate) group_by: GroupByClause,
    pub(crate) having: Option<HavingClause>,
    pub(crate) order_by: OrderByClause,
    pub(crate) limit: LimitClause,
    pub(crate) for_update: Option<ForUpdateClause>,
    pub(crate) errors: Vec<Error>,
}

/// Starts a SELECT of `columns`. An empty list selects `*`.
#[must_use]
pub fn select<C: Into<Clause>>(columns: impl IntoIterator<Item = C>) -> SelectStmt {
    SelectStmt {
        columns: columns.into_iter().map(Into::into).collect(),
        ..SelectStmt::default()
    }
}

impl SelectStmt {
    /// Creates a `SELECT *`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `DISTINCT`.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Sets the FROM source: a table, an alias or a subquery.
    #[must_use]
    pub fn from(mut self, source: impl Into<Clause>) -> Self {
        self.from = Some(source.into());
        self
    }

    /// Adds a prepared join.
    #[must_use]
    pub fn join_clause(mut self, join: JoinClause) -> Self {
        self.joins.push(join);
        self
    }

    /// Adds a join with an explicit condition.
    #[must_use]
    pub fn join(self, kind: JoinKind, right: impl Into<Clause>, on: Clause) -> Self {
        self.join_clause(JoinClause::new(kind, right, on))
    }

    /// `INNER JOIN right ON on`.
    #[must_use]
    pub fn inner_join(self, right: impl Into<Clause>, on: Clause) -> Self {
        self.join(JoinKind::Inner, right, on)
    }

    /// `LEFT JOIN right ON on`.
    #[must_use]
    pub fn left_join(self, right: impl Into<Clause>, on: Clause) -> Self {
        self.join(JoinKind::Left, right, on)
    }

    /// `RIGHT JOIN right ON on`.
    #[must_use]
    pub fn right_join(self, right: impl Into<Clause>, on: Clause) -> Self {
        self.join(JoinKind::Right, right, on)
    }

    /// `CROSS JOIN right`.
    #[must_use]
    pub fn cross_join(self, right: impl Into<Clause>) -> Self {
        self.join_clause(JoinClause::cross(right))
    }

    /// Joins `right` to the FROM table on the condition derived from the
    /// foreign keys linking them.
    ///
    /// Without a FROM clause the statement fails to build with
    /// [`Error::NotATable`].
    #[must_use]
    pub fn join_guess(mut self, kind: JoinKind, right: impl Into<Clause>) -> Self {
        match self.from.clone() {
            Some(left) => self.join_clause(JoinClause::guess(kind, left, right)),
            None => {
                self.errors.push(Error::NotATable);
                self
            }
        }
    }

    /// `INNER JOIN` with a guessed condition.
    #[must_use]
    pub fn inner_join_guess(self, right: impl Into<Clause>) -> Self {
        self.join_guess(JoinKind::Inner, right)
    }

    /// `LEFT JOIN` with a guessed condition.
    #[must_use]
    pub fn left_join_guess(self, right: impl Into<Clause>) -> Self {
        self.join_guess(JoinKind::Left, right)
    }

    /// Sets the WHERE condition, replacing any previous one.
    #[must_use]
    pub fn where_clause(mut self, condition: Clause) -> Self {
        self.where_ = Some(WhereClause::new(condition));
        self
    }

    /// Appends GROUP BY expressions.
    #[must_use]
    pub fn group_by<C: Into<Clause>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.group_by.clauses.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Sets the HAVING condition.
    #[must_use]
    pub fn having(mut self, condition: Clause) -> Self {
        self.having = Some(HavingClause::new(condition));
        self
    }

    /// Appends ORDER BY expressions.
    #[must_use]
    pub fn order_by<C: Into<Clause>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.order_by.clauses.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Sorts ascending (the default).
    #[must_use]
    pub const fn asc(mut self) -> Self {
        self.order_by.direction = Direction::Asc;
        self
    }

    /// Sorts descending.
    #[must_use]
    pub const fn desc(mut self) -> Self {
        self.order_by.direction = Direction::Desc;
        self
    }

    /// Sets `LIMIT`.
    #[must_use]
    pub const fn limit(mut self, count: u64) -> Self {
        self.limit.count = Some(count);
        self
    }

    /// Sets `OFFSET`.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.limit.offset = Some(offset);
        self
    }

    /// Adds `FOR UPDATE`.
    #[must_use]
    pub fn for_update(mut self) -> Self {
        self.for_update = Some(ForUpdateClause::default());
        self
    }

    /// Adds `FOR UPDATE OF tables`.
    #[must_use]
    pub fn for_update_of<C: Into<Clause>>(mut self, tables: impl IntoIterator<Item = C>) -> Self {
        self.for_update = Some(ForUpdateClause {
            tables: tables.into_iter().map(Into::into).collect(),
        });
        self
    }
}

impl Statement for SelectStmt {
    fn compile(&self, ctx: &mut CompilerContext<'_>) -> Result<String> {
        ctx.compiler().visit_select(ctx, self)
    }
}
