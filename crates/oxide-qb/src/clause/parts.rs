//! Statement parts: joins, filters, ordering, paging and locking.

use super::Clause;
use crate::statement::SelectStmt;

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `INNER JOIN`
    Inner,
    /// `LEFT JOIN`
    Left,
    /// `RIGHT JOIN`
    Right,
    /// `CROSS JOIN`
    Cross,
}

impl JoinKind {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A join of `right` onto the tables already in scope.
///
/// When `on` is `None` (and the join is not a cross join) the compiler
/// derives the condition from the foreign keys linking `left` and `right`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// Join type.
    pub kind: JoinKind,
    /// Table already in scope; only consulted to guess `on`.
    pub left: Option<Box<Clause>>,
    /// Joined table.
    pub right: Box<Clause>,
    /// Join condition.
    pub on: Option<Box<Clause>>,
}

impl JoinClause {
    /// A join with an explicit condition.
    #[must_use]
    pub fn new(kind: JoinKind, right: impl Into<Clause>, on: Clause) -> Self {
        Self {
            kind,
            left: None,
            right: Box::new(right.into()),
            on: Some(Box::new(on)),
        }
    }

    /// A join whose condition is guessed from foreign keys.
    #[must_use]
    pub fn guess(kind: JoinKind, left: impl Into<Clause>, right: impl Into<Clause>) -> Self {
        Self {
            kind,
            left: Some(Box::new(left.into())),
            right: Box::new(right.into()),
            on: None,
        }
    }

    /// `CROSS JOIN right`.
    #[must_use]
    pub fn cross(right: impl Into<Clause>) -> Self {
        Self {
            kind: JoinKind::Cross,
            left: None,
            right: Box::new(right.into()),
            on: None,
        }
    }
}

/// `WHERE condition`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    /// The condition.
    pub condition: Box<Clause>,
}

impl WhereClause {
    /// Creates a WHERE clause.
    #[must_use]
    pub fn new(condition: Clause) -> Self {
        Self {
            condition: Box::new(condition),
        }
    }
}

/// `HAVING condition`.
#[derive(Debug, Clone, PartialEq)]
pub struct HavingClause {
    /// The condition.
    pub condition: Box<Clause>,
}

impl HavingClause {
    /// Creates a HAVING clause.
    #[must_use]
    pub fn new(condition: Clause) -> Self {
        Self {
            condition: Box::new(condition),
        }
    }
}

/// `GROUP BY a, b`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupByClause {
    /// Grouping expressions.
    pub clauses: Vec<Clause>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// `ASC`
    #[default]
    Asc,
    /// `DESC`
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// `ORDER BY a, b ASC`; one direction for the whole list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderByClause {
    /// Sort expressions.
    pub clauses: Vec<Clause>,
    /// Sort direction.
    pub direction: Direction,
}

/// `LIMIT count OFFSET offset`; either part may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LimitClause {
    /// Row count.
    pub count: Option<u64>,
    /// Rows to skip.
    pub offset: Option<u64>,
}

/// `EXISTS(subquery)` or `NOT EXISTS(subquery)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsClause {
    /// The subquery.
    pub select: Box<SelectStmt>,
    /// Renders `NOT EXISTS` when set.
    pub negated: bool,
}

impl ExistsClause {
    /// Creates an EXISTS clause.
    #[must_use]
    pub fn new(select: SelectStmt, negated: bool) -> Self {
        Self {
            select: Box::new(select),
            negated,
        }
    }
}

/// `FOR UPDATE [OF t1, t2]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForUpdateClause {
    /// Tables to lock; empty locks every table in the query.
    pub tables: Vec<Clause>,
}

/// `RETURNING a, b`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReturningClause {
    /// Returned expressions.
    pub clauses: Vec<Clause>,
}

impl ReturningClause {
    /// Creates a RETURNING clause.
    #[must_use]
    pub fn new<C: Into<Clause>>(clauses: impl IntoIterator<Item = C>) -> Self {
        Self {
            clauses: clauses.into_iter().map(Into::into).collect(),
        }
    }
}
