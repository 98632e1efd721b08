//! Leaf clauses: text, bound values, lists, aliases and aggregates.

use super::Clause;
use crate::value::Value;

/// Raw SQL text, rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextClause {
    /// The SQL text.
    pub text: String,
}

impl TextClause {
    /// Creates a text clause.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A single bound value.
#[derive(Debug, Clone, PartialEq)]
pub struct BindClause {
    /// The value appended to the bind list.
    pub value: Value,
}

impl BindClause {
    /// Creates a bind clause.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Clauses joined with `", "`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListClause {
    /// The list items, in render order.
    pub clauses: Vec<Clause>,
}

impl ListClause {
    /// Creates a list clause.
    #[must_use]
    pub fn new(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: clauses.into_iter().collect(),
        }
    }
}

/// `inner AS name`.
///
/// Aliasing a table hides its foreign keys from join guessing.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasClause {
    /// Alias name.
    pub name: String,
    /// Aliased clause.
    pub inner: Box<Clause>,
}

impl AliasClause {
    /// Creates an alias.
    #[must_use]
    pub fn new(name: impl Into<String>, inner: impl Into<Clause>) -> Self {
        Self {
            name: name.into(),
            inner: Box::new(inner.into()),
        }
    }
}

/// Aggregate function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    /// `COUNT`.
    Count,
    /// `SUM`.
    Sum,
    /// `AVG`.
    Avg,
    /// `MIN`.
    Min,
    /// `MAX`.
    Max,
}

impl Aggregate {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }
}

/// `FUNC(inner)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateClause {
    /// The function.
    pub function: Aggregate,
    /// Its argument.
    pub inner: Box<Clause>,
}
