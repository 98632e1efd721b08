//! Expressions and the clause constructor vocabulary.

use super::elements::{Aggregate, AggregateClause, AliasClause, BindClause, ListClause, TextClause};
use super::parts::ExistsClause;
use super::{Clause, IntoOperand};
use crate::statement::SelectStmt;
use crate::value::Value;

/// Binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
    /// `IS`
    Is,
    /// `IS NOT`
    IsNot,
}

impl Operator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }

    /// `IN` and `NOT IN` parenthesise their right operand.
    #[must_use]
    pub const fn takes_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

/// `left OP right`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpressionClause {
    /// Left operand.
    pub left: Box<Clause>,
    /// Operator.
    pub op: Operator,
    /// Right operand.
    pub right: Box<Clause>,
}

impl BinaryExpressionClause {
    /// Creates a binary expression.
    #[must_use]
    pub fn new(left: impl Into<Clause>, op: Operator, right: impl IntoOperand) -> Self {
        Self {
            left: Box::new(left.into()),
            op,
            right: Box::new(right.into_operand()),
        }
    }
}

/// Logical combinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl Combinator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Sub-clauses joined by a combinator and parenthesised.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinerClause {
    /// `AND` or `OR`.
    pub combinator: Combinator,
    /// Combined clauses.
    pub clauses: Vec<Clause>,
}

fn binary(left: impl Into<Clause>, op: Operator, right: impl IntoOperand) -> Clause {
    Clause::Binary(BinaryExpressionClause::new(left, op, right))
}

/// `left = right`.
pub fn eq(left: impl Into<Clause>, right: impl IntoOperand) -> Clause {
    binary(left, Operator::Eq, right)
}

/// `left != right`.
pub fn not_eq(left: impl Into<Clause>, right: impl IntoOperand) -> Clause {
    binary(left, Operator::NotEq, right)
}

/// `left > right`.
pub fn gt(left: impl Into<Clause>, right: impl IntoOperand) -> Clause {
    binary(left, Operator::Gt, right)
}

/// `left >= right`.
pub fn gte(left: impl Into<Clause>, right: impl IntoOperand) -> Clause {
    binary(left, Operator::Gte, right)
}

/// `left < right`.
pub fn lt(left: impl Into<Clause>, right: impl IntoOperand) -> Clause {
    binary(left, Operator::Lt, right)
}

/// `left <= right`.
pub fn lte(left: impl Into<Clause>, right: impl IntoOperand) -> Clause {
    binary(left, Operator::Lte, right)
}

/// `left LIKE 'pattern'`.
///
/// The pattern is written into the SQL text as a quoted literal, not bound.
/// Single quotes are doubled, but the pattern must still never come from
/// untrusted input.
pub fn like(left: impl Into<Clause>, pattern: &str) -> Clause {
    binary(left, Operator::Like, sql_text(Value::from(pattern).literal()))
}

/// `left NOT LIKE 'pattern'`. Inlined like [`like`].
pub fn not_like(left: impl Into<Clause>, pattern: &str) -> Clause {
    binary(left, Operator::NotLike, sql_text(Value::from(pattern).literal()))
}

fn bound_list<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Clause {
    Clause::List(ListClause::new(values.into_iter().map(bind)))
}

/// `left IN (?, ?, ...)`, one placeholder per value in the given order.
///
/// An empty list fails to build with [`Error::EmptyList`].
///
/// [`Error::EmptyList`]: crate::error::Error::EmptyList
pub fn in_list<V: Into<Value>>(
    left: impl Into<Clause>,
    values: impl IntoIterator<Item = V>,
) -> Clause {
    binary(left, Operator::In, bound_list(values))
}

/// `left NOT IN (?, ?, ...)`.
pub fn not_in_list<V: Into<Value>>(
    left: impl Into<Clause>,
    values: impl IntoIterator<Item = V>,
) -> Clause {
    binary(left, Operator::NotIn, bound_list(values))
}

/// `left IN (SELECT ...)`.
pub fn in_select(left: impl Into<Clause>, select: SelectStmt) -> Clause {
    binary(left, Operator::In, select)
}

/// `left IS NULL`.
pub fn is_null(left: impl Into<Clause>) -> Clause {
    binary(left, Operator::Is, sql_text("NULL"))
}

/// `left IS NOT NULL`.
pub fn is_not_null(left: impl Into<Clause>) -> Clause {
    binary(left, Operator::IsNot, sql_text("NULL"))
}

/// `(a AND b AND ...)`.
pub fn and(clauses: impl IntoIterator<Item = Clause>) -> Clause {
    Clause::Combiner(CombinerClause {
        combinator: Combinator::And,
        clauses: clauses.into_iter().collect(),
    })
}

/// `(a OR b OR ...)`.
pub fn or(clauses: impl IntoIterator<Item = Clause>) -> Clause {
    Clause::Combiner(CombinerClause {
        combinator: Combinator::Or,
        clauses: clauses.into_iter().collect(),
    })
}

fn aggregate(function: Aggregate, inner: impl Into<Clause>) -> Clause {
    Clause::Aggregate(AggregateClause {
        function,
        inner: Box::new(inner.into()),
    })
}

/// `COUNT(inner)`. Use `count(sql_text("*"))` for `COUNT(*)`.
pub fn count(inner: impl Into<Clause>) -> Clause {
    aggregate(Aggregate::Count, inner)
}

/// `SUM(inner)`.
pub fn sum(inner: impl Into<Clause>) -> Clause {
    aggregate(Aggregate::Sum, inner)
}

/// `AVG(inner)`.
pub fn avg(inner: impl Into<Clause>) -> Clause {
    aggregate(Aggregate::Avg, inner)
}

/// `MIN(inner)`.
pub fn min(inner: impl Into<Clause>) -> Clause {
    aggregate(Aggregate::Min, inner)
}

/// `MAX(inner)`.
pub fn max(inner: impl Into<Clause>) -> Clause {
    aggregate(Aggregate::Max, inner)
}

/// A bound value.
pub fn bind(value: impl Into<Value>) -> Clause {
    Clause::Bind(BindClause::new(value))
}

/// Raw SQL text, rendered as given.
pub fn sql_text(text: impl Into<String>) -> Clause {
    Clause::Text(TextClause::new(text))
}

/// `inner AS name`.
pub fn alias(name: impl Into<String>, inner: impl Into<Clause>) -> Clause {
    Clause::Alias(AliasClause::new(name, inner))
}

/// `EXISTS(SELECT ...)`.
pub fn exists(select: SelectStmt) -> Clause {
    Clause::Exists(ExistsClause::new(select, false))
}

/// `NOT EXISTS(SELECT ...)`.
pub fn not_exists(select: SelectStmt) -> Clause {
    Clause::Exists(ExistsClause::new(select, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompilerContext;
    use crate::dialect::{DefaultDialect, PostgresDialect};
    use crate::schema::{column, table};
    use crate::statement::select;
    use crate::types::{int, varchar};

    fn render(clause: &Clause) -> (String, Vec<Value>) {
        let dialect = DefaultDialect::new();
        let mut ctx = CompilerContext::new(&dialect);
        let sql = clause.accept(&mut ctx).unwrap();
        (sql, ctx.take_binds())
    }

    #[test]
    fn test_comparisons_bind_values() {
        let age = column("age", int());
        assert_eq!(render(&gt(&age, 18)).0, "age > ?");
        assert_eq!(render(&gte(&age, 18)).0, "age >= ?");
        assert_eq!(render(&lt(&age, 18)).0, "age < ?");
        assert_eq!(render(&lte(&age, 18)).1, vec![Value::Int(18)]);
    }

    #[test]
    fn test_combiner_nesting() {
        let a = column("a", int());
        let b = column("b", int());
        let c = column("c", int());
        let clause = or([and([eq(&a, 1), eq(&b, 2)]), eq(&c, 3)]);
        let (sql, binds) = render(&clause);
        assert_eq!(sql, "((a = ? AND b = ?) OR c = ?)");
        assert_eq!(binds, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_like_is_inlined() {
        let name = column("name", varchar());
        let (sql, binds) = render(&like(&name, "O'B%"));
        assert_eq!(sql, "name LIKE 'O''B%'");
        assert!(binds.is_empty());
        assert_eq!(render(&not_like(&name, "a%")).0, "name NOT LIKE 'a%'");
    }

    #[test]
    fn test_in_list_placeholders_in_order() {
        let id = column("id", int());
        let dialect = PostgresDialect::new();
        let mut ctx = CompilerContext::new(&dialect);
        let sql = in_list(&id, [3, 1, 2]).accept(&mut ctx).unwrap();
        assert_eq!(sql, "id IN ($1, $2, $3)");
        assert_eq!(ctx.binds(), &[Value::Int(3), Value::Int(1), Value::Int(2)]);
        let sql = not_in_list(&id, ["x"]).accept(&mut ctx).unwrap();
        assert_eq!(sql, "id NOT IN ($4)");
    }

    #[test]
    fn test_in_select_not_double_parenthesised() {
        let user = table("user", [column("id", int())]);
        let session = table("session", [column("user_id", int())]);
        let clause = in_select(session.c("user_id"), select([user.c("id")]).from(&user));
        assert_eq!(
            render(&clause).0,
            "session.user_id IN (SELECT user.id\nFROM user)"
        );
    }

    #[test]
    fn test_null_checks_and_aggregates() {
        let email = column("email", varchar());
        assert_eq!(render(&is_null(&email)).0, "email IS NULL");
        assert_eq!(render(&is_not_null(&email)).0, "email IS NOT NULL");
        assert_eq!(render(&count(sql_text("*"))).0, "COUNT(*)");
        assert_eq!(render(&max(&email)).0, "MAX(email)");
        assert_eq!(render(&alias("n", count(&email))).0, "COUNT(email) AS n");
    }

    #[test]
    fn test_null_operand_is_bound() {
        let email = column("email", varchar());
        let (sql, binds) = render(&eq(&email, None::<&str>));
        assert_eq!(sql, "email = ?");
        assert_eq!(binds, vec![Value::Null]);
    }
}
