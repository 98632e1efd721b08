//! The clause compiler.
//!
//! [`Compiler`] is a visitor with one `visit_*` method per clause kind. Every
//! method has a default rendering; dialect compilers override only what
//! differs on their engine, in practice UPSERT. Sub-clauses are visited in
//! the order they are concatenated into the output so the bind list lines up
//! with the placeholders.

mod context;
mod join;

pub use context::CompilerContext;
pub use join::guess_join_on;

use core::fmt;

use crate::clause::{
    AggregateClause, AliasClause, BinaryExpressionClause, BindClause, Clause, CombinerClause,
    ExistsClause, ForUpdateClause, GroupByClause, HavingClause, JoinClause, JoinKind, LimitClause,
    ListClause, OrderByClause, ReturningClause, TextClause, WhereClause,
};
use crate::error::{Error, Result};
use crate::schema::{ColumnElem, TableElem};
use crate::statement::{DeleteStmt, InsertStmt, SelectStmt, UpdateStmt, UpsertStmt};

fn render_all(ctx: &mut CompilerContext<'_>, clauses: &[Clause]) -> Result<Vec<String>> {
    clauses.iter().map(|c| c.accept(ctx)).collect()
}

/// Appends `part` on a new line unless it is empty.
pub(crate) fn push_part(sql: &mut String, part: String) {
    if !part.is_empty() {
        sql.push('\n');
        sql.push_str(&part);
    }
}

/// Visitor rendering clauses to SQL text.
pub trait Compiler: fmt::Debug + Send + Sync {
    /// Raw text, verbatim.
    fn visit_text(&self, _ctx: &mut CompilerContext<'_>, text: &TextClause) -> Result<String> {
        Ok(text.text.clone())
    }

    /// A placeholder; the value is appended to the bind list.
    fn visit_bind(&self, ctx: &mut CompilerContext<'_>, bind: &BindClause) -> Result<String> {
        Ok(ctx.bind(bind.value.clone()))
    }

    /// `a, b, c`.
    fn visit_list(&self, ctx: &mut CompilerContext<'_>, list: &ListClause) -> Result<String> {
        Ok(render_all(ctx, &list.clauses)?.join(", "))
    }

    /// `name` or `table.name`.
    ///
    /// Unqualified when the column has no table, or when its table is the
    /// default table and no subquery is being rendered.
    fn visit_column(&self, ctx: &mut CompilerContext<'_>, column: &ColumnElem) -> Result<String> {
        let name = ctx.escape(column.name());
        let unqualified = column.table().is_empty()
            || (!ctx.in_subquery() && ctx.default_table() == Some(column.table()));
        if unqualified {
            Ok(name)
        } else {
            Ok(format!("{}.{name}", ctx.escape(column.table())))
        }
    }

    /// The escaped table name.
    fn visit_table(&self, ctx: &mut CompilerContext<'_>, table: &TableElem) -> Result<String> {
        Ok(ctx.escape(table.name()))
    }

    /// `inner AS name`.
    fn visit_alias(&self, ctx: &mut CompilerContext<'_>, alias: &AliasClause) -> Result<String> {
        let inner = alias.inner.accept(ctx)?;
        Ok(format!("{inner} AS {}", ctx.escape(&alias.name)))
    }

    /// `FUNC(inner)`.
    fn visit_aggregate(
        &self,
        ctx: &mut CompilerContext<'_>,
        aggregate: &AggregateClause,
    ) -> Result<String> {
        let inner = aggregate.inner.accept(ctx)?;
        Ok(format!("{}({inner})", aggregate.function.as_str()))
    }

    /// `left OP right`; `IN` lists are parenthesised and must not be empty.
    fn visit_binary(
        &self,
        ctx: &mut CompilerContext<'_>,
        binary: &BinaryExpressionClause,
    ) -> Result<String> {
        let op = binary.op.as_str();
        if let Clause::List(list) = &*binary.right {
            if binary.op.takes_list() && list.clauses.is_empty() {
                return Err(Error::EmptyList { operator: op });
            }
        }
        let left = binary.left.accept(ctx)?;
        let right = binary.right.accept(ctx)?;
        // subqueries bring their own parentheses
        if binary.op.takes_list() && !matches!(*binary.right, Clause::Select(_)) {
            Ok(format!("{left} {op} ({right})"))
        } else {
            Ok(format!("{left} {op} {right}"))
        }
    }

    /// `(a AND b)`. Empty when there is nothing to combine.
    fn visit_combiner(
        &self,
        ctx: &mut CompilerContext<'_>,
        combiner: &CombinerClause,
    ) -> Result<String> {
        if combiner.clauses.is_empty() {
            return Ok(String::new());
        }
        let parts = render_all(ctx, &combiner.clauses)?;
        let separator = format!(" {} ", combiner.combinator.as_str());
        Ok(format!("({})", parts.join(&separator)))
    }

    /// `KIND JOIN right ON condition`.
    ///
    /// The condition is guessed from foreign keys when absent and always
    /// renders table-qualified columns.
    fn visit_join(&self, ctx: &mut CompilerContext<'_>, join: &JoinClause) -> Result<String> {
        let right = join.right.accept(ctx)?;
        if join.kind == JoinKind::Cross {
            return Ok(format!("{} {right}", join.kind.as_str()));
        }
        let condition = match (&join.on, &join.left) {
            (Some(on), _) => (**on).clone(),
            (None, Some(left)) => guess_join_on(left, &join.right)?,
            (None, None) => return Err(Error::NotATable),
        };
        let previous = ctx.set_default_table(None);
        let on = condition.accept(ctx);
        ctx.set_default_table(previous);
        Ok(format!("{} {right} ON {}", join.kind.as_str(), on?))
    }

    /// `WHERE condition`.
    fn visit_where(&self, ctx: &mut CompilerContext<'_>, clause: &WhereClause) -> Result<String> {
        let condition = clause.condition.accept(ctx)?;
        if condition.is_empty() {
            return Ok(condition);
        }
        Ok(format!("WHERE {condition}"))
    }

    /// `HAVING condition`.
    fn visit_having(&self, ctx: &mut CompilerContext<'_>, clause: &HavingClause) -> Result<String> {
        let condition = clause.condition.accept(ctx)?;
        if condition.is_empty() {
            return Ok(condition);
        }
        Ok(format!("HAVING {condition}"))
    }

    /// `GROUP BY a, b`.
    fn visit_group_by(
        &self,
        ctx: &mut CompilerContext<'_>,
        clause: &GroupByClause,
    ) -> Result<String> {
        if clause.clauses.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("GROUP BY {}", render_all(ctx, &clause.clauses)?.join(", ")))
    }

    /// `ORDER BY a, b ASC`.
    fn visit_order_by(
        &self,
        ctx: &mut CompilerContext<'_>,
        clause: &OrderByClause,
    ) -> Result<String> {
        if clause.clauses.is_empty() {
            return Ok(String::new());
        }
        Ok(format!(
            "ORDER BY {} {}",
            render_all(ctx, &clause.clauses)?.join(", "),
            clause.direction.as_str()
        ))
    }

    /// `LIMIT n OFFSET m`.
    fn visit_limit(&self, _ctx: &mut CompilerContext<'_>, clause: &LimitClause) -> Result<String> {
        let mut parts = Vec::with_capacity(2);
        if let Some(count) = clause.count {
            parts.push(format!("LIMIT {count}"));
        }
        if let Some(offset) = clause.offset {
            parts.push(format!("OFFSET {offset}"));
        }
        Ok(parts.join(" "))
    }

    /// `EXISTS(subquery)`.
    fn visit_exists(&self, ctx: &mut CompilerContext<'_>, clause: &ExistsClause) -> Result<String> {
        let sql = ctx.subquery(|ctx| self.visit_select(ctx, &clause.select))?;
        let not = if clause.negated { "NOT " } else { "" };
        Ok(format!("{not}EXISTS({sql})"))
    }

    /// `FOR UPDATE [OF t1, t2]`.
    fn visit_for_update(
        &self,
        ctx: &mut CompilerContext<'_>,
        clause: &ForUpdateClause,
    ) -> Result<String> {
        if clause.tables.is_empty() {
            return Ok(String::from("FOR UPDATE"));
        }
        Ok(format!(
            "FOR UPDATE OF {}",
            render_all(ctx, &clause.tables)?.join(", ")
        ))
    }

    /// `RETURNING a, b`.
    fn visit_returning(
        &self,
        ctx: &mut CompilerContext<'_>,
        clause: &ReturningClause,
    ) -> Result<String> {
        if clause.clauses.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("RETURNING {}", render_all(ctx, &clause.clauses)?.join(", ")))
    }

    /// SELECT in fixed clause order, one clause per line.
    ///
    /// Only a bare FROM table becomes the default table. Behind an alias or
    /// a derived table every column is rendered qualified.
    fn visit_select(&self, ctx: &mut CompilerContext<'_>, select: &SelectStmt) -> Result<String> {
        Error::from_accumulated(&select.errors)?;
        match &select.from {
            Some(Clause::Table(table)) => {
                ctx.with_default_table(table.name(), |ctx| render_select(self, ctx, select))
            }
            _ => render_select(self, ctx, select),
        }
    }

    /// `INSERT INTO t(a, b)\nVALUES(?, ?)`.
    fn visit_insert(&self, ctx: &mut CompilerContext<'_>, insert: &InsertStmt) -> Result<String> {
        ctx.with_default_table(insert.table.name(), |ctx| {
            let mut sql = insert.values.render_insert(ctx, &insert.table, "INSERT", "INSERT")?;
            if let Some(returning) = &insert.returning {
                push_part(&mut sql, self.visit_returning(ctx, returning)?);
            }
            Ok(sql)
        })
    }

    /// `UPDATE t\nSET a = ?`.
    fn visit_update(&self, ctx: &mut CompilerContext<'_>, update: &UpdateStmt) -> Result<String> {
        ctx.with_default_table(update.table.name(), |ctx| {
            let set = update.values.render_set(ctx, &update.table, "UPDATE")?;
            let mut sql = format!("UPDATE {}\nSET {set}", ctx.escape(update.table.name()));
            if let Some(clause) = &update.where_ {
                push_part(&mut sql, self.visit_where(ctx, clause)?);
            }
            if let Some(returning) = &update.returning {
                push_part(&mut sql, self.visit_returning(ctx, returning)?);
            }
            Ok(sql)
        })
    }

    /// `DELETE FROM t`.
    fn visit_delete(&self, ctx: &mut CompilerContext<'_>, delete: &DeleteStmt) -> Result<String> {
        ctx.with_default_table(delete.table.name(), |ctx| {
            let mut sql = format!("DELETE FROM {}", ctx.escape(delete.table.name()));
            if let Some(clause) = &delete.where_ {
                push_part(&mut sql, self.visit_where(ctx, clause)?);
            }
            if let Some(returning) = &delete.returning {
                push_part(&mut sql, self.visit_returning(ctx, returning)?);
            }
            Ok(sql)
        })
    }

    /// UPSERT has no portable rendering; dialect compilers override this.
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, _upsert: &UpsertStmt) -> Result<String> {
        Err(Error::Unsupported {
            dialect: ctx.dialect().name(),
            operation: String::from("UPSERT"),
        })
    }
}

fn render_select<C: Compiler + ?Sized>(
    compiler: &C,
    ctx: &mut CompilerContext<'_>,
    select: &SelectStmt,
) -> Result<String> {
    let columns = if select.columns.is_empty() {
        String::from("*")
    } else {
        render_all(ctx, &select.columns)?.join(", ")
    };
    let distinct = if select.distinct { "DISTINCT " } else { "" };
    let mut sql = format!("SELECT {distinct}{columns}");

    if let Some(from) = &select.from {
        push_part(&mut sql, format!("FROM {}", from.accept(ctx)?));
    }
    for join in &select.joins {
        push_part(&mut sql, compiler.visit_join(ctx, join)?);
    }
    if let Some(clause) = &select.where_ {
        push_part(&mut sql, compiler.visit_where(ctx, clause)?);
    }
    push_part(&mut sql, compiler.visit_group_by(ctx, &select.group_by)?);
    if let Some(clause) = &select.having {
        push_part(&mut sql, compiler.visit_having(ctx, clause)?);
    }
    push_part(&mut sql, compiler.visit_order_by(ctx, &select.order_by)?);
    push_part(&mut sql, compiler.visit_limit(ctx, &select.limit)?);
    if let Some(clause) = &select.for_update {
        push_part(&mut sql, compiler.visit_for_update(ctx, clause)?);
    }
    Ok(sql)
}

/// The portable compiler. Renders everything except UPSERT.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCompiler;

impl Compiler for DefaultCompiler {}
