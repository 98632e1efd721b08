#![allow(dead_code)]

use oxide_qb::dialect::{DefaultDialect, Dialect, MysqlDialect, PostgresDialect, SqliteDialect};
use oxide_qb::schema::{column, table, ForeignKeyAction, ForeignKeyConstraint, TableElem};
use oxide_qb::statement::{Statement, Stmt};
use oxide_qb::types::{boolean, int, text, timestamp, varchar};

pub fn user() -> TableElem {
    table(
        "user",
        [
            column("id", int()).primary_key().auto_increment(),
            column("email", varchar().size(120).not_null().unique()),
            column("name", varchar().null()),
            column("active", boolean().default(true)),
        ],
    )
}

pub fn session() -> TableElem {
    table(
        "session",
        [
            column("id", varchar().size(64)),
            column("user_id", int().not_null()),
            column("expires", timestamp()),
        ],
    )
    .primary_key(&["id"])
    .foreign_key(
        ForeignKeyConstraint::new(&["user_id"], "user", &["id"]).on_delete(ForeignKeyAction::Cascade),
    )
    .index(&["user_id"])
}

pub fn address() -> TableElem {
    table(
        "address",
        [
            column("id", int()).primary_key(),
            column("user_id", int()),
            column("billing_user_id", int()),
            column("street", text()),
        ],
    )
    .foreign_key(ForeignKeyConstraint::new(&["user_id"], "user", &["id"]))
    .foreign_key(ForeignKeyConstraint::new(&["billing_user_id"], "user", &["id"]))
}

pub fn dialects() -> Vec<Box<dyn Dialect>> {
    vec![
        Box::new(DefaultDialect::new()),
        Box::new(PostgresDialect::new()),
        Box::new(MysqlDialect::new()),
        Box::new(SqliteDialect::new()),
    ]
}

pub fn build(stmt: &impl Statement, dialect: &dyn Dialect) -> Stmt {
    stmt.build(dialect)
        .unwrap_or_else(|e| panic!("Failed to build for {}: {e}", dialect.name()))
}

/// Counts `?` or `$n` placeholders outside quoted literals.
pub fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    let mut in_literal = false;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => in_literal = !in_literal,
            '?' if !in_literal => count += 1,
            '$' if !in_literal && chars.peek().is_some_and(char::is_ascii_digit) => count += 1,
            _ => {}
        }
    }
    count
}
