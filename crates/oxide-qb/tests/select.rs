//! SELECT rendering.

mod common;
use common::*;

use oxide_qb::clause::{and, count, eq, in_list, in_select, not_eq, not_exists, sql_text};
use oxide_qb::compiler::CompilerContext;
use oxide_qb::dialect::{DefaultDialect, Dialect, MysqlDialect, PostgresDialect, SqliteDialect};
use oxide_qb::schema::{column, table};
use oxide_qb::statement::{select, SelectStmt, Statement};
use oxide_qb::types::{int, varchar};
use oxide_qb::Value;

#[test]
fn select_round_trip_shape() {
    let t = table("T", [column("A", int()), column("B", int()), column("x", int())]);
    let built = select([t.c("A"), t.c("B")])
        .from(&t)
        .where_clause(eq(t.c("x"), 5))
        .order_by([t.c("x")])
        .limit(10)
        .offset(0)
        .build(&DefaultDialect::new())
        .unwrap();
    assert_eq!(
        built.sql(),
        "SELECT A, B\nFROM T\nWHERE x = ?\nORDER BY x ASC\nLIMIT 10 OFFSET 0;"
    );
    assert_eq!(built.binds(), &[Value::Int(5)]);
}

#[test]
fn combiner_nesting_on_every_dialect() {
    let col1 = column("col1", varchar());
    let col2 = column("col2", int());
    let clause = and([eq(&col1, "v1"), not_eq(&col2, 1)]);
    let expected: [(Box<dyn Dialect>, &str); 4] = [
        (Box::new(DefaultDialect::new()), "(col1 = ? AND col2 != ?)"),
        (Box::new(PostgresDialect::new()), "(col1 = $1 AND col2 != $2)"),
        (Box::new(MysqlDialect::new().with_escaping(true)), "(`col1` = ? AND `col2` != ?)"),
        (Box::new(SqliteDialect::new()), "(col1 = ? AND col2 != ?)"),
    ];
    for (dialect, sql) in expected {
        let mut ctx = CompilerContext::new(dialect.as_ref());
        assert_eq!(clause.accept(&mut ctx).unwrap(), sql);
        assert_eq!(ctx.binds(), &[Value::from("v1"), Value::Int(1)]);
    }
}

#[test]
fn escaped_select() {
    let user = user();
    let session = session();
    let built = select([user.c("email"), session.c("expires")])
        .from(&user)
        .inner_join_guess(&session)
        .where_clause(eq(user.c("active"), true))
        .build(&PostgresDialect::new().with_escaping(true))
        .unwrap();
    assert_eq!(
        built.sql(),
        "SELECT \"email\", \"session\".\"expires\"\n\
         FROM \"user\"\n\
         INNER JOIN \"session\" ON \"session\".\"user_id\" = \"user\".\"id\"\n\
         WHERE \"active\" = $1;"
    );
}

#[test]
fn subqueries_are_qualified() {
    let user = user();
    let session = session();
    let active_sessions = select([session.c("user_id")])
        .from(&session)
        .where_clause(eq(session.c("expires"), sql_text("NOW()")));
    let built = select([user.c("id")])
        .from(&user)
        .where_clause(in_select(user.c("id"), active_sessions))
        .build(&DefaultDialect::new())
        .unwrap();
    assert_eq!(
        built.sql(),
        "SELECT id\n\
         FROM user\n\
         WHERE id IN (SELECT session.user_id\n\
         FROM session\n\
         WHERE session.expires = NOW());"
    );
}

#[test]
fn derived_table_and_aggregates() {
    let user = user();
    let built = select([count(sql_text("*"))])
        .from(oxide_qb::clause::alias("u", select([user.c("id")]).from(&user)))
        .build(&DefaultDialect::new())
        .unwrap();
    assert_eq!(
        built.sql(),
        "SELECT COUNT(*)\nFROM (SELECT user.id\nFROM user) AS u;"
    );
}

#[test]
fn not_exists_binds_in_order() {
    let user = user();
    let session = session();
    let built = select([user.c("id")])
        .from(&user)
        .where_clause(and([
            eq(user.c("active"), true),
            not_exists(
                SelectStmt::new()
                    .from(&session)
                    .where_clause(eq(session.c("user_id"), 9)),
            ),
        ]))
        .build(&PostgresDialect::new())
        .unwrap();
    assert_eq!(
        built.sql(),
        "SELECT id\n\
         FROM user\n\
         WHERE (active = $1 AND NOT EXISTS(SELECT *\n\
         FROM session\n\
         WHERE session.user_id = $2));"
    );
    assert_eq!(built.binds(), &[Value::Bool(true), Value::Int(9)]);
}

#[test]
fn empty_in_list_fails_to_build() {
    let t = table("t", [column("id", int())]);
    let err = select([t.c("id")])
        .from(&t)
        .where_clause(and([eq(t.c("id"), 1), in_list(t.c("id"), Vec::<i32>::new())]))
        .build(&PostgresDialect::new())
        .unwrap_err();
    assert_eq!(err, oxide_qb::Error::EmptyList { operator: "IN" });
}
