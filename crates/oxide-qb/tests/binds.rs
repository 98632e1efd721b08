//! Placeholder and bind alignment across dialects.

mod common;
use common::*;

use oxide_qb::clause::{and, eq, gt, in_list, like, or};
use oxide_qb::compiler::CompilerContext;
use oxide_qb::dialect::PostgresDialect;
use oxide_qb::statement::{delete, insert, select, update, Statement};
use oxide_qb::Value;

#[test]
fn placeholders_match_binds_on_every_dialect() {
    let user = user();
    let stmt = select([user.c("id")])
        .from(&user)
        .where_clause(and([
            eq(user.c("active"), true),
            or([gt(user.c("id"), 10), in_list(user.c("name"), ["a", "b", "c"])]),
            like(user.c("email"), "%@example.com"),
        ]))
        .limit(10);

    for dialect in dialects() {
        let built = build(&stmt, dialect.as_ref());
        assert_eq!(count_placeholders(built.sql()), 5, "{}", dialect.name());
        assert_eq!(
            built.binds(),
            &[
                Value::Bool(true),
                Value::Int(10),
                Value::from("a"),
                Value::from("b"),
                Value::from("c"),
            ]
        );
    }
}

#[test]
fn postgres_numbering_follows_source_order() {
    let user = user();
    let stmt = update(&user)
        .set("name", "x")
        .set("active", false)
        .where_clause(eq(user.c("id"), 7));
    let built = build(&stmt, &PostgresDialect::new());
    assert_eq!(
        built.sql(),
        "UPDATE user\nSET name = $1, active = $2\nWHERE id = $3;"
    );
    assert_eq!(
        built.binds(),
        &[Value::from("x"), Value::Bool(false), Value::Int(7)]
    );
}

#[test]
fn build_always_starts_at_one() {
    let user = user();
    let stmt = delete(&user).where_clause(eq(user.c("id"), 1));
    let dialect = PostgresDialect::new();
    let first = build(&stmt, &dialect);
    let second = build(&stmt, &dialect);
    assert_eq!(first, second);
    assert!(second.sql().ends_with("WHERE id = $1;"));
}

#[test]
fn shared_context_continues_numbering_until_reset() {
    let user = user();
    let dialect = PostgresDialect::new();
    let mut ctx = CompilerContext::new(&dialect);

    let a = insert(&user).value("email", "a@b.c").value("name", "a");
    let b = delete(&user).where_clause(eq(user.c("id"), 3));

    let first = a.build_in(&mut ctx).unwrap();
    assert_eq!(first.sql(), "INSERT INTO user(email, name)\nVALUES($1, $2);");
    let second = b.build_in(&mut ctx).unwrap();
    assert_eq!(second.sql(), "DELETE FROM user\nWHERE id = $3;");
    assert_eq!(second.binds(), &[Value::Int(3)]);
    assert_eq!(ctx.binds().len(), 3);

    ctx.reset();
    let third = b.build_in(&mut ctx).unwrap();
    assert_eq!(third.sql(), "DELETE FROM user\nWHERE id = $1;");
}

#[test]
fn failed_build_leaves_context_untouched() {
    let user = user();
    let dialect = PostgresDialect::new();
    let mut ctx = CompilerContext::new(&dialect);
    insert(&user).value("name", "a").build_in(&mut ctx).unwrap();

    let broken = insert(&user).value("name", "b").value("nope", 1);
    assert!(broken.build_in(&mut ctx).is_err());
    assert_eq!(ctx.placeholder_count(), 1);

    let next = delete(&user)
        .where_clause(eq(user.c("id"), 2))
        .build_in(&mut ctx)
        .unwrap();
    assert!(next.sql().ends_with("$2;"));
}

#[test]
fn statements_without_values_bind_nothing() {
    let user = user();
    for dialect in dialects() {
        let built = build(&select([user.c("id")]).from(&user), dialect.as_ref());
        assert!(built.binds().is_empty());
        assert_eq!(count_placeholders(built.sql()), 0);
    }
}

#[test]
fn shared_dialect_numbers_each_build_from_one() {
    let dialect = PostgresDialect::new();
    let user = user();
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8_i64)
            .map(|i| {
                let (dialect, user) = (&dialect, &user);
                scope.spawn(move || {
                    let stmt = update(user)
                        .set("name", format!("user-{i}"))
                        .where_clause(eq(user.c("id"), i));
                    (0..50)
                        .map(|_| stmt.build(dialect).map(oxide_qb::Stmt::into_parts))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, builds) in results.into_iter().enumerate() {
        for built in builds {
            let (sql, binds) = built.unwrap();
            assert_eq!(sql, "UPDATE user\nSET name = $1\nWHERE id = $2;");
            assert_eq!(
                binds,
                vec![Value::from(format!("user-{i}")), Value::Int(i64::try_from(i).unwrap())]
            );
        }
    }
}
