//! Blog schema example.
//!
//! Builds the same statements for every built-in dialect and prints the SQL
//! with its binds. Set `OXIDE_QB_DRIVER` to pick a single dialect.
//!
//! Run with: cargo run --example blog

use oxide_qb::clause::{and, count, eq, gt, like};
use oxide_qb::config::DialectConfig;
use oxide_qb::dialect::new_dialect;
use oxide_qb::schema::{column, table, ForeignKeyAction, ForeignKeyConstraint, MetaData};
use oxide_qb::statement::{delete, insert, select, upsert, Statement};
use oxide_qb::types::{int, text, timestamp, varchar};
use oxide_qb::{Dialect, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn schema() -> MetaData {
    MetaData::new()
        .with_table(
            table(
                "author",
                [
                    column("id", int()).primary_key().auto_increment(),
                    column("name", varchar().size(80).not_null().unique()),
                ],
            ),
        )
        .with_table(
            table(
                "post",
                [
                    column("id", int()).primary_key().auto_increment(),
                    column("author_id", int().not_null()),
                    column("title", varchar().not_null()),
                    column("body", text()),
                    column("published", timestamp().null()),
                ],
            )
            .foreign_key(
                ForeignKeyConstraint::new(&["author_id"], "author", &["id"])
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .index(&["author_id"]),
        )
}

fn show(dialect: &dyn Dialect, stmt: &impl Statement) -> Result<()> {
    let built = stmt.build(dialect)?;
    println!("{}\n  binds: {:?}\n", built.sql(), built.binds());
    Ok(())
}

fn run(dialect: &dyn Dialect, meta: &MetaData) -> Result<()> {
    println!("-- {} --\n", dialect.name());
    for ddl in meta.create_all(dialect)? {
        println!("{ddl}\n");
    }

    let (Some(author), Some(post)) = (meta.table("author"), meta.table("post")) else {
        return Ok(());
    };

    show(dialect, &insert(author).value("name", "ada"))?;

    let prolific = select([author.c("name").into(), count(post.c("id"))])
        .from(author)
        .inner_join_guess(post)
        .where_clause(and([
            like(post.c("title"), "Rust%"),
            gt(post.c("author_id"), 0),
        ]))
        .group_by([author.c("name")])
        .order_by([author.c("name")])
        .limit(10);
    show(dialect, &prolific)?;

    let touch = upsert(author).value("id", 1).value("name", "ada");
    match touch.build(dialect) {
        Ok(built) => println!("{}\n  binds: {:?}\n", built.sql(), built.binds()),
        Err(e) => println!("upsert skipped: {e}\n"),
    }

    show(dialect, &delete(post).where_clause(eq(post.c("author_id"), 1)))?;

    for ddl in meta.drop_all(dialect) {
        println!("{ddl}");
    }
    println!();
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let meta = schema();
    if std::env::var_os(oxide_qb::config::DRIVER_ENV).is_some() {
        let dialect = DialectConfig::from_env()?.dialect();
        run(dialect.as_ref(), &meta)?;
    } else {
        for driver in ["default", "postgres", "mysql", "sqlite"] {
            let mut dialect = new_dialect(driver);
            dialect.set_escaping(true);
            run(dialect.as_ref(), &meta)?;
        }
    }
    Ok(())
}
