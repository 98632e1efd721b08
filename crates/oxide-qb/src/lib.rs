//! # oxide-qb
//!
//! A dialect-aware SQL statement builder.
//!
//! Statements are assembled from composable clause values and compiled into
//! SQL text plus an ordered list of bound values. The same clause tree
//! renders differently per dialect: identifier escaping, placeholder syntax,
//! auto-increment DDL and UPSERT syntax all come from the [`Dialect`].
//!
//! This crate provides:
//! - A closed clause tree ([`clause::Clause`]) and a visitor compiler
//! - Default, PostgreSQL, MySQL and SQLite dialects with a driver registry
//! - SELECT, INSERT, UPDATE, DELETE and UPSERT builders
//! - A table and column model with DDL rendering and join guessing from
//!   foreign keys
//!
//! ## Building a statement
//!
//! ```rust
//! use oxide_qb::clause::eq;
//! use oxide_qb::dialect::PostgresDialect;
//! use oxide_qb::schema::{column, table, ForeignKeyConstraint};
//! use oxide_qb::statement::{select, Statement};
//! use oxide_qb::types::{int, varchar};
//!
//! let user = table("user", [column("id", int()).primary_key(), column("name", varchar())]);
//! let session = table("session", [column("id", int()), column("user_id", int())])
//!     .foreign_key(ForeignKeyConstraint::new(&["user_id"], "user", &["id"]));
//!
//! let stmt = select([user.c("name"), session.c("id")])
//!     .from(&user)
//!     .inner_join_guess(&session)
//!     .where_clause(eq(user.c("name"), "alice"))
//!     .build(&PostgresDialect::new())
//!     .unwrap();
//!
//! assert_eq!(
//!     stmt.sql(),
//!     "SELECT name, session.id\n\
//!      FROM user\n\
//!      INNER JOIN session ON session.user_id = user.id\n\
//!      WHERE name = $1;"
//! );
//! ```
//!
//! ## Bound values
//!
//! Every literal handed to a comparison is bound, never inlined:
//!
//! ```rust
//! use oxide_qb::clause::eq;
//! use oxide_qb::dialect::SqliteDialect;
//! use oxide_qb::schema::{column, table};
//! use oxide_qb::statement::{select, Statement};
//! use oxide_qb::types::varchar;
//! use oxide_qb::Value;
//!
//! let user = table("user", [column("name", varchar())]);
//! let user_input = "'; DROP TABLE user; --";
//! let stmt = select([user.c("name")])
//!     .from(&user)
//!     .where_clause(eq(user.c("name"), user_input))
//!     .build(&SqliteDialect::new())
//!     .unwrap();
//!
//! assert_eq!(stmt.sql(), "SELECT name\nFROM user\nWHERE name = ?;");
//! assert_eq!(stmt.binds(), &[Value::from(user_input)]);
//! ```
//!
//! The exception is [`clause::like`], whose pattern is written into the SQL
//! as a quoted literal.

pub mod clause;
pub mod compiler;
pub mod config;
pub mod dialect;
pub mod error;
pub mod schema;
pub mod statement;
pub mod types;
pub mod value;

pub use clause::Clause;
pub use compiler::{Compiler, CompilerContext};
pub use config::DialectConfig;
pub use dialect::{new_dialect, register_dialect, Dialect};
pub use error::{Error, ErrorCategory, Result};
pub use schema::{column, table, ColumnElem, MetaData, TableElem};
pub use statement::{delete, insert, select, update, upsert, Statement, Stmt};
pub use types::TypeElem;
pub use value::Value;
