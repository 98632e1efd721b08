//! SQL dialect support.
//!
//! A dialect supplies identifier escaping, placeholder syntax, DDL hooks and
//! the compiler used for statements whose SQL differs per engine. Dialects
//! hold no compilation state apart from the escaping toggle: placeholder
//! numbering lives in [`CompilerContext`], so one dialect value can be shared
//! by concurrent compilations.
//!
//! [`CompilerContext`]: crate::compiler::CompilerContext

mod default;
mod mysql;
mod postgres;
mod registry;
mod sqlite;

pub use default::DefaultDialect;
pub use mysql::{MysqlCompiler, MysqlDialect};
pub use postgres::{PostgresCompiler, PostgresDialect};
pub use registry::{new_dialect, register_dialect, registered_drivers, DialectConstructor};
pub use sqlite::{SqliteCompiler, SqliteDialect};

use core::fmt;

use crate::compiler::Compiler;
use crate::error::{ErrorCategory, Result};
use crate::schema::ColumnElem;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the driver name of the dialect.
    fn name(&self) -> &'static str;

    /// Identifier quote character, if the dialect quotes identifiers.
    fn quote_char(&self) -> Option<char> {
        None
    }

    /// Whether identifiers are escaped.
    fn escaping(&self) -> bool;

    /// Turns identifier escaping on or off.
    fn set_escaping(&mut self, escaping: bool);

    /// Escapes an identifier.
    ///
    /// Wraps the identifier in the quote character exactly once and doubles
    /// embedded quote characters. Identity when escaping is off or the
    /// dialect has no quote character.
    fn escape(&self, ident: &str) -> String {
        match self.quote_char() {
            Some(q) if self.escaping() => {
                let doubled = ident.replace(q, &format!("{q}{q}"));
                format!("{q}{doubled}{q}")
            }
            _ => String::from(ident),
        }
    }

    /// Placeholder token for the bind at the 1-based `position`.
    fn placeholder(&self, _position: usize) -> String {
        String::from("?")
    }

    /// Whether a primary key may be declared in the column definition.
    fn supports_inline_primary_key(&self) -> bool {
        false
    }

    /// Whether integer types may be `UNSIGNED`.
    fn supports_unsigned(&self) -> bool {
        false
    }

    /// Whether INSERT/UPDATE/DELETE/UPSERT accept `RETURNING`.
    fn supports_returning(&self) -> bool {
        false
    }

    /// Type head used in the column definition.
    fn column_type(&self, column: &ColumnElem) -> String {
        column.ty().head(self.supports_unsigned())
    }

    /// Auto-increment modifier appended to an auto-increment column
    /// definition. Empty when the type itself implies it.
    /// `inline_primary_key` is set when the column definition also carries
    /// the table's primary key.
    ///
    /// # Errors
    ///
    /// Fails when the dialect cannot auto-increment this column.
    fn auto_increment(&self, column: &ColumnElem, inline_primary_key: bool) -> Result<String>;

    /// Compiler for this dialect.
    fn compiler(&self) -> &dyn Compiler;

    /// Maps a native driver error code into an [`ErrorCategory`].
    fn classify_error(&self, _code: &str) -> ErrorCategory {
        ErrorCategory::Uncategorized
    }
}

/// Classifies a sqlx error for `dialect`.
///
/// Database errors are classified by their native code; pool, I/O and
/// protocol failures are operational.
#[cfg(feature = "sqlx")]
#[must_use]
pub fn classify_sqlx_error(dialect: &dyn Dialect, error: &sqlx::Error) -> ErrorCategory {
    match error {
        sqlx::Error::Database(db) => db
            .code()
            .map_or(ErrorCategory::Uncategorized, |code| dialect.classify_error(&code)),
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => ErrorCategory::Operational,
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::Encode(_) => {
            ErrorCategory::Data
        }
        sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Configuration(_) => ErrorCategory::Programming,
        _ => ErrorCategory::Uncategorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_wraps_once() {
        let pg = PostgresDialect::new().with_escaping(true);
        assert_eq!(pg.escape("x"), r#""x""#);
        assert_eq!(pg.escape(&pg.escape("x")), r#""""x""""#);
        assert_ne!(pg.escape(&pg.escape("x")), pg.escape("x"));
    }

    #[test]
    fn test_escape_toggle() {
        let mut mysql = MysqlDialect::new();
        assert_eq!(mysql.escape("user"), "user");
        mysql.set_escaping(true);
        assert_eq!(mysql.escape("user"), "`user`");
        assert_eq!(mysql.escape("a`b"), "`a``b`");
        mysql.set_escaping(false);
        assert_eq!(mysql.escape("user"), "user");
    }

    #[test]
    fn test_default_never_escapes() {
        let mut dialect = DefaultDialect::new();
        dialect.set_escaping(true);
        assert_eq!(dialect.escape("user"), "user");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(PostgresDialect::new().placeholder(3), "$3");
        assert_eq!(MysqlDialect::new().placeholder(3), "?");
        assert_eq!(SqliteDialect::new().placeholder(1), "?");
        assert_eq!(DefaultDialect::new().placeholder(9), "?");
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_classify_sqlx_error() {
        let pg = PostgresDialect::new();
        assert_eq!(
            classify_sqlx_error(&pg, &sqlx::Error::PoolTimedOut),
            ErrorCategory::Operational
        );
        assert_eq!(
            classify_sqlx_error(&pg, &sqlx::Error::ColumnNotFound(String::from("x"))),
            ErrorCategory::Programming
        );
        assert_eq!(
            classify_sqlx_error(&pg, &sqlx::Error::RowNotFound),
            ErrorCategory::Uncategorized
        );
    }
}
