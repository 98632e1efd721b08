//! SQLite dialect.

use super::Dialect;
use crate::compiler::{push_part, Compiler, CompilerContext};
use crate::error::{Error, ErrorCategory, Result};
use crate::schema::ColumnElem;
use crate::statement::UpsertStmt;

/// SQLite dialect: backtick quoting, `?` placeholders and inline
/// `INTEGER PRIMARY KEY AUTOINCREMENT`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect {
    escaping: bool,
}

impl SqliteDialect {
    /// Creates a new SQLite dialect with escaping off.
    #[must_use]
    pub const fn new() -> Self {
        Self { escaping: false }
    }

    /// Sets identifier escaping.
    #[must_use]
    pub const fn with_escaping(mut self, escaping: bool) -> Self {
        self.escaping = escaping;
        self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_char(&self) -> Option<char> {
        Some('`')
    }

    fn escaping(&self) -> bool {
        self.escaping
    }

    fn set_escaping(&mut self, escaping: bool) {
        self.escaping = escaping;
    }

    fn supports_inline_primary_key(&self) -> bool {
        true
    }

    fn column_type(&self, column: &ColumnElem) -> String {
        if column.options().auto_increment {
            String::from("INTEGER")
        } else {
            column.ty().head(false)
        }
    }

    /// SQLite only auto-increments an `INTEGER PRIMARY KEY` column.
    fn auto_increment(&self, column: &ColumnElem, inline_primary_key: bool) -> Result<String> {
        if inline_primary_key {
            Ok(String::from("AUTOINCREMENT"))
        } else {
            Err(Error::Unsupported {
                dialect: self.name(),
                operation: format!(
                    "AUTOINCREMENT on non inline primary key column '{}'",
                    column.name()
                ),
            })
        }
    }

    fn compiler(&self) -> &dyn Compiler {
        &SqliteCompiler
    }

    /// Classifies a primary or extended result code by its primary code.
    fn classify_error(&self, code: &str) -> ErrorCategory {
        match code.parse::<u32>().map(|c| c & 0xFF) {
            Ok(19) => ErrorCategory::Integrity,
            Ok(18 | 20 | 25) => ErrorCategory::Data,
            Ok(5 | 6 | 7 | 8 | 10 | 13 | 14 | 15) => ErrorCategory::Operational,
            Ok(1 | 21) => ErrorCategory::Programming,
            Ok(2 | 11 | 26) => ErrorCategory::Internal,
            _ => ErrorCategory::Uncategorized,
        }
    }
}

/// Renders UPSERT as `REPLACE INTO`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteCompiler;

impl Compiler for SqliteCompiler {
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, upsert: &UpsertStmt) -> Result<String> {
        ctx.with_default_table(upsert.table().name(), |ctx| {
            let mut sql = upsert.render_head(ctx, "REPLACE")?;
            push_part(&mut sql, upsert.render_returning(ctx)?);
            Ok(sql)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::column;
    use crate::types::big_int;

    #[test]
    fn test_sqlite_dialect() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.name(), "sqlite");
        assert!(dialect.supports_inline_primary_key());
        assert!(!dialect.supports_returning());
        assert_eq!(dialect.column_type(&column("n", big_int())), "BIGINT");
    }

    #[test]
    fn test_classify_extended_codes() {
        let dialect = SqliteDialect::new();
        // SQLITE_CONSTRAINT_UNIQUE
        assert_eq!(dialect.classify_error("2067"), ErrorCategory::Integrity);
        assert_eq!(dialect.classify_error("19"), ErrorCategory::Integrity);
        // SQLITE_BUSY
        assert_eq!(dialect.classify_error("5"), ErrorCategory::Operational);
        assert_eq!(dialect.classify_error("1"), ErrorCategory::Programming);
        assert_eq!(dialect.classify_error("11"), ErrorCategory::Internal);
        assert_eq!(dialect.classify_error("20"), ErrorCategory::Data);
        assert_eq!(dialect.classify_error("100"), ErrorCategory::Uncategorized);
    }
}
