//! PostgreSQL dialect.

use super::Dialect;
use crate::compiler::{push_part, Compiler, CompilerContext};
use crate::error::{ErrorCategory, Result};
use crate::schema::ColumnElem;
use crate::statement::UpsertStmt;

/// PostgreSQL dialect: `"` quoting, `$n` placeholders, `SERIAL` columns and
/// `RETURNING`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect {
    escaping: bool,
}

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect with escaping off.
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

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_char(&self) -> Option<char> {
        Some('"')
    }

    fn escaping(&self) -> bool {
        self.escaping
    }

    fn set_escaping(&mut self, escaping: bool) {
        self.escaping = escaping;
    }

    fn placeholder(&self, position: usize) -> String {
        format!("${position}")
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn column_type(&self, column: &ColumnElem) -> String {
        if !column.options().auto_increment {
            return column.ty().head(false);
        }
        match column.ty().name() {
            "BIGINT" => String::from("BIGSERIAL"),
            "SMALLINT" | "TINYINT" => String::from("SMALLSERIAL"),
            _ => String::from("SERIAL"),
        }
    }

    // implied by the SERIAL type
    fn auto_increment(&self, _column: &ColumnElem, _inline_primary_key: bool) -> Result<String> {
        Ok(String::new())
    }

    fn compiler(&self) -> &dyn Compiler {
        &PostgresCompiler
    }

    fn classify_error(&self, code: &str) -> ErrorCategory {
        classify_sqlstate(code)
    }
}

/// Classifies a five-character SQLSTATE by its class (first two characters).
pub(crate) fn classify_sqlstate(code: &str) -> ErrorCategory {
    match code.get(..2) {
        Some("23") => ErrorCategory::Integrity,
        Some("22") => ErrorCategory::Data,
        Some("08" | "40" | "53" | "54" | "55" | "57" | "58") => ErrorCategory::Operational,
        Some("0A" | "26" | "34" | "3D" | "3F" | "42" | "44") => ErrorCategory::Programming,
        Some("XX") => ErrorCategory::Internal,
        _ => ErrorCategory::Uncategorized,
    }
}

/// Renders UPSERT as `INSERT ... ON CONFLICT (...) DO UPDATE SET ...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresCompiler;

impl Compiler for PostgresCompiler {
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, upsert: &UpsertStmt) -> Result<String> {
        ctx.with_default_table(upsert.table().name(), |ctx| {
            let target: Vec<String> = upsert
                .conflict_columns()?
                .iter()
                .map(|c| ctx.escape(c))
                .collect();
            let head = upsert.render_head(ctx, "INSERT")?;
            let set = upsert.render_set(ctx)?;
            let mut sql = format!(
                "{head}\nON CONFLICT ({}) DO UPDATE SET {set}",
                target.join(", ")
            );
            push_part(&mut sql, upsert.render_returning(ctx)?);
            Ok(sql)
        })
    }
}
