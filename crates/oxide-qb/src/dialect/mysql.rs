//! MySQL dialect.

use super::postgres::classify_sqlstate;
use super::Dialect;
use crate::compiler::{push_part, Compiler, CompilerContext};
use crate::error::{ErrorCategory, Result};
use crate::schema::ColumnElem;
use crate::statement::UpsertStmt;

/// MySQL dialect: backtick quoting, `?` placeholders, `UNSIGNED` integers and
/// `AUTO_INCREMENT`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDialect {
    escaping: bool,
}

impl MysqlDialect {
    /// Creates a new MySQL dialect with escaping off.
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

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
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

    fn supports_unsigned(&self) -> bool {
        true
    }

    fn auto_increment(&self, _column: &ColumnElem, _inline_primary_key: bool) -> Result<String> {
        Ok(String::from("AUTO_INCREMENT"))
    }

    fn compiler(&self) -> &dyn Compiler {
        &MysqlCompiler
    }

    /// Accepts either a server error number (`"1062"`) or a SQLSTATE.
    fn classify_error(&self, code: &str) -> ErrorCategory {
        if code.len() == 5 {
            return classify_sqlstate(code);
        }
        match code.parse::<u32>() {
            Ok(1022 | 1048 | 1062 | 1169 | 1216 | 1217 | 1451 | 1452 | 1557 | 1586 | 3819) => {
                ErrorCategory::Integrity
            }
            Ok(1264 | 1265 | 1292 | 1366 | 1406 | 1411) => ErrorCategory::Data,
            Ok(1040 | 1053 | 1205 | 1213 | 2002 | 2003 | 2006 | 2013) => {
                ErrorCategory::Operational
            }
            Ok(1049 | 1052 | 1054 | 1064 | 1142 | 1146) => ErrorCategory::Programming,
            _ => ErrorCategory::Uncategorized,
        }
    }
}

/// Renders UPSERT as `INSERT ... ON DUPLICATE KEY UPDATE ...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlCompiler;

impl Compiler for MysqlCompiler {
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, upsert: &UpsertStmt) -> Result<String> {
        ctx.with_default_table(upsert.table().name(), |ctx| {
            let head = upsert.render_head(ctx, "INSERT")?;
            let set = upsert.render_set(ctx)?;
            let mut sql = format!("{head}\nON DUPLICATE KEY UPDATE {set}");
            push_part(&mut sql, upsert.render_returning(ctx)?);
            Ok(sql)
        })
    }
}
