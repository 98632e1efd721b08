//! Default dialect.

use super::Dialect;
use crate::compiler::{Compiler, DefaultCompiler};
use crate::error::Result;
use crate::schema::ColumnElem;

/// A generic dialect: `?` placeholders and no identifier escaping.
///
/// Used for unregistered driver names. It has no UPSERT rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDialect;

impl DefaultDialect {
    /// Creates a new default dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for DefaultDialect {
    fn name(&self) -> &'static str {
        "default"
    }

    fn escaping(&self) -> bool {
        false
    }

    fn set_escaping(&mut self, _escaping: bool) {}

    fn auto_increment(&self, _column: &ColumnElem, _inline_primary_key: bool) -> Result<String> {
        Ok(String::from("AUTO INCREMENT"))
    }

    fn compiler(&self) -> &dyn Compiler {
        &DefaultCompiler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::schema::column;
    use crate::types::int;

    #[test]
    fn test_default_dialect() {
        let dialect = DefaultDialect::new();
        assert_eq!(dialect.name(), "default");
        assert_eq!(dialect.quote_char(), None);
        assert!(!dialect.supports_inline_primary_key());
        assert!(!dialect.supports_unsigned());
        assert!(!dialect.supports_returning());
        assert_eq!(dialect.classify_error("23505"), ErrorCategory::Uncategorized);
    }

    #[test]
    fn test_auto_increment() {
        let id = column("id", int()).auto_increment();
        assert_eq!(
            id.definition(&DefaultDialect::new(), false),
            Ok(String::from("id INT AUTO INCREMENT"))
        );
    }
}
