//! Per-compilation state.

use crate::dialect::Dialect;
use crate::value::Value;

use super::Compiler;

/// Mutable state of one compilation pass.
///
/// Holds the bind list, the placeholder counter, the default table used to
/// decide column qualification and the subquery depth. A context is cheap to
/// create; [`Statement::build`] makes a fresh one per call. Sharing a context
/// across several statements through [`Statement::build_in`] keeps placeholder
/// numbering running until [`CompilerContext::reset`] is called.
///
/// [`Statement::build`]: crate::statement::Statement::build
/// [`Statement::build_in`]: crate::statement::Statement::build_in
#[derive(Debug)]
pub struct CompilerContext<'a> {
    dialect: &'a dyn Dialect,
    compiler: &'a dyn Compiler,
    binds: Vec<Value>,
    placeholders: usize,
    default_table: Option<String>,
    subquery_depth: usize,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    binds: usize,
    placeholders: usize,
}

impl<'a> CompilerContext<'a> {
    /// Creates a context compiling with the dialect's own compiler.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self::with_compiler(dialect, dialect.compiler())
    }

    /// Creates a context with an explicit compiler.
    #[must_use]
    pub fn with_compiler(dialect: &'a dyn Dialect, compiler: &'a dyn Compiler) -> Self {
        Self {
            dialect,
            compiler,
            binds: Vec::new(),
            placeholders: 0,
            default_table: None,
            subquery_depth: 0,
        }
    }

    /// The active dialect.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// The active compiler.
    #[must_use]
    pub fn compiler(&self) -> &'a dyn Compiler {
        self.compiler
    }

    /// Values bound so far, in placeholder order.
    #[must_use]
    pub fn binds(&self) -> &[Value] {
        &self.binds
    }

    /// Takes the bound values, leaving the placeholder counter untouched.
    pub fn take_binds(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.binds)
    }

    /// Appends a value and returns its placeholder.
    pub fn bind(&mut self, value: Value) -> String {
        self.binds.push(value);
        self.placeholders += 1;
        self.dialect.placeholder(self.placeholders)
    }

    /// Number of placeholders emitted since creation or the last reset.
    #[must_use]
    pub const fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    /// Restores the initial state: no binds, numbering back at 1.
    pub fn reset(&mut self) {
        self.binds.clear();
        self.placeholders = 0;
        self.default_table = None;
        self.subquery_depth = 0;
    }

    /// Table whose columns render unqualified.
    #[must_use]
    pub fn default_table(&self) -> Option<&str> {
        self.default_table.as_deref()
    }

    /// Sets the default table, returning the previous one.
    pub fn set_default_table(&mut self, table: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.default_table, table)
    }

    /// Runs `f` with `table` as default table, then restores the previous one.
    pub fn with_default_table<T>(&mut self, table: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.set_default_table(Some(String::from(table)));
        let out = f(self);
        self.default_table = previous;
        out
    }

    /// Whether a subquery is being rendered.
    #[must_use]
    pub const fn in_subquery(&self) -> bool {
        self.subquery_depth > 0
    }

    /// Runs `f` as a nested subquery render. Inside it every column is
    /// table-qualified; the default table and depth are restored afterwards.
    pub fn subquery<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.default_table.clone();
        self.subquery_depth += 1;
        let out = f(self);
        self.subquery_depth -= 1;
        self.default_table = previous;
        out
    }

    /// Escapes an identifier with the active dialect.
    #[must_use]
    pub fn escape(&self, ident: &str) -> String {
        self.dialect.escape(ident)
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            binds: self.binds.len(),
            placeholders: self.placeholders,
        }
    }

    pub(crate) fn binds_since(&self, checkpoint: Checkpoint) -> &[Value] {
        self.binds.get(checkpoint.binds..).unwrap_or_default()
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.binds.truncate(checkpoint.binds);
        self.placeholders = checkpoint.placeholders;
    }
}
