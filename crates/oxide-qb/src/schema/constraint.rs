//! Table-level constraints: foreign keys, unique keys and indexes.

use crate::dialect::Dialect;

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL keyword(s) for the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// `FOREIGN KEY (cols) REFERENCES table (cols)`.
///
/// Columns pair up positionally with the referenced columns, so a composite
/// key keeps its declared column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyConstraint {
    columns: Vec<String>,
    ref_table: String,
    ref_columns: Vec<String>,
    on_delete: Option<ForeignKeyAction>,
    on_update: Option<ForeignKeyAction>,
}

impl ForeignKeyConstraint {
    /// Creates a foreign key from `columns` to `ref_columns` of `ref_table`.
    #[must_use]
    pub fn new(columns: &[&str], ref_table: impl Into<String>, ref_columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            ref_table: ref_table.into(),
            ref_columns: ref_columns.iter().map(|c| String::from(*c)).collect(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the `ON DELETE` action.
    #[must_use]
    pub const fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the `ON UPDATE` action.
    #[must_use]
    pub const fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Local columns.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Referenced table name.
    #[must_use]
    pub fn ref_table(&self) -> &str {
        &self.ref_table
    }

    /// Referenced columns.
    #[must_use]
    pub fn ref_columns(&self) -> &[String] {
        &self.ref_columns
    }

    /// Renders the constraint for `CREATE TABLE`.
    #[must_use]
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        let cols: Vec<String> = self.columns.iter().map(|c| dialect.escape(c)).collect();
        let refs: Vec<String> = self.ref_columns.iter().map(|c| dialect.escape(c)).collect();
        let mut sql = format!(
            "FOREIGN KEY({}) REFERENCES {}({})",
            cols.join(", "),
            dialect.escape(&self.ref_table),
            refs.join(", ")
        );
        if let Some(action) = self.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = self.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        sql
    }
}

/// `CONSTRAINT name UNIQUE (cols)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKeyConstraint {
    name: String,
    columns: Vec<String>,
}

impl UniqueKeyConstraint {
    /// Creates a unique key named `u_<table>_<cols>`.
    #[must_use]
    pub fn new(table: &str, columns: &[&str]) -> Self {
        Self {
            name: format!("u_{table}_{}", columns.join("_")),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
        }
    }

    /// Constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns covered by the key.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Renders the constraint for `CREATE TABLE`.
    #[must_use]
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        let cols: Vec<String> = self.columns.iter().map(|c| dialect.escape(c)).collect();
        format!(
            "CONSTRAINT {} UNIQUE({})",
            dialect.escape(&self.name),
            cols.join(", ")
        )
    }
}

/// `CREATE [UNIQUE] INDEX name ON table (cols)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexElem {
    name: String,
    table: String,
    columns: Vec<String>,
    unique: bool,
}

impl IndexElem {
    /// Creates an index named `i_<table>_<cols>`.
    #[must_use]
    pub fn new(table: &str, columns: &[&str]) -> Self {
        Self {
            name: format!("i_{table}_{}", columns.join("_")),
            table: String::from(table),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            unique: false,
        }
    }

    /// Makes the index unique.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Indexed columns.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Renders the `CREATE INDEX` statement.
    #[must_use]
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        let cols: Vec<String> = self.columns.iter().map(|c| dialect.escape(c)).collect();
        format!(
            "CREATE {}INDEX {} ON {}({});",
            if self.unique { "UNIQUE " } else { "" },
            dialect.escape(&self.name),
            dialect.escape(&self.table),
            cols.join(", ")
        )
    }
}
