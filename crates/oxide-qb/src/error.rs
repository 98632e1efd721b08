//! Error types for statement compilation.

/// Errors raised while building or compiling statements.
///
/// All of these are usage errors: the clause tree is structurally invalid for
/// the requested dialect and no SQL is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The operation has no rendering on this dialect.
    #[error("{operation} is not supported by the {dialect} dialect")]
    Unsupported {
        /// Dialect name.
        dialect: &'static str,
        /// What was attempted.
        operation: String,
    },

    /// No foreign key links the two sides of a join.
    #[error("no foreign key between '{left}' and '{right}'")]
    NoForeignKey {
        /// Left table name.
        left: String,
        /// Right table name.
        right: String,
    },

    /// More than one foreign key links the two sides of a join.
    #[error("{count} foreign keys between '{left}' and '{right}', join condition is ambiguous")]
    AmbiguousForeignKey {
        /// Left table name.
        left: String,
        /// Right table name.
        right: String,
        /// Number of candidate foreign keys.
        count: usize,
    },

    /// A join side is an alias, which hides the table's foreign keys.
    #[error("cannot guess a join condition through alias '{alias}'")]
    AliasedJoin {
        /// The alias name.
        alias: String,
    },

    /// A join side is neither a table nor an alias.
    #[error("cannot guess a join condition for a non-table clause")]
    NotATable,

    /// A value was supplied for a column the table does not declare.
    #[error("column '{column}' does not exist in table '{table}'")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// INSERT, UPDATE or UPSERT without any values.
    #[error("{statement} on '{table}' has no values")]
    EmptyValues {
        /// Statement keyword.
        statement: &'static str,
        /// Table name.
        table: String,
    },

    /// UPSERT needs a conflict target but the table has no primary key.
    #[error("upsert on '{table}' needs a primary key or an explicit conflict target")]
    MissingConflictTarget {
        /// Table name.
        table: String,
    },

    /// `IN` or `NOT IN` with no values.
    #[error("{operator} needs at least one value")]
    EmptyList {
        /// The operator, `IN` or `NOT IN`.
        operator: &'static str,
    },

    /// A foreign key used for join guessing has no columns, or a different
    /// number of local and referenced columns.
    #[error("foreign key from '{table}' to '{ref_table}' has mismatched columns")]
    InvalidForeignKey {
        /// Table declaring the key.
        table: String,
        /// Referenced table.
        ref_table: String,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Multiple errors were accumulated while building a statement.
    #[error("Multiple errors occurred:\n{}", .0.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n"))]
    Multiple(Vec<Error>),
}

impl Error {
    /// Collapses accumulated errors: none is `Ok`, one is returned as-is,
    /// several become [`Error::Multiple`].
    pub(crate) fn from_accumulated(errors: &[Self]) -> Result<()> {
        match errors {
            [] => Ok(()),
            [single] => Err(single.clone()),
            many => Err(Self::Multiple(many.to_vec())),
        }
    }
}

/// Result type for statement compilation.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of database driver errors.
///
/// Lets calling code branch on the kind of failure without knowing each
/// driver's error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Constraint violation (unique, foreign key, not null, check).
    Integrity,
    /// Bad data: out of range, invalid format, truncation.
    Data,
    /// Connection, resource or locking problems outside the caller's control.
    Operational,
    /// Invalid SQL or references to missing objects.
    Programming,
    /// Internal database failure or corruption.
    Internal,
    /// Anything not covered above.
    Uncategorized,
}
