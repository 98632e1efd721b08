//! Column data types and column-level constraints.
//!
//! A [`TypeElem`] is plain data: every mutator consumes the value and returns
//! the modified copy, so a shared base type is reused by cloning it.
//!
//! ```rust
//! use oxide_qb::dialect::DefaultDialect;
//! use oxide_qb::types::varchar;
//!
//! let email = varchar().size(120).not_null().unique();
//! assert_eq!(email.render(&DefaultDialect::new()), "VARCHAR(120) NOT NULL UNIQUE");
//! ```

use crate::dialect::Dialect;
use crate::value::Value;

/// A column-level constraint attached to a type.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// `NULL`.
    Null,
    /// `NOT NULL`.
    NotNull,
    /// `DEFAULT <literal>`.
    Default(Value),
    /// Raw constraint text, rendered as given.
    Custom(String),
}

impl Constraint {
    /// Returns the SQL for the constraint.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::NotNull => String::from("NOT NULL"),
            Self::Default(value) => format!("DEFAULT {}", value.literal()),
            Self::Custom(sql) => sql.clone(),
        }
    }
}

/// A column data type with its constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeElem {
    name: String,
    size: Option<u32>,
    precision: Option<(u16, u16)>,
    unsigned: bool,
    unique: bool,
    constraints: Vec<Constraint>,
}

impl TypeElem {
    /// Creates a type with the given SQL name (e.g. `"JSONB"`).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            precision: None,
            unsigned: false,
            unique: false,
            constraints: Vec::new(),
        }
    }

    /// Returns the SQL type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the size, if set.
    #[must_use]
    pub const fn size_value(&self) -> Option<u32> {
        self.size
    }

    /// Returns whether the type is unsigned.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    /// Returns whether the type carries `UNIQUE`.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    /// Returns the attached constraints in declaration order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Sets the size, e.g. `VARCHAR(40)`. Size wins over precision.
    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets precision and scale, e.g. `DECIMAL(10, 2)`.
    #[must_use]
    pub const fn precision(mut self, precision: u16, scale: u16) -> Self {
        self.precision = Some((precision, scale));
        self
    }

    /// Marks the type unsigned. Ignored by dialects without unsigned types.
    #[must_use]
    pub const fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Clears the unsigned flag.
    #[must_use]
    pub const fn signed(mut self) -> Self {
        self.unsigned = false;
        self
    }

    /// Adds `UNIQUE`.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Adds `NULL`.
    #[must_use]
    pub fn null(self) -> Self {
        self.constraint(Constraint::Null)
    }

    /// Adds `NOT NULL`.
    #[must_use]
    pub fn not_null(self) -> Self {
        self.constraint(Constraint::NotNull)
    }

    /// Adds `DEFAULT <value>`.
    #[must_use]
    pub fn default(self, value: impl Into<Value>) -> Self {
        self.constraint(Constraint::Default(value.into()))
    }

    /// Attaches an arbitrary constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Renders the type head: name, size or precision, and `UNSIGNED` when
    /// the dialect supports it.
    #[must_use]
    pub fn head(&self, supports_unsigned: bool) -> String {
        let mut sql = self.name.clone();
        if let Some(size) = self.size {
            sql.push_str(&format!("({size})"));
        } else if let Some((precision, scale)) = self.precision {
            sql.push_str(&format!("({precision}, {scale})"));
        }
        if self.unsigned && supports_unsigned {
            sql.push_str(" UNSIGNED");
        }
        sql
    }

    /// Renders the constraints, `UNIQUE` last. Empty when there are none.
    #[must_use]
    pub fn constraints_sql(&self) -> String {
        let mut parts: Vec<String> = self.constraints.iter().map(Constraint::to_sql).collect();
        if self.unique {
            parts.push(String::from("UNIQUE"));
        }
        parts.join(" ")
    }

    /// Renders the full type declaration for a dialect.
    #[must_use]
    pub fn render(&self, dialect: &dyn Dialect) -> String {
        let head = self.head(dialect.supports_unsigned());
        let constraints = self.constraints_sql();
        if constraints.is_empty() {
            head
        } else {
            format!("{head} {constraints}")
        }
    }
}

/// `CHAR`.
#[must_use]
pub fn char() -> TypeElem {
    TypeElem::new("CHAR")
}

/// `VARCHAR(255)`; override with [`TypeElem::size`].
#[must_use]
pub fn varchar() -> TypeElem {
    TypeElem::new("VARCHAR").size(255)
}

/// `TEXT`.
#[must_use]
pub fn text() -> TypeElem {
    TypeElem::new("TEXT")
}

/// `TINYINT`.
#[must_use]
pub fn tiny_int() -> TypeElem {
    TypeElem::new("TINYINT")
}

/// `SMALLINT`.
#[must_use]
pub fn small_int() -> TypeElem {
    TypeElem::new("SMALLINT")
}

/// `INT`.
#[must_use]
pub fn int() -> TypeElem {
    TypeElem::new("INT")
}

/// `BIGINT`.
#[must_use]
pub fn big_int() -> TypeElem {
    TypeElem::new("BIGINT")
}

/// `FLOAT`.
#[must_use]
pub fn float() -> TypeElem {
    TypeElem::new("FLOAT")
}

/// `DOUBLE`.
#[must_use]
pub fn double() -> TypeElem {
    TypeElem::new("DOUBLE")
}

/// `NUMERIC`.
#[must_use]
pub fn numeric() -> TypeElem {
    TypeElem::new("NUMERIC")
}

/// `DECIMAL`.
#[must_use]
pub fn decimal() -> TypeElem {
    TypeElem::new("DECIMAL")
}

/// `BOOLEAN`.
#[must_use]
pub fn boolean() -> TypeElem {
    TypeElem::new("BOOLEAN")
}

/// `DATE`.
#[must_use]
pub fn date() -> TypeElem {
    TypeElem::new("DATE")
}

/// `TIME`.
#[must_use]
pub fn time() -> TypeElem {
    TypeElem::new("TIME")
}

/// `TIMESTAMP`.
#[must_use]
pub fn timestamp() -> TypeElem {
    TypeElem::new("TIMESTAMP")
}

/// `BLOB`.
#[must_use]
pub fn blob() -> TypeElem {
    TypeElem::new("BLOB")
}

/// `UUID`.
#[must_use]
pub fn uuid() -> TypeElem {
    TypeElem::new("UUID")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{DefaultDialect, MysqlDialect, PostgresDialect};

    #[test]
    fn test_size_wins_over_precision() {
        let ty = decimal().precision(10, 2).size(4);
        assert_eq!(ty.head(false), "DECIMAL(4)");
        assert_eq!(decimal().precision(10, 2).head(false), "DECIMAL(10, 2)");
    }

    #[test]
    fn test_unsigned_follows_dialect() {
        let ty = int().unsigned();
        assert_eq!(ty.render(&MysqlDialect::new()), "INT UNSIGNED");
        assert_eq!(ty.render(&PostgresDialect::new()), "INT");
        assert_eq!(ty.clone().signed().render(&MysqlDialect::new()), "INT");
    }

    #[test]
    fn test_constraints_in_order() {
        let ty = varchar().size(40).not_null().default("guest").unique();
        assert_eq!(
            ty.render(&DefaultDialect::new()),
            "VARCHAR(40) NOT NULL DEFAULT 'guest' UNIQUE"
        );
    }

    #[test]
    fn test_mutators_leave_base_untouched() {
        let base = int();
        let required = base.clone().not_null();
        assert!(base.constraints().is_empty());
        assert_eq!(required.constraints(), &[Constraint::NotNull]);
    }

    #[test]
    fn test_custom_constraint() {
        let ty = int().constraint(Constraint::Custom(String::from("CHECK (age > 0)")));
        assert_eq!(ty.constraints_sql(), "CHECK (age > 0)");
    }
}
