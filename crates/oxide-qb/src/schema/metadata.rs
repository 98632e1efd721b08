//! Metadata registry.

use std::collections::{BTreeSet, HashMap};

use super::table::TableElem;
use crate::clause::Clause;
use crate::compiler::guess_join_on;
use crate::dialect::Dialect;
use crate::error::{Error, Result};

/// An ordered registry of tables keyed by name.
///
/// Keeps an adjacency index of foreign-key relationships so that related
/// tables and join conditions are found without scanning every table.
#[derive(Debug, Clone, Default)]
pub struct MetaData {
    tables: Vec<TableElem>,
    by_name: HashMap<String, usize>,
    // table -> tables it references or is referenced by
    related: HashMap<String, BTreeSet<String>>,
}

impl MetaData {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, returning the registry for chaining.
    #[must_use]
    pub fn with_table(mut self, table: TableElem) -> Self {
        self.add_table(table);
        self
    }

    /// Adds a table. A table with the same name is replaced in place, and
    /// the relations of the replaced table are dropped.
    pub fn add_table(&mut self, table: TableElem) {
        let name = String::from(table.name());
        let previous: Vec<String> = match self.by_name.get(&name) {
            Some(&i) => {
                let old = std::mem::replace(&mut self.tables[i], table);
                old.referenced_tables().map(String::from).collect()
            }
            None => {
                self.by_name.insert(name.clone(), self.tables.len());
                self.tables.push(table);
                Vec::new()
            }
        };
        for referenced in &previous {
            self.unlink(&name, referenced);
        }

        let current: Vec<String> = self
            .table(&name)
            .map(|t| t.referenced_tables().map(String::from).collect())
            .unwrap_or_default();
        for referenced in current {
            self.link(&name, &referenced);
        }
    }

    fn link(&mut self, name: &str, referenced: &str) {
        for (from, to) in [(name, referenced), (referenced, name)] {
            self.related
                .entry(String::from(from))
                .or_default()
                .insert(String::from(to));
        }
    }

    // Must run after `name` holds its new definition.
    fn unlink(&mut self, name: &str, referenced: &str) {
        let references = |from: &str, to: &str| {
            self.table(from)
                .is_some_and(|t| t.foreign_keys_to(to).next().is_some())
        };
        if references(name, referenced) || references(referenced, name) {
            return;
        }
        for (from, to) in [(name, referenced), (referenced, name)] {
            if let Some(set) = self.related.get_mut(from) {
                set.remove(to);
                if set.is_empty() {
                    self.related.remove(from);
                }
            }
        }
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableElem> {
        self.by_name.get(name).map(|&i| &self.tables[i])
    }

    /// Tables in registration order.
    #[must_use]
    pub fn tables(&self) -> &[TableElem] {
        &self.tables
    }

    /// Names of the tables linked to `name` by a foreign key in either
    /// direction.
    pub fn related_tables(&self, name: &str) -> impl Iterator<Item = &str> {
        self.related
            .get(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Guesses the ON clause joining two registered tables.
    ///
    /// # Errors
    ///
    /// Fails when a table is not registered, or when zero or several foreign
    /// keys link the two tables.
    pub fn join_condition(&self, left: &str, right: &str) -> Result<Clause> {
        let lookup = |name: &str| {
            self.table(name).ok_or_else(|| Error::NoForeignKey {
                left: String::from(left),
                right: String::from(right),
            })
        };
        let left_table = Clause::from(lookup(left)?);
        let right_table = Clause::from(lookup(right)?);
        guess_join_on(&left_table, &right_table)
    }

    /// Renders `CREATE TABLE` for every table, in registration order.
    ///
    /// # Errors
    ///
    /// Fails on the first table that cannot be rendered on this dialect.
    pub fn create_all(&self, dialect: &dyn Dialect) -> Result<Vec<String>> {
        self.tables.iter().map(|t| t.create(dialect)).collect()
    }

    /// Renders `DROP TABLE` for every table, in reverse registration order.
    #[must_use]
    pub fn drop_all(&self, dialect: &dyn Dialect) -> Vec<String> {
        self.tables.iter().rev().map(|t| t.drop(dialect)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DefaultDialect;
    use crate::schema::{column, table, ForeignKeyConstraint};
    use crate::types::{int, varchar};

    fn registry() -> MetaData {
        MetaData::new()
            .with_table(table("user", [column("id", int()).primary_key()]))
            .with_table(
                table(
                    "session",
                    [
                        column("id", int()).primary_key(),
                        column("user_id", int()),
                    ],
                )
                .foreign_key(ForeignKeyConstraint::new(&["user_id"], "user", &["id"])),
            )
            .with_table(table("tag", [column("name", varchar())]))
    }

    #[test]
    fn test_lookup_and_order() {
        let meta = registry();
        assert!(meta.table("session").is_some());
        assert!(meta.table("missing").is_none());
        let names: Vec<&str> = meta.tables().iter().map(TableElem::name).collect();
        assert_eq!(names, vec!["user", "session", "tag"]);
    }

    #[test]
    fn test_related_tables_both_directions() {
        let meta = registry();
        assert_eq!(meta.related_tables("user").collect::<Vec<_>>(), vec!["session"]);
        assert_eq!(meta.related_tables("session").collect::<Vec<_>>(), vec!["user"]);
        assert_eq!(meta.related_tables("tag").count(), 0);
    }

    #[test]
    fn test_join_condition() {
        let meta = registry();
        assert!(meta.join_condition("user", "session").is_ok());
        assert!(matches!(
            meta.join_condition("user", "tag"),
            Err(Error::NoForeignKey { .. })
        ));
        assert!(meta.join_condition("user", "missing").is_err());
    }

    #[test]
    fn test_drop_all_reverses() {
        let drops = registry().drop_all(&DefaultDialect::new());
        assert_eq!(
            drops,
            vec!["DROP TABLE tag;", "DROP TABLE session;", "DROP TABLE user;"]
        );
    }

    #[test]
    fn test_replace_table() {
        let mut meta = registry();
        meta.add_table(table("tag", [column("name", varchar()), column("slug", varchar())]));
        assert_eq!(meta.tables().len(), 3);
        assert_eq!(meta.table("tag").map(|t| t.columns().len()), Some(2));
        assert_eq!(meta.create_all(&DefaultDialect::new()).map(|v| v.len()), Ok(3));
    }

    #[test]
    fn test_replace_table_drops_stale_relations() {
        let mut meta = registry();
        meta.add_table(table(
            "session",
            [column("id", int()).primary_key(), column("user_id", int())],
        ));
        assert_eq!(meta.related_tables("user").count(), 0);
        assert_eq!(meta.related_tables("session").count(), 0);
        assert!(matches!(
            meta.join_condition("user", "session"),
            Err(Error::NoForeignKey { .. })
        ));
    }

    #[test]
    fn test_replace_table_keeps_relations_still_declared() {
        let mut meta = registry().with_table(
            table("user", [column("id", int()).primary_key(), column("tag", varchar())])
                .foreign_key(ForeignKeyConstraint::new(&["tag"], "tag", &["name"])),
        );
        assert_eq!(meta.related_tables("user").collect::<Vec<_>>(), vec!["session", "tag"]);

        meta.add_table(table("user", [column("id", int()).primary_key()]));
        assert_eq!(meta.related_tables("user").collect::<Vec<_>>(), vec!["session"]);
        assert_eq!(meta.related_tables("tag").count(), 0);
        assert!(meta.join_condition("session", "user").is_ok());
    }
}
