//! Join condition guessing from foreign keys.

use crate::clause::{and, eq, Clause};
use crate::error::{Error, Result};
use crate::schema::{ForeignKeyConstraint, TableElem};

fn join_table(side: &Clause) -> Result<&TableElem> {
    match side {
        Clause::Table(table) => Ok(table),
        Clause::Alias(alias) => Err(Error::AliasedJoin {
            alias: alias.name.clone(),
        }),
        _ => Err(Error::NotATable),
    }
}

fn on_clause(owner: &TableElem, fk: &ForeignKeyConstraint, target: &TableElem) -> Result<Clause> {
    if fk.columns().is_empty() || fk.columns().len() != fk.ref_columns().len() {
        return Err(Error::InvalidForeignKey {
            table: String::from(owner.name()),
            ref_table: String::from(fk.ref_table()),
        });
    }
    let predicates: Vec<Clause> = fk
        .columns()
        .iter()
        .zip(fk.ref_columns())
        .map(|(column, referenced)| eq(owner.c(column), target.c(referenced)))
        .collect();
    match <[Clause; 1]>::try_from(predicates) {
        Ok([single]) => Ok(single),
        Err(predicates) => Ok(and(predicates)),
    }
}

/// Derives the ON condition joining `left` and `right`.
///
/// Looks for foreign keys from `left` to `right` and from `right` to `left`.
/// Exactly one must exist. A composite key yields an AND of equalities in the
/// key's column order.
///
/// # Errors
///
/// - [`Error::AliasedJoin`] if either side is an alias.
/// - [`Error::NotATable`] if either side is not a table.
/// - [`Error::NoForeignKey`] if no foreign key links the tables.
/// - [`Error::AmbiguousForeignKey`] if more than one does.
/// - [`Error::InvalidForeignKey`] if the key has no columns or its local and
///   referenced column counts differ.
pub fn guess_join_on(left: &Clause, right: &Clause) -> Result<Clause> {
    let from = join_table(left)?;
    let to = join_table(right)?;

    let mut candidates: Vec<(&TableElem, &ForeignKeyConstraint, &TableElem)> = from
        .foreign_keys_to(to.name())
        .map(|fk| (from, fk, to))
        .collect();
    // a self-join would find every key twice
    if from.name() != to.name() {
        candidates.extend(to.foreign_keys_to(from.name()).map(|fk| (to, fk, from)));
    }

    match candidates.as_slice() {
        [] => Err(Error::NoForeignKey {
            left: String::from(from.name()),
            right: String::from(to.name()),
        }),
        [(owner, fk, target)] => on_clause(owner, fk, target),
        many => Err(Error::AmbiguousForeignKey {
            left: String::from(from.name()),
            right: String::from(to.name()),
            count: many.len(),
        }),
    }
}
