//! Driver name to dialect registry.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use tracing::{trace, warn};

use super::{DefaultDialect, Dialect, MysqlDialect, PostgresDialect, SqliteDialect};

/// Builds a fresh dialect value.
pub type DialectConstructor = fn() -> Box<dyn Dialect>;

fn default_dialect() -> Box<dyn Dialect> {
    Box::new(DefaultDialect::new())
}

fn postgres_dialect() -> Box<dyn Dialect> {
    Box::new(PostgresDialect::new())
}

fn mysql_dialect() -> Box<dyn Dialect> {
    Box::new(MysqlDialect::new())
}

fn sqlite_dialect() -> Box<dyn Dialect> {
    Box::new(SqliteDialect::new())
}

fn registry() -> &'static RwLock<HashMap<String, DialectConstructor>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, DialectConstructor>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let builtins: [(&str, DialectConstructor); 6] = [
            ("default", default_dialect),
            ("postgres", postgres_dialect),
            ("postgresql", postgres_dialect),
            ("mysql", mysql_dialect),
            ("sqlite", sqlite_dialect),
            ("sqlite3", sqlite_dialect),
        ];
        RwLock::new(
            builtins
                .into_iter()
                .map(|(name, ctor)| (String::from(name), ctor))
                .collect(),
        )
    })
}

/// Registers (or replaces) the constructor for a driver name.
pub fn register_dialect(driver: impl Into<String>, constructor: DialectConstructor) {
    let driver = driver.into();
    trace!(driver = %driver, "registering dialect");
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(driver, constructor);
}

/// Creates the dialect registered for `driver`.
///
/// Unregistered names fall back to [`DefaultDialect`].
#[must_use]
pub fn new_dialect(driver: &str) -> Box<dyn Dialect> {
    let constructor = registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(driver)
        .copied();
    constructor.map_or_else(
        || {
            warn!(driver, "unknown driver, falling back to the default dialect");
            default_dialect()
        },
        |ctor| ctor(),
    )
}

/// Registered driver names, sorted.
#[must_use]
pub fn registered_drivers() -> Vec<String> {
    let mut names: Vec<String> = registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}
