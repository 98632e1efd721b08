//! Dialect configuration.

use serde::{Deserialize, Serialize};

use crate::dialect::{new_dialect, Dialect};
use crate::error::{Error, Result};

/// Environment variable naming the driver.
pub const DRIVER_ENV: &str = "OXIDE_QB_DRIVER";

/// Environment variable toggling identifier escaping.
pub const ESCAPING_ENV: &str = "OXIDE_QB_ESCAPING";

/// Which dialect to compile for.
///
/// ```rust
/// use oxide_qb::config::DialectConfig;
///
/// let config = DialectConfig::from_json(r#"{"driver": "postgres", "escaping": true}"#).unwrap();
/// assert_eq!(config.dialect().escape("user"), "\"user\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Registered driver name; unknown names use the default dialect.
    pub driver: String,
    /// Escape identifiers.
    pub escaping: bool,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            driver: String::from("default"),
            escaping: false,
        }
    }
}

impl DialectConfig {
    /// Parses a JSON configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] when the JSON does not parse.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Reads `OXIDE_QB_DRIVER` and `OXIDE_QB_ESCAPING`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] when the escaping flag is not a boolean.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(driver) = lookup(DRIVER_ENV) {
            config.driver = driver;
        }
        if let Some(flag) = lookup(ESCAPING_ENV) {
            config.escaping = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(Error::InvalidConfig(format!(
                        "{ESCAPING_ENV} must be a boolean, got '{other}'"
                    )))
                }
            };
        }
        Ok(config)
    }

    /// Resolves the driver through the registry and applies the escaping flag.
    #[must_use]
    pub fn dialect(&self) -> Box<dyn Dialect> {
        let mut dialect = new_dialect(&self.driver);
        dialect.set_escaping(self.escaping);
        dialect
    }
}
