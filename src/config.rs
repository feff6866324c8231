//! Application settings.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `config/rental-desk.toml` (optional), or the file given with `--config` (required)
//! 3. environment variables `RENTAL_DESK__<SECTION>__<KEY>`, e.g. `RENTAL_DESK__DATABASE__PATH`

use crate::rental_actor::DEFAULT_RECEIPT_ATTEMPTS;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "config/rental-desk";
const ENV_PREFIX: &str = "RENTAL_DESK";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub booking: BookingSettings,
    #[serde(default)]
    pub actors: ActorSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BookingSettings {
    /// Take a unit of stock for every booking.
    #[serde(default)]
    pub reserve_stock: bool,
    #[serde(default = "default_receipt_attempts")]
    pub receipt_attempts: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ActorSettings {
    /// Mailbox capacity of each actor.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("rental_inventory.db")
}

fn default_receipt_attempts() -> u32 {
    DEFAULT_RECEIPT_ATTEMPTS
}

fn default_buffer_size() -> usize {
    32
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            reserve_stock: false,
            receipt_attempts: default_receipt_attempts(),
        }
    }
}

impl Default for ActorSettings {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

impl AppConfig {
    /// Loads settings from the config file and the environment.
    ///
    /// With `file = None` the default `config/rental-desk.toml` is read if it exists.
    /// An explicitly named file must exist.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_prefix(file, ENV_PREFIX)
    }

    fn load_with_prefix(file: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let settings = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize().map_err(|e| {
            ConfigError::Message(format!("Configuration could not be loaded: {}", e))
        })?;
        if config.actors.buffer_size == 0 {
            return Err(ConfigError::Message(
                "actors.buffer_size must be at least 1".into(),
            ));
        }
        Ok(config)
    }

    /// Defaults, pointed at `path`.
    pub fn for_database(path: impl Into<PathBuf>) -> Self {
        Self {
            database: DatabaseSettings { path: path.into() },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::load_with_prefix(None, "RENTAL_DESK_TEST_NONE").unwrap();
        assert_eq!(config.database.path, PathBuf::from("rental_inventory.db"));
        assert!(!config.booking.reserve_stock);
        assert_eq!(config.booking.receipt_attempts, 8);
        assert_eq!(config.actors.buffer_size, 32);
    }

    #[test]
    fn test_file_then_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[database]\npath = \"/tmp/desk.db\"\n\n[booking]\nreserve_stock = true\nreceipt_attempts = 3"
        )
        .unwrap();

        std::env::set_var("RENTAL_DESK_TEST_FILE__BOOKING__RECEIPT_ATTEMPTS", "5");
        let config =
            AppConfig::load_with_prefix(Some(file.path()), "RENTAL_DESK_TEST_FILE").unwrap();
        std::env::remove_var("RENTAL_DESK_TEST_FILE__BOOKING__RECEIPT_ATTEMPTS");

        assert_eq!(config.database.path, PathBuf::from("/tmp/desk.db"));
        assert!(config.booking.reserve_stock);
        assert_eq!(config.booking.receipt_attempts, 5);
        assert_eq!(config.actors.buffer_size, 32);
    }

    #[test]
    fn test_named_file_must_exist() {
        let missing = Path::new("/definitely/not/here.toml");
        assert!(AppConfig::load_with_prefix(Some(missing), "RENTAL_DESK_TEST_MISSING").is_err());
    }

    #[test]
    fn test_zero_buffer_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[actors]\nbuffer_size = 0").unwrap();
        assert!(AppConfig::load_with_prefix(Some(file.path()), "RENTAL_DESK_TEST_ZERO").is_err());
    }
}
