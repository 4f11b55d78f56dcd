//! Tool settings read from environment variables.
//!
//! Every setting has a default, so the tools run with no configuration beyond
//! `DATABASE_URL`. Values are resolved through a lookup function so tests can
//! supply them without touching the process environment.

use crate::errors::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Path of the SQL file applied by `apply-schema`
pub const SCHEMA_FILE_VAR: &str = "SCHEMA_FILE";
/// Milliseconds to wait between schema statements
pub const STATEMENT_PAUSE_MS_VAR: &str = "STATEMENT_PAUSE_MS";
/// Path of the optional seed plan TOML file
pub const SEED_CONFIG_VAR: &str = "SEED_CONFIG";
/// Directory of the front-end client built by `build-client`
pub const CLIENT_DIR_VAR: &str = "CLIENT_DIR";

const DEFAULT_SCHEMA_FILE: &str = "sql/schema.sql";
const DEFAULT_STATEMENT_PAUSE_MS: u64 = 100;
const DEFAULT_SEED_CONFIG: &str = "seed.toml";
const DEFAULT_CLIENT_DIR: &str = "client";

/// Settings shared by the command-line tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    /// SQL file applied by `apply-schema`
    pub schema_file: PathBuf,
    /// Pause between consecutive schema statements
    pub statement_pause: Duration,
    /// Seed plan read by `generate-seed-sql`
    pub seed_config: PathBuf,
    /// Front-end client directory
    pub client_dir: PathBuf,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::from(DEFAULT_SCHEMA_FILE),
            statement_pause: Duration::from_millis(DEFAULT_STATEMENT_PAUSE_MS),
            seed_config: PathBuf::from(DEFAULT_SEED_CONFIG),
            client_dir: PathBuf::from(DEFAULT_CLIENT_DIR),
        }
    }
}

impl ToolSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset or blank values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let statement_pause = match get(STATEMENT_PAUSE_MS_VAR) {
            Some(raw) => {
                let millis = raw.trim().parse::<u64>().map_err(|e| Error::Config {
                    message: format!("{STATEMENT_PAUSE_MS_VAR} must be a whole number of milliseconds, got {raw:?}: {e}"),
                })?;
                Duration::from_millis(millis)
            }
            None => defaults.statement_pause,
        };

        Ok(Self {
            schema_file: get(SCHEMA_FILE_VAR).map_or(defaults.schema_file, PathBuf::from),
            statement_pause,
            seed_config: get(SEED_CONFIG_VAR).map_or(defaults.seed_config, PathBuf::from),
            client_dir: get(CLIENT_DIR_VAR).map_or(defaults.client_dir, PathBuf::from),
        })
    }
}
