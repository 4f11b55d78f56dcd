//! Seed plan loading from `seed.toml`
//!
//! The seed plan describes the device batch written out by `generate-seed-sql`.
//! Every field has a default matching the Telering delivery, so the file is optional
//! and may override only the fields that differ.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Description of one manufacturer's device batch
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedPlan {
    /// Manufacturer written on every generated machine
    pub manufacturer: String,
    /// Model name for POS terminals
    pub pos_model: String,
    /// Model name for soundboxes
    pub soundbox_model: String,
    /// Number of POS terminals to generate
    pub pos_count: u32,
    /// Number of soundboxes to generate
    pub soundbox_count: u32,
    /// Seed for the standee flag; the only randomized field
    pub random_seed: u64,
    /// Where the generated SQL is written
    pub output_path: PathBuf,
    /// Partner type change applied to another provider in the same script
    pub partner_update: PartnerTypeUpdate,
}

/// Sets `partner_type` on a named service provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartnerTypeUpdate {
    /// Provider whose row is updated
    pub provider: String,
    /// New partner type
    pub partner_type: String,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            manufacturer: "Telering".to_string(),
            pos_model: "TR-P100".to_string(),
            soundbox_model: "TR-S10".to_string(),
            pos_count: 390,
            soundbox_count: 1000,
            random_seed: 42,
            output_path: PathBuf::from("sql/seed_telering_machines.sql"),
            partner_update: PartnerTypeUpdate::default(),
        }
    }
}

impl SeedPlan {
    /// Number of machines in the batch, POS and soundbox combined.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the counts overflow a `u32`.
    pub fn total_machines(&self) -> Result<u32> {
        self.pos_count
            .checked_add(self.soundbox_count)
            .ok_or_else(|| Error::Config {
                message: format!(
                    "pos_count {} plus soundbox_count {} is too large",
                    self.pos_count, self.soundbox_count
                ),
            })
    }
}

impl Default for PartnerTypeUpdate {
    fn default() -> Self {
        Self {
            provider: "Pine Labs".to_string(),
            partner_type: "POS".to_string(),
        }
    }
}

/// Loads a seed plan from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_seed_plan<P: AsRef<Path>>(path: P) -> Result<SeedPlan> {
    let path_ref = path.as_ref();
    debug!("Loading seed plan from {}", path_ref.display());
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read seed plan {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed plan {}: {e}", path_ref.display()),
    })
}

/// Loads the seed plan at `path`, or the default plan when the file does not exist.
pub fn load_seed_plan_or_default<P: AsRef<Path>>(path: P) -> Result<SeedPlan> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_seed_plan(path_ref)
    } else {
        info!(
            "No seed plan at {}, using the default plan",
            path_ref.display()
        );
        Ok(SeedPlan::default())
    }
}
