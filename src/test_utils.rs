//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{
        distributor::{self, NewDistributor},
        machine::{self, NewMachine},
    },
    entities::{self, AssignmentStatus, MachineType},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

/// Routes tracing output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Distributor input with only the required fields set.
///
/// # Defaults
/// * `phone`: `"9000000000"`
/// * everything else unset, so status becomes `ACTIVE`
pub fn new_distributor(name: &str, email: &str) -> NewDistributor {
    NewDistributor {
        name: name.to_string(),
        email: email.to_string(),
        phone: "9000000000".to_string(),
        ..NewDistributor::default()
    }
}

/// Creates a distributor from [`new_distributor`].
pub async fn create_test_distributor(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> Result<entities::distributor::Model> {
    distributor::create_distributor(db, new_distributor(name, email)).await
}

/// Creates a POS machine whose mid and tid are derived from `serial`.
pub async fn create_test_machine(
    db: &DatabaseConnection,
    serial: &str,
) -> Result<entities::machine::Model> {
    machine::create_machine(
        db,
        NewMachine::new(serial, format!("MID-{serial}"), format!("TID-{serial}"), MachineType::Pos),
    )
    .await
}

/// Inserts an assignment row directly; assignments have no operations of their own.
pub async fn insert_test_assignment(
    db: &DatabaseConnection,
    machine_id: i64,
    distributor_id: i64,
    status: AssignmentStatus,
    assigned_at: DateTime<Utc>,
) -> Result<entities::assignment::Model> {
    let returned_at = (status == AssignmentStatus::Returned).then_some(assigned_at);
    let assignment = entities::assignment::ActiveModel {
        machine_id: Set(machine_id),
        distributor_id: Set(distributor_id),
        retailer_id: Set(None),
        status: Set(status),
        assigned_at: Set(assigned_at),
        returned_at: Set(returned_at),
        notes: Set(None),
        ..Default::default()
    };
    Ok(assignment.insert(db).await?)
}
