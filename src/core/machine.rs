//! Machine operations - Create, look up, filter, update and delete payment devices.
//!
//! Serial numbers are unique in the hosted schema; `(mid, tid)` pairs are expected to
//! be unique but nothing here enforces it, so [`get_machine_by_mid_tid`] returns the
//! first match.

use crate::{
    core::common::{next_update_stamp, now_stamp, optional, required, search_condition},
    entities::{Machine, MachineStatus, MachineType, machine},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Fields accepted when creating a machine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMachine {
    /// Manufacturer serial number, unique
    pub serial_number: String,
    /// Merchant identifier
    pub mid: String,
    /// Terminal identifier
    pub tid: String,
    /// Kind of device
    pub machine_type: MachineType,
    /// Model name
    pub model: Option<String>,
    /// Manufacturer name
    pub manufacturer: Option<String>,
    /// Defaults to [`MachineStatus::Available`]
    pub status: Option<MachineStatus>,
    /// Payment QR code, soundboxes only
    pub qr_code: Option<String>,
    /// Defaults to `false`
    pub has_standee: Option<bool>,
}

impl NewMachine {
    /// A machine with only the required identifiers set.
    pub fn new(
        serial_number: impl Into<String>,
        mid: impl Into<String>,
        tid: impl Into<String>,
        machine_type: MachineType,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            mid: mid.into(),
            tid: tid.into(),
            machine_type,
            model: None,
            manufacturer: None,
            status: None,
            qr_code: None,
            has_standee: None,
        }
    }
}

/// Changes applied by [`update_machine`].
///
/// `None` leaves a field untouched. For nullable fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineChanges {
    /// New serial number
    pub serial_number: Option<String>,
    /// New merchant identifier
    pub mid: Option<String>,
    /// New terminal identifier
    pub tid: Option<String>,
    /// New device kind
    pub machine_type: Option<MachineType>,
    /// New model name
    pub model: Option<Option<String>>,
    /// New manufacturer
    pub manufacturer: Option<Option<String>>,
    /// New inventory status
    pub status: Option<MachineStatus>,
    /// New QR code
    pub qr_code: Option<Option<String>>,
    /// New standee flag
    pub has_standee: Option<bool>,
}

/// Filters for [`list_machines`]; unset fields do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineFilter {
    /// Only machines with this status
    pub status: Option<MachineStatus>,
    /// Only this kind of device
    pub machine_type: Option<MachineType>,
    /// Exact manufacturer match
    pub manufacturer: Option<String>,
    /// Case-insensitive substring matched against serial number, mid and tid
    pub search: Option<String>,
}

const ENTITY: &str = "machine";

/// Creates a machine after validating its identifiers.
///
/// # Errors
/// Returns [`Error::Validation`] when the serial number, mid or tid is blank, and
/// [`Error::Database`] when the insert fails (for example a duplicate serial number).
#[instrument(skip(db, new), fields(serial_number = %new.serial_number))]
pub async fn create_machine(db: &DatabaseConnection, new: NewMachine) -> Result<machine::Model> {
    let serial_number = required("serial number", &new.serial_number)?;
    let mid = required("mid", &new.mid)?;
    let tid = required("tid", &new.tid)?;
    let now = now_stamp();

    let machine = machine::ActiveModel {
        serial_number: Set(serial_number),
        mid: Set(mid),
        tid: Set(tid),
        machine_type: Set(new.machine_type),
        model: Set(optional(new.model)),
        manufacturer: Set(optional(new.manufacturer)),
        status: Set(new.status.unwrap_or(MachineStatus::Available)),
        qr_code: Set(optional(new.qr_code)),
        has_standee: Set(new.has_standee.unwrap_or(false)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = machine.insert(db).await?;
    info!(id = created.id, "Created machine");
    Ok(created)
}

/// Finds a machine by its unique ID.
pub async fn get_machine_by_id(
    db: &DatabaseConnection,
    machine_id: i64,
) -> Result<Option<machine::Model>> {
    Machine::find_by_id(machine_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a machine by its serial number.
pub async fn get_machine_by_serial_number(
    db: &DatabaseConnection,
    serial_number: &str,
) -> Result<Option<machine::Model>> {
    Machine::find()
        .filter(machine::Column::SerialNumber.eq(serial_number.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a machine by its payment-network identifier pair.
pub async fn get_machine_by_mid_tid(
    db: &DatabaseConnection,
    mid: &str,
    tid: &str,
) -> Result<Option<machine::Model>> {
    Machine::find()
        .filter(machine::Column::Mid.eq(mid.trim()))
        .filter(machine::Column::Tid.eq(tid.trim()))
        .order_by_asc(machine::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists machines matching `filter`, newest first.
#[instrument(skip(db))]
pub async fn list_machines(
    db: &DatabaseConnection,
    filter: &MachineFilter,
) -> Result<Vec<machine::Model>> {
    let mut query = Machine::find();

    if let Some(status) = filter.status {
        query = query.filter(machine::Column::Status.eq(status));
    }
    if let Some(machine_type) = filter.machine_type {
        query = query.filter(machine::Column::MachineType.eq(machine_type));
    }
    if let Some(manufacturer) = filter.manufacturer.as_deref() {
        query = query.filter(machine::Column::Manufacturer.eq(manufacturer));
    }
    if let Some(condition) = filter.search.as_deref().and_then(|term| {
        search_condition(
            &[
                machine::Column::SerialNumber,
                machine::Column::Mid,
                machine::Column::Tid,
            ],
            term,
        )
    }) {
        query = query.filter(condition);
    }

    query
        .order_by_desc(machine::Column::CreatedAt)
        .order_by_desc(machine::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies `changes` to an existing machine and refreshes its update time.
///
/// The ID and creation time are never modified.
#[instrument(skip(db, changes))]
pub async fn update_machine(
    db: &DatabaseConnection,
    machine_id: i64,
    changes: MachineChanges,
) -> Result<machine::Model> {
    let existing = Machine::find_by_id(machine_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found(ENTITY, machine_id))?;
    let updated_at = next_update_stamp(existing.updated_at);

    let mut machine: machine::ActiveModel = existing.into();
    if let Some(serial_number) = changes.serial_number {
        machine.serial_number = Set(required("serial number", &serial_number)?);
    }
    if let Some(mid) = changes.mid {
        machine.mid = Set(required("mid", &mid)?);
    }
    if let Some(tid) = changes.tid {
        machine.tid = Set(required("tid", &tid)?);
    }
    if let Some(machine_type) = changes.machine_type {
        machine.machine_type = Set(machine_type);
    }
    if let Some(model) = changes.model {
        machine.model = Set(optional(model));
    }
    if let Some(manufacturer) = changes.manufacturer {
        machine.manufacturer = Set(optional(manufacturer));
    }
    if let Some(status) = changes.status {
        machine.status = Set(status);
    }
    if let Some(qr_code) = changes.qr_code {
        machine.qr_code = Set(optional(qr_code));
    }
    if let Some(has_standee) = changes.has_standee {
        machine.has_standee = Set(has_standee);
    }
    machine.updated_at = Set(updated_at);

    let updated = machine.update(db).await?;
    info!("Updated machine");
    Ok(updated)
}

/// Deletes a machine by ID.
#[instrument(skip(db))]
pub async fn delete_machine(db: &DatabaseConnection, machine_id: i64) -> Result<()> {
    let result = Machine::delete_by_id(machine_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found(ENTITY, machine_id));
    }
    info!("Deleted machine");
    Ok(())
}
