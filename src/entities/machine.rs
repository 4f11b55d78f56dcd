//! Machine entity - A single POS terminal or soundbox device.
//!
//! Each machine carries a serial number and the `mid`/`tid` pair it is registered
//! under on the payment network. Soundbox devices additionally carry a QR code and
//! a flag recording whether a display standee was shipped with them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Machine database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "machines")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Manufacturer serial number
    #[sea_orm(unique)]
    pub serial_number: String,
    /// Merchant identifier on the payment network
    pub mid: String,
    /// Terminal identifier on the payment network
    pub tid: String,
    /// Kind of device
    pub machine_type: MachineType,
    /// Model name
    pub model: Option<String>,
    /// Manufacturer name
    pub manufacturer: Option<String>,
    /// Inventory status
    pub status: MachineStatus,
    /// Payment QR code printed on a soundbox
    pub qr_code: Option<String>,
    /// Whether a soundbox shipped with a display standee
    pub has_standee: bool,
    /// When the machine was created; never changed afterwards
    pub created_at: DateTimeUtc,
    /// When the machine was last modified
    pub updated_at: DateTimeUtc,
}

/// Kind of payment device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineType {
    /// Card-accepting point-of-sale terminal
    #[sea_orm(string_value = "POS")]
    Pos,
    /// Audio payment confirmation device
    #[sea_orm(string_value = "SOUNDBOX")]
    Soundbox,
}

/// Inventory status of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineStatus {
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    #[sea_orm(string_value = "ASSIGNED")]
    Assigned,
    #[sea_orm(string_value = "MAINTENANCE")]
    Maintenance,
    #[sea_orm(string_value = "RETIRED")]
    Retired,
}

/// Defines relationships between Machine and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One machine has many assignments over its lifetime
    #[sea_orm(has_many = "super::assignment::Entity")]
    Assignments,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
