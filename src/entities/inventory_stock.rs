//! Inventory stock entity - Aggregate device counts per manufacturer and device type.
//!
//! The seed generator upserts these rows; `(manufacturer, machine_type)` is unique
//! in the hosted schema.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::machine::MachineType;

/// Inventory stock database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_stock")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Manufacturer name
    pub manufacturer: String,
    /// Kind of device
    pub machine_type: MachineType,
    /// Every device ever stocked
    pub total_count: i64,
    /// Devices on hand
    pub available_count: i64,
    /// Devices out with distributors
    pub assigned_count: i64,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
