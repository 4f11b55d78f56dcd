//! Order entity - A distributor's request for a quantity of devices.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::machine::MachineType;

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Distributor the row belongs to
    pub distributor_id: i64,
    /// Kind of device
    pub machine_type: MachineType,
    /// Number of devices ordered
    pub quantity: i32,
    /// Free-form fulfilment status, e.g. `"PENDING"`
    pub status: String,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::distributor::Entity",
        from = "Column::DistributorId",
        to = "super::distributor::Column::Id"
    )]
    Distributor,
}

impl Related<super::distributor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Distributor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
