//! Distributor entity - A business that receives machines and supplies retailers.
//!
//! Columns are stored in `snake_case`; the JSON form of the record uses `camelCase`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Distributor database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "distributors")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Registered business name
    pub name: String,
    /// Contact email, unique per distributor
    #[sea_orm(unique)]
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Named person to reach at the distributor
    pub contact_person: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or region
    pub state: Option<String>,
    /// Postal code
    pub pincode: Option<String>,
    /// Goods and services tax registration number
    pub gst_number: Option<String>,
    /// Permanent account number (tax identifier)
    pub pan_number: Option<String>,
    /// Lifecycle status
    pub status: DistributorStatus,
    /// When the distributor was created; never changed afterwards
    pub created_at: DateTimeUtc,
    /// When the distributor was last modified
    pub updated_at: DateTimeUtc,
}

/// Distributor lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributorStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
    #[sea_orm(string_value = "SUSPENDED")]
    Suspended,
}

/// Defines relationships between Distributor and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One distributor has many assignments
    #[sea_orm(has_many = "super::assignment::Entity")]
    Assignments,
    /// One distributor supplies many retailers
    #[sea_orm(has_many = "super::retailer::Entity")]
    Retailers,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::retailer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Retailers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
