//! Service provider entity - A device manufacturer or payment partner.
//!
//! `partner_type` records which kind of device the provider supplies
//! (e.g. `"POS"`, `"SOUNDBOX"` or `"BOTH"`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service provider database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_providers")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    #[sea_orm(unique)]
    pub name: String,
    /// Kind of devices the provider partners on, e.g. `POS`
    pub partner_type: Option<String>,
    /// Contact email
    pub contact_email: Option<String>,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// `ServiceProvider` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
