//! Distributor operations - Create, look up, filter, update and delete distributors,
//! and read the machines assigned to them.
//!
//! Lookups return `Ok(None)` for a missing distributor. Updates and deletes of a
//! missing distributor return [`Error::NotFound`].

use crate::{
    core::common::{next_update_stamp, now_stamp, optional, required, search_condition},
    entities::{
        Assignment, AssignmentStatus, Distributor, DistributorStatus, Machine, assignment,
        distributor, machine,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Fields accepted when creating a distributor
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDistributor {
    /// Business name
    pub name: String,
    /// Contact email, unique across distributors
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Person to reach at the distributor
    pub contact_person: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or region
    pub state: Option<String>,
    /// Postal code
    pub pincode: Option<String>,
    /// GST registration number
    pub gst_number: Option<String>,
    /// PAN tax identifier
    pub pan_number: Option<String>,
    /// Defaults to [`DistributorStatus::Active`]
    pub status: Option<DistributorStatus>,
}

/// Changes applied by [`update_distributor`].
///
/// `None` leaves a field untouched. For nullable fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributorChanges {
    /// New business name
    pub name: Option<String>,
    /// New contact email
    pub email: Option<String>,
    /// New phone number
    pub phone: Option<String>,
    /// New contact person
    pub contact_person: Option<Option<String>>,
    /// New street address
    pub address: Option<Option<String>>,
    /// New city
    pub city: Option<Option<String>>,
    /// New state
    pub state: Option<Option<String>>,
    /// New postal code
    pub pincode: Option<Option<String>>,
    /// New GST number
    pub gst_number: Option<Option<String>>,
    /// New PAN
    pub pan_number: Option<Option<String>>,
    /// New status
    pub status: Option<DistributorStatus>,
}

/// Filters for [`list_distributors`]; unset fields do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorFilter {
    /// Only distributors with this status
    pub status: Option<DistributorStatus>,
    /// Exact city match
    pub city: Option<String>,
    /// Exact state match
    pub state: Option<String>,
    /// Case-insensitive substring matched against name, email and phone
    pub search: Option<String>,
}

/// One assignment of a distributor, paired with the machine it refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    /// The assignment row
    pub assignment: assignment::Model,
    /// The assigned machine, if it still exists
    pub machine: Option<machine::Model>,
}

const ENTITY: &str = "distributor";

/// Creates a distributor after validating the required contact fields.
///
/// # Errors
/// Returns [`Error::Validation`] when name, email or phone is blank, and
/// [`Error::Database`] when the insert fails (for example a duplicate email).
#[instrument(skip(db, new), fields(email = %new.email))]
pub async fn create_distributor(
    db: &DatabaseConnection,
    new: NewDistributor,
) -> Result<distributor::Model> {
    let name = required("name", &new.name)?;
    let email = required("email", &new.email)?;
    let phone = required("phone", &new.phone)?;
    let now = now_stamp();

    let distributor = distributor::ActiveModel {
        name: Set(name),
        email: Set(email),
        phone: Set(phone),
        contact_person: Set(optional(new.contact_person)),
        address: Set(optional(new.address)),
        city: Set(optional(new.city)),
        state: Set(optional(new.state)),
        pincode: Set(optional(new.pincode)),
        gst_number: Set(optional(new.gst_number)),
        pan_number: Set(optional(new.pan_number)),
        status: Set(new.status.unwrap_or(DistributorStatus::Active)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = distributor.insert(db).await?;
    info!(id = created.id, "Created distributor");
    Ok(created)
}

/// Finds a distributor by its unique ID.
pub async fn get_distributor_by_id(
    db: &DatabaseConnection,
    distributor_id: i64,
) -> Result<Option<distributor::Model>> {
    Distributor::find_by_id(distributor_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a distributor by its contact email.
pub async fn get_distributor_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<distributor::Model>> {
    Distributor::find()
        .filter(distributor::Column::Email.eq(email.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists distributors matching `filter`, newest first.
#[instrument(skip(db))]
pub async fn list_distributors(
    db: &DatabaseConnection,
    filter: &DistributorFilter,
) -> Result<Vec<distributor::Model>> {
    let mut query = Distributor::find();

    if let Some(status) = filter.status {
        query = query.filter(distributor::Column::Status.eq(status));
    }
    if let Some(city) = filter.city.as_deref() {
        query = query.filter(distributor::Column::City.eq(city));
    }
    if let Some(state) = filter.state.as_deref() {
        query = query.filter(distributor::Column::State.eq(state));
    }
    if let Some(condition) = filter.search.as_deref().and_then(|term| {
        search_condition(
            &[
                distributor::Column::Name,
                distributor::Column::Email,
                distributor::Column::Phone,
            ],
            term,
        )
    }) {
        query = query.filter(condition);
    }

    query
        .order_by_desc(distributor::Column::CreatedAt)
        .order_by_desc(distributor::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies `changes` to an existing distributor and refreshes its update time.
///
/// The ID and creation time are never modified.
#[instrument(skip(db, changes))]
pub async fn update_distributor(
    db: &DatabaseConnection,
    distributor_id: i64,
    changes: DistributorChanges,
) -> Result<distributor::Model> {
    let existing = Distributor::find_by_id(distributor_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found(ENTITY, distributor_id))?;
    let updated_at = next_update_stamp(existing.updated_at);

    let mut distributor: distributor::ActiveModel = existing.into();
    if let Some(name) = changes.name {
        distributor.name = Set(required("name", &name)?);
    }
    if let Some(email) = changes.email {
        distributor.email = Set(required("email", &email)?);
    }
    if let Some(phone) = changes.phone {
        distributor.phone = Set(required("phone", &phone)?);
    }
    if let Some(contact_person) = changes.contact_person {
        distributor.contact_person = Set(optional(contact_person));
    }
    if let Some(address) = changes.address {
        distributor.address = Set(optional(address));
    }
    if let Some(city) = changes.city {
        distributor.city = Set(optional(city));
    }
    if let Some(state) = changes.state {
        distributor.state = Set(optional(state));
    }
    if let Some(pincode) = changes.pincode {
        distributor.pincode = Set(optional(pincode));
    }
    if let Some(gst_number) = changes.gst_number {
        distributor.gst_number = Set(optional(gst_number));
    }
    if let Some(pan_number) = changes.pan_number {
        distributor.pan_number = Set(optional(pan_number));
    }
    if let Some(status) = changes.status {
        distributor.status = Set(status);
    }
    distributor.updated_at = Set(updated_at);

    let updated = distributor.update(db).await?;
    info!("Updated distributor");
    Ok(updated)
}

/// Deletes a distributor by ID.
#[instrument(skip(db))]
pub async fn delete_distributor(db: &DatabaseConnection, distributor_id: i64) -> Result<()> {
    let result = Distributor::delete_by_id(distributor_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found(ENTITY, distributor_id));
    }
    info!("Deleted distributor");
    Ok(())
}

/// Machines currently out with a distributor, i.e. those with an active assignment.
pub async fn get_assigned_machines(
    db: &DatabaseConnection,
    distributor_id: i64,
) -> Result<Vec<machine::Model>> {
    Machine::find()
        .inner_join(Assignment)
        .filter(assignment::Column::DistributorId.eq(distributor_id))
        .filter(assignment::Column::Status.eq(AssignmentStatus::Active))
        .order_by_asc(machine::Column::SerialNumber)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every assignment a distributor has held, newest first.
pub async fn get_assignment_history(
    db: &DatabaseConnection,
    distributor_id: i64,
) -> Result<Vec<AssignmentRecord>> {
    let rows = Assignment::find()
        .filter(assignment::Column::DistributorId.eq(distributor_id))
        .order_by_desc(assignment::Column::AssignedAt)
        .order_by_desc(assignment::Column::Id)
        .find_also_related(Machine)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(assignment, machine)| AssignmentRecord {
            assignment,
            machine,
        })
        .collect())
}
