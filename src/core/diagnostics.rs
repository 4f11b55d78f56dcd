//! Diagnostics - Read-only health report for a connected database.
//!
//! Collects row counts for every known table plus machine breakdowns by
//! manufacturer, device type and status. Nothing is written.

use crate::{
    entities::{
        Assignment, Distributor, InventoryStock, Machine, MachineStatus, MachineType, Order,
        Retailer, ServiceProvider, inventory_stock, machine,
    },
    errors::Result,
};
use sea_orm::{
    ActiveEnum, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, sea_query::Expr,
};
use std::fmt::Write;
use tracing::{info, instrument};

/// Label used for machines without a recorded manufacturer
const UNKNOWN_MANUFACTURER: &str = "(unknown)";

/// Machine count for one manufacturer and device type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerBreakdown {
    /// Manufacturer, or `(unknown)` when unset
    pub manufacturer: String,
    /// Kind of device
    pub machine_type: MachineType,
    /// Number of machines
    pub count: i64,
}

/// Everything the diagnostics tool prints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsReport {
    /// Row count per table, in schema order
    pub table_counts: Vec<(&'static str, u64)>,
    /// Sorted by manufacturer, then device type
    pub by_manufacturer: Vec<ManufacturerBreakdown>,
    /// Machine count per status
    pub by_status: Vec<(MachineStatus, i64)>,
    /// Inventory stock rows
    pub inventory: Vec<inventory_stock::Model>,
}

/// Round-trips a trivial request to confirm the database is reachable.
#[instrument(skip(db))]
pub async fn check_connectivity(db: &DatabaseConnection) -> Result<()> {
    db.ping().await?;
    info!("Database is reachable");
    Ok(())
}

/// Counts the rows of every table the crate knows about.
pub async fn count_tables(db: &DatabaseConnection) -> Result<Vec<(&'static str, u64)>> {
    Ok(vec![
        ("service_providers", ServiceProvider::find().count(db).await?),
        ("distributors", Distributor::find().count(db).await?),
        ("retailers", Retailer::find().count(db).await?),
        ("machines", Machine::find().count(db).await?),
        ("assignments", Assignment::find().count(db).await?),
        ("inventory_stock", InventoryStock::find().count(db).await?),
        ("orders", Order::find().count(db).await?),
    ])
}

/// Groups machines by manufacturer and device type.
pub async fn machines_by_manufacturer(
    db: &DatabaseConnection,
) -> Result<Vec<ManufacturerBreakdown>> {
    let rows: Vec<(Option<String>, MachineType, i64)> = Machine::find()
        .select_only()
        .column(machine::Column::Manufacturer)
        .column(machine::Column::MachineType)
        .column_as(Expr::col(machine::Column::Id).count(), "count")
        .group_by(machine::Column::Manufacturer)
        .group_by(machine::Column::MachineType)
        .into_tuple()
        .all(db)
        .await?;

    let mut breakdown: Vec<ManufacturerBreakdown> = rows
        .into_iter()
        .map(|(manufacturer, machine_type, count)| ManufacturerBreakdown {
            manufacturer: manufacturer.unwrap_or_else(|| UNKNOWN_MANUFACTURER.to_string()),
            machine_type,
            count,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        a.manufacturer
            .cmp(&b.manufacturer)
            .then_with(|| a.machine_type.to_value().cmp(&b.machine_type.to_value()))
    });
    Ok(breakdown)
}

/// Counts machines per inventory status.
pub async fn machines_by_status(db: &DatabaseConnection) -> Result<Vec<(MachineStatus, i64)>> {
    let mut rows: Vec<(MachineStatus, i64)> = Machine::find()
        .select_only()
        .column(machine::Column::Status)
        .column_as(Expr::col(machine::Column::Id).count(), "count")
        .group_by(machine::Column::Status)
        .into_tuple()
        .all(db)
        .await?;
    rows.sort_by_key(|(status, _)| status.to_value());
    Ok(rows)
}

/// Pings the database and gathers the full report.
#[instrument(skip(db))]
pub async fn collect_report(db: &DatabaseConnection) -> Result<DiagnosticsReport> {
    check_connectivity(db).await?;

    let report = DiagnosticsReport {
        table_counts: count_tables(db).await?,
        by_manufacturer: machines_by_manufacturer(db).await?,
        by_status: machines_by_status(db).await?,
        inventory: InventoryStock::find()
            .order_by_asc(inventory_stock::Column::Manufacturer)
            .order_by_asc(inventory_stock::Column::MachineType)
            .all(db)
            .await?,
    };
    info!(
        manufacturers = report.by_manufacturer.len(),
        inventory_rows = report.inventory.len(),
        "Collected diagnostics"
    );
    Ok(report)
}

/// Renders the report as plain text for the terminal.
pub fn format_report(report: &DiagnosticsReport) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "Connection: OK\n")?;

    writeln!(out, "Table row counts")?;
    for (table, count) in &report.table_counts {
        writeln!(out, "  {table:<20} {count:>8}")?;
    }

    writeln!(out, "\nMachines by manufacturer")?;
    if report.by_manufacturer.is_empty() {
        writeln!(out, "  (none)")?;
    }
    let mut current: Option<&str> = None;
    for row in &report.by_manufacturer {
        if current != Some(row.manufacturer.as_str()) {
            writeln!(out, "  {}", row.manufacturer)?;
            current = Some(row.manufacturer.as_str());
        }
        writeln!(
            out,
            "    {:<16} {:>8}",
            row.machine_type.to_value(),
            row.count
        )?;
    }

    writeln!(out, "\nMachines by status")?;
    if report.by_status.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (status, count) in &report.by_status {
        writeln!(out, "  {:<20} {count:>8}", status.to_value())?;
    }

    writeln!(out, "\nInventory stock")?;
    if report.inventory.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for row in &report.inventory {
        writeln!(
            out,
            "  {} {}: total {}, available {}, assigned {}",
            row.manufacturer,
            row.machine_type.to_value(),
            row.total_count,
            row.available_count,
            row.assigned_count
        )?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::machine::{NewMachine, create_machine};
    use crate::test_utils::{create_test_distributor, setup_test_db};
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, Set};

    async fn add_machine(
        db: &DatabaseConnection,
        serial: &str,
        machine_type: MachineType,
        manufacturer: Option<&str>,
        status: MachineStatus,
    ) -> Result<()> {
        let mut new = NewMachine::new(serial, format!("M-{serial}"), format!("T-{serial}"), machine_type);
        new.manufacturer = manufacturer.map(ToString::to_string);
        new.status = Some(status);
        create_machine(db, new).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_database_report() -> Result<()> {
        let db = setup_test_db().await?;
        let report = collect_report(&db).await?;

        assert_eq!(report.table_counts.len(), 7);
        assert!(report.table_counts.iter().all(|(_, count)| *count == 0));
        assert!(report.by_manufacturer.is_empty());
        assert!(report.by_status.is_empty());

        let text = format_report(&report)?;
        assert!(text.starts_with("Connection: OK"));
        assert!(text.contains("machines"));
        assert!(text.contains("(none)"));
        Ok(())
    }

    #[tokio::test]
    async fn test_machine_breakdowns() -> Result<()> {
        let db = setup_test_db().await?;
        add_machine(&db, "P1", MachineType::Pos, Some("Telering"), MachineStatus::Available).await?;
        add_machine(&db, "P2", MachineType::Pos, Some("Telering"), MachineStatus::Assigned).await?;
        add_machine(&db, "S1", MachineType::Soundbox, Some("Telering"), MachineStatus::Available).await?;
        add_machine(&db, "S2", MachineType::Soundbox, None, MachineStatus::Retired).await?;
        create_test_distributor(&db, "Acme", "acme@example.com").await?;

        let report = collect_report(&db).await?;

        assert!(report.table_counts.contains(&("machines", 4)));
        assert!(report.table_counts.contains(&("distributors", 1)));
        assert_eq!(
            report.by_manufacturer,
            vec![
                ManufacturerBreakdown {
                    manufacturer: "(unknown)".to_string(),
                    machine_type: MachineType::Soundbox,
                    count: 1,
                },
                ManufacturerBreakdown {
                    manufacturer: "Telering".to_string(),
                    machine_type: MachineType::Pos,
                    count: 2,
                },
                ManufacturerBreakdown {
                    manufacturer: "Telering".to_string(),
                    machine_type: MachineType::Soundbox,
                    count: 1,
                },
            ]
        );
        assert_eq!(
            report.by_status,
            vec![
                (MachineStatus::Assigned, 1),
                (MachineStatus::Available, 2),
                (MachineStatus::Retired, 1),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_inventory_rows_are_reported() -> Result<()> {
        let db = setup_test_db().await?;
        inventory_stock::ActiveModel {
            manufacturer: Set("Telering".to_string()),
            machine_type: Set(MachineType::Soundbox),
            total_count: Set(1000),
            available_count: Set(990),
            assigned_count: Set(10),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let report = collect_report(&db).await?;
        assert_eq!(report.inventory.len(), 1);

        let text = format_report(&report)?;
        assert!(text.contains("Telering SOUNDBOX: total 1000, available 990, assigned 10"));
        Ok(())
    }
}
