//! Seed SQL generation for a manufacturer's device batch.
//!
//! Produces plain SQL text for manual application: one `INSERT` per machine, a
//! partner-type correction for another provider, and an upsert of the aggregate
//! inventory counts. No database is contacted.
//!
//! Identifiers are numbered across the whole batch (POS first, then soundboxes), so
//! serial numbers and `(mid, tid)` pairs never collide between device types. The
//! standee flag on soundboxes is drawn from a [`StdRng`] seeded by the plan, which
//! makes the output byte-identical for a given plan.

use crate::{
    config::seed::SeedPlan,
    core::sql::quote_literal,
    entities::{MachineStatus, MachineType},
    errors::Result,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::ActiveEnum;
use std::fmt::Write;
use std::path::PathBuf;
use tracing::{info, instrument};

const POS_SERIAL_PREFIX: &str = "TLPOS";
const SOUNDBOX_SERIAL_PREFIX: &str = "TLSB";
const QR_PREFIX: &str = "TLQR";
const MID_PREFIX: &str = "TLM";
const TID_PREFIX: &str = "TLT";

/// Serial number of the `n`th (1-based) device of a type
fn serial_number(machine_type: MachineType, n: u32) -> String {
    match machine_type {
        MachineType::Pos => format!("{POS_SERIAL_PREFIX}{n:06}"),
        MachineType::Soundbox => format!("{SOUNDBOX_SERIAL_PREFIX}{n:06}"),
    }
}

/// Merchant identifier for the `index`th (1-based) device of the whole batch
fn mid(index: u32) -> String {
    format!("{MID_PREFIX}{index:09}")
}

/// Terminal identifier for the `index`th (1-based) device of the whole batch
fn tid(index: u32) -> String {
    format!("{TID_PREFIX}{index:07}")
}

fn qr_code(n: u32) -> String {
    format!("{QR_PREFIX}{n:06}")
}

/// Renders the full seed script for `plan`.
///
/// # Errors
/// Returns [`crate::errors::Error::Config`] when the plan's counts overflow.
pub fn generate_seed_sql(plan: &SeedPlan) -> Result<String> {
    // Bounds every identifier index below
    plan.total_machines()?;
    let mut rng = StdRng::seed_from_u64(plan.random_seed);
    let manufacturer = quote_literal(&plan.manufacturer);
    let available = quote_literal(&MachineStatus::Available.to_value());
    let mut sql = String::new();

    writeln!(
        sql,
        "-- Seed data for {} machines: {} POS, {} SOUNDBOX",
        plan.manufacturer, plan.pos_count, plan.soundbox_count
    )?;
    writeln!(sql, "-- Random seed: {}\n", plan.random_seed)?;

    writeln!(sql, "-- POS machines")?;
    let pos_type = quote_literal(&MachineType::Pos.to_value());
    let pos_model = quote_literal(&plan.pos_model);
    for n in 1..=plan.pos_count {
        writeln!(
            sql,
            "INSERT INTO machines (serial_number, mid, tid, machine_type, model, manufacturer, status) \
             VALUES ({}, {}, {}, {pos_type}, {pos_model}, {manufacturer}, {available}) \
             ON CONFLICT (serial_number) DO NOTHING;",
            quote_literal(&serial_number(MachineType::Pos, n)),
            quote_literal(&mid(n)),
            quote_literal(&tid(n)),
        )?;
    }

    writeln!(sql, "\n-- SOUNDBOX machines")?;
    let soundbox_type = quote_literal(&MachineType::Soundbox.to_value());
    let soundbox_model = quote_literal(&plan.soundbox_model);
    for n in 1..=plan.soundbox_count {
        let index = plan.pos_count + n;
        let has_standee = rng.gen_bool(0.5);
        writeln!(
            sql,
            "INSERT INTO machines (serial_number, mid, tid, machine_type, model, manufacturer, status, qr_code, has_standee) \
             VALUES ({}, {}, {}, {soundbox_type}, {soundbox_model}, {manufacturer}, {available}, {}, {}) \
             ON CONFLICT (serial_number) DO NOTHING;",
            quote_literal(&serial_number(MachineType::Soundbox, n)),
            quote_literal(&mid(index)),
            quote_literal(&tid(index)),
            quote_literal(&qr_code(n)),
            if has_standee { "TRUE" } else { "FALSE" },
        )?;
    }

    writeln!(sql, "\n-- Partner type correction")?;
    writeln!(
        sql,
        "UPDATE service_providers SET partner_type = {} WHERE name = {};",
        quote_literal(&plan.partner_update.partner_type),
        quote_literal(&plan.partner_update.provider),
    )?;

    writeln!(sql, "\n-- Inventory counts")?;
    writeln!(
        sql,
        "INSERT INTO inventory_stock (manufacturer, machine_type, total_count, available_count, assigned_count) VALUES"
    )?;
    writeln!(
        sql,
        "    ({manufacturer}, {pos_type}, {count}, {count}, 0),",
        count = plan.pos_count
    )?;
    writeln!(
        sql,
        "    ({manufacturer}, {soundbox_type}, {count}, {count}, 0)",
        count = plan.soundbox_count
    )?;
    writeln!(
        sql,
        "ON CONFLICT (manufacturer, machine_type) DO UPDATE SET \
         total_count = EXCLUDED.total_count, \
         available_count = EXCLUDED.available_count, \
         updated_at = NOW();"
    )?;

    Ok(sql)
}

/// Generates the seed script and writes it to the plan's output path.
///
/// Parent directories are created as needed. Returns the path written.
#[instrument(skip(plan), fields(output = %plan.output_path.display()))]
pub fn write_seed_file(plan: &SeedPlan) -> Result<PathBuf> {
    let sql = generate_seed_sql(plan)?;
    if let Some(parent) = plan
        .output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&plan.output_path, &sql)?;
    info!(bytes = sql.len(), "Wrote seed SQL");
    Ok(plan.output_path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::seed::PartnerTypeUpdate;
    use crate::core::sql::split_statements;
    use std::collections::HashSet;

    fn machine_inserts<'a>(sql: &'a str, machine_type: &str) -> Vec<&'a str> {
        let needle = format!("'{machine_type}'");
        sql.lines()
            .filter(|line| line.starts_with("INSERT INTO machines") && line.contains(&needle))
            .collect()
    }

    #[test]
    fn test_identifier_formats() {
        assert_eq!(serial_number(MachineType::Pos, 7), "TLPOS000007");
        assert_eq!(serial_number(MachineType::Soundbox, 1000), "TLSB001000");
        assert_eq!(mid(391), "TLM000000391");
        assert_eq!(tid(1390), "TLT0001390");
        assert_eq!(qr_code(12), "TLQR000012");
    }

    #[test]
    fn test_default_plan_statement_counts() -> Result<()> {
        let sql = generate_seed_sql(&SeedPlan::default())?;

        assert_eq!(machine_inserts(&sql, "POS").len(), 390);
        assert_eq!(machine_inserts(&sql, "SOUNDBOX").len(), 1000);

        let statements = split_statements(&sql);
        // Every machine, one partner update, one inventory upsert
        assert_eq!(statements.len(), 390 + 1000 + 2);
        assert_eq!(
            statements
                .iter()
                .filter(|s| s.contains("UPDATE service_providers"))
                .count(),
            1
        );
        assert!(
            statements
                .iter()
                .any(|s| s.contains("ON CONFLICT (manufacturer, machine_type) DO UPDATE"))
        );
        Ok(())
    }

    #[test]
    fn test_serials_and_identifier_pairs_are_unique() -> Result<()> {
        let sql = generate_seed_sql(&SeedPlan::default())?;
        let rows: Vec<Vec<&str>> = sql
            .lines()
            .filter(|line| line.starts_with("INSERT INTO machines"))
            .map(|line| line.split('\'').collect())
            .collect();
        assert_eq!(rows.len(), 1390);

        // Quoted values sit at the odd positions of a split on quotes
        let serials: HashSet<&str> = rows.iter().map(|parts| parts[1]).collect();
        let pairs: HashSet<(&str, &str)> = rows.iter().map(|parts| (parts[3], parts[5])).collect();
        assert_eq!(serials.len(), 1390);
        assert_eq!(pairs.len(), 1390);
        Ok(())
    }

    #[test]
    fn test_output_is_deterministic_for_a_seed() -> Result<()> {
        let plan = SeedPlan::default();
        let a = generate_seed_sql(&plan)?;
        assert_eq!(a, generate_seed_sql(&plan)?);

        let reseeded = SeedPlan {
            random_seed: 7,
            ..SeedPlan::default()
        };
        let b = generate_seed_sql(&reseeded)?;
        assert_ne!(a, b);

        // Only the standee flags and the seed banner differ
        let strip = |sql: &str| {
            sql.lines()
                .filter(|line| !line.starts_with("-- Random seed"))
                .map(|line| line.replace("TRUE)", "?)").replace("FALSE)", "?)"))
                .collect::<Vec<_>>()
        };
        assert_eq!(strip(&a), strip(&b));
        Ok(())
    }

    #[test]
    fn test_standee_flags_vary() -> Result<()> {
        let sql = generate_seed_sql(&SeedPlan::default())?;
        let soundboxes = machine_inserts(&sql, "SOUNDBOX");
        let with_standee = soundboxes
            .iter()
            .filter(|line| line.contains(", TRUE)"))
            .count();
        assert!(with_standee > 0 && with_standee < soundboxes.len());
        assert!(
            machine_inserts(&sql, "POS")
                .iter()
                .all(|line| !line.contains("has_standee"))
        );
        Ok(())
    }

    #[test]
    fn test_partner_update_is_quoted() -> Result<()> {
        let plan = SeedPlan {
            partner_update: PartnerTypeUpdate {
                provider: "O'Neil Payments".to_string(),
                partner_type: "SOUNDBOX".to_string(),
            },
            ..SeedPlan::default()
        };
        let sql = generate_seed_sql(&plan)?;
        assert!(sql.contains(
            "UPDATE service_providers SET partner_type = 'SOUNDBOX' WHERE name = 'O''Neil Payments';"
        ));
        Ok(())
    }

    #[test]
    fn test_inventory_counts_follow_plan() -> Result<()> {
        let plan = SeedPlan {
            pos_count: 3,
            soundbox_count: 2,
            ..SeedPlan::default()
        };
        let sql = generate_seed_sql(&plan)?;
        assert!(sql.contains("('Telering', 'POS', 3, 3, 0),"));
        assert!(sql.contains("('Telering', 'SOUNDBOX', 2, 2, 0)"));
        assert_eq!(machine_inserts(&sql, "SOUNDBOX").len(), 2);
        // Soundbox identifiers continue after the POS range
        assert!(sql.contains("'TLM000000005'"));
        Ok(())
    }

    #[test]
    fn test_oversized_plan_is_rejected() {
        let plan = SeedPlan {
            pos_count: u32::MAX - 1,
            soundbox_count: 2,
            ..SeedPlan::default()
        };
        assert!(matches!(
            generate_seed_sql(&plan),
            Err(crate::errors::Error::Config { .. })
        ));
    }

    #[test]
    fn test_write_seed_file_creates_directories() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let plan = SeedPlan {
            pos_count: 1,
            soundbox_count: 1,
            output_path: dir.path().join("nested/out.sql"),
            ..SeedPlan::default()
        };

        let written = write_seed_file(&plan)?;
        assert_eq!(written, plan.output_path);
        assert_eq!(std::fs::read_to_string(&written)?, generate_seed_sql(&plan)?);

        Ok(())
    }
}
