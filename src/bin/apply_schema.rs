//! Applies the schema file statement by statement, then checks the expected tables.

use dotenvy::dotenv;
use posdesk::{
    config::{database::create_connection, settings::ToolSettings},
    core::schema::{EXPECTED_TABLES, apply_schema_file, verify_tables},
    errors::Result,
    logging::init_tracing,
};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let settings = ToolSettings::from_env()?;
    let db = create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect: {}", e))?;

    let report = apply_schema_file(&db, &settings.schema_file, settings.statement_pause)
        .await
        .inspect_err(|e| error!("Failed to read schema file: {}", e))?;

    println!(
        "Applied {} of {} statements from {}",
        report.succeeded,
        report.total,
        settings.schema_file.display()
    );
    for failure in &report.failures {
        println!(
            "  #{} failed: {}\n      {}",
            failure.position, failure.error, failure.preview
        );
    }

    println!("\nTable check");
    for status in verify_tables(&db, &EXPECTED_TABLES).await {
        match status.rows {
            Ok(rows) => println!("  {:<20} ok ({rows} rows)", status.table),
            Err(e) => println!("  {:<20} MISSING: {e}", status.table),
        }
    }

    info!(failed = report.failed(), "Schema application finished");
    Ok(())
}
