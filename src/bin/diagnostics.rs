//! Prints a read-only health report for the configured database.

use dotenvy::dotenv;
use posdesk::{
    config::database::create_connection,
    core::diagnostics::{collect_report, format_report},
    errors::Result,
    logging::init_tracing,
};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let db = create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect: {}", e))?;

    let report = collect_report(&db)
        .await
        .inspect_err(|e| error!("Diagnostics failed: {}", e))?;

    print!("{}", format_report(&report)?);
    Ok(())
}
