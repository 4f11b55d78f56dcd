//! Writes the device seed SQL file for manual application.

use dotenvy::dotenv;
use posdesk::{
    config::{seed::load_seed_plan_or_default, settings::ToolSettings},
    core::seed::write_seed_file,
    errors::Result,
    logging::init_tracing,
};
use tracing::{error, info};

fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let settings = ToolSettings::from_env()?;
    let plan = load_seed_plan_or_default(&settings.seed_config)?;
    let total = plan.total_machines()?;
    info!(
        manufacturer = %plan.manufacturer,
        pos = plan.pos_count,
        soundbox = plan.soundbox_count,
        "Generating seed SQL"
    );

    let path = write_seed_file(&plan)
        .inspect_err(|e| error!("Failed to write seed SQL: {}", e))?;

    println!(
        "Wrote {} machine inserts for {} to {}",
        total,
        plan.manufacturer,
        path.display()
    );
    println!("Apply it manually with the database's SQL console or psql.");
    Ok(())
}
