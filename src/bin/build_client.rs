//! Builds the admin front-end client.

use dotenvy::dotenv;
use posdesk::{
    config::settings::ToolSettings, core::client_build::build_client, errors::Result,
    logging::init_tracing,
};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let settings = ToolSettings::from_env()?;
    build_client(&settings.client_dir)
        .await
        .inspect_err(|e| error!("Client build failed: {}", e))?;

    println!("Client built in {}", settings.client_dir.display());
    Ok(())
}
