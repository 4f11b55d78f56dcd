//! Client build - Installs dependencies and bundles the admin front end.

use crate::errors::{Error, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::{info, instrument};

/// Commands run in order inside the client directory
const BUILD_STEPS: [&[&str]; 2] = [&["npm", "install"], &["npm", "run", "build"]];

/// Runs `npm install` and then `npm run build` in `client_dir`.
///
/// Child output goes straight to this process's stdout and stderr.
///
/// # Errors
/// [`Error::Config`] when `client_dir` is not a directory, [`Error::Command`] when a
/// step cannot be started or exits unsuccessfully. Later steps are skipped.
#[instrument(fields(dir = %client_dir.display()))]
pub async fn build_client(client_dir: &Path) -> Result<()> {
    if !client_dir.is_dir() {
        return Err(Error::Config {
            message: format!("client directory {} does not exist", client_dir.display()),
        });
    }

    for step in BUILD_STEPS {
        run_step(client_dir, step).await?;
    }

    info!("Client build finished");
    Ok(())
}

async fn run_step(dir: &Path, argv: &[&str]) -> Result<()> {
    let command_line = argv.join(" ");
    let Some((program, args)) = argv.split_first() else {
        return Ok(());
    };

    info!(command = %command_line, "Running");
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .await
        .map_err(|e| Error::Command {
            command: command_line.clone(),
            message: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Command {
            command: command_line,
            message: status.to_string(),
        })
    }
}
