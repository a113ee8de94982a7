mod config;
mod error;
mod linear_client;
mod mapping;
mod migrator;
mod models;
mod space_client;
mod statuses;
mod summary;

use config::Config;
use error::MigrationError;
use linear_client::LinearClient;
use migrator::Migrator;
use space_client::SpaceClient;
use summary::RunSummary;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), MigrationError> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "Migration aborted");
        return Err(e);
    }
    Ok(())
}

fn run() -> Result<(), MigrationError> {
    let config = Config::from_env()?;
    let linear = LinearClient::new(&config).map_err(MigrationError::Client)?;
    let space = SpaceClient::new(&config).map_err(MigrationError::Client)?;

    let mut summary = RunSummary::default();
    let result = Migrator::new(&linear, &space).run(&mut summary);
    summary.log(if result.is_ok() { "finished" } else { "aborted" });
    result
}
