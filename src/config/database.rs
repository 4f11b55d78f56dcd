//! Database configuration module.
//!
//! The hosted PostgreSQL schema is owned outside this crate (see `sql/schema.sql`),
//! so the tools only ever connect to it. `create_tables` builds the same tables from
//! the entity definitions, which is how tests and local `SQLite` databases get a schema
//! without running the PostgreSQL DDL.

use crate::entities::{
    Assignment, Distributor, InventoryStock, Machine, Order, Retailer, ServiceProvider,
};
use crate::errors::{Error, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Environment variable holding the connection URL, including credentials.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Reads the database URL from the environment.
///
/// Unlike a local file database there is no sensible default for a hosted store,
/// so an absent or empty variable is an error.
pub fn database_url() -> Result<String> {
    database_url_from(|name| std::env::var(name).ok())
}

/// Same as [`database_url`], resolving variables through `lookup`.
pub fn database_url_from<F>(lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(DATABASE_URL_VAR)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| Error::MissingEnv {
            name: DATABASE_URL_VAR.to_string(),
        })
}

/// Establishes a connection using `DATABASE_URL`.
///
/// `SQLx` statement logging reaches the `tracing` subscriber, so
/// `RUST_LOG=sqlx=info` shows every query a tool sends.
#[instrument]
pub async fn create_connection() -> Result<DatabaseConnection> {
    let url = database_url()?;
    connect(&url).await
}

/// Connects to the given URL.
pub async fn connect(url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging(true);

    debug!("Opening database connection");
    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "Database connection established");
    Ok(db)
}

/// Creates every table from the entity definitions.
///
/// Referenced tables are created before the tables that point at them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let statements = [
        schema.create_table_from_entity(ServiceProvider),
        schema.create_table_from_entity(Distributor),
        schema.create_table_from_entity(Retailer),
        schema.create_table_from_entity(Machine),
        schema.create_table_from_entity(Assignment),
        schema.create_table_from_entity(InventoryStock),
        schema.create_table_from_entity(Order),
    ];

    for statement in &statements {
        db.execute(builder.build(statement)).await?;
    }

    Ok(())
}
