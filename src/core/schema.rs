//! Schema application - Runs a SQL script one statement at a time.
//!
//! Statements are executed strictly in order with a pause between them. A failing
//! statement is logged and counted and the remaining statements still run; nothing
//! is rolled back. After applying, [`verify_tables`] checks that the tables the rest
//! of the crate relies on can be queried.

use crate::{core::sql::split_statements, errors::Result};
use sea_orm::{ConnectionTrait, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Tables that must be queryable after the schema has been applied
pub const EXPECTED_TABLES: [&str; 6] = [
    "service_providers",
    "distributors",
    "machines",
    "assignments",
    "inventory_stock",
    "retailers",
];

/// Longest statement prefix kept in a failure report
const PREVIEW_CHARS: usize = 80;

/// One statement that the database rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFailure {
    /// 1-based position of the statement in the script
    pub position: usize,
    /// Start of the statement text
    pub preview: String,
    /// Error reported by the database
    pub error: String,
}

/// Outcome of applying a script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Statements found in the script
    pub total: usize,
    /// Statements that executed without error
    pub succeeded: usize,
    /// Statements that failed, in script order
    pub failures: Vec<StatementFailure>,
}

impl ApplyReport {
    /// Number of failed statements
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Row count of one expected table, or why it could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStatus {
    /// Table name
    pub table: String,
    /// Row count, or the error raised while counting
    pub rows: std::result::Result<i64, String>,
}

/// Executes `statements` in order, pausing `pause` between consecutive statements.
#[instrument(skip(db, statements), fields(total = statements.len()))]
pub async fn apply_statements<C>(db: &C, statements: &[String], pause: Duration) -> ApplyReport
where
    C: ConnectionTrait,
{
    let mut report = ApplyReport {
        total: statements.len(),
        ..ApplyReport::default()
    };

    for (index, statement) in statements.iter().enumerate() {
        if index > 0 && !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let position = index + 1;
        match db.execute_unprepared(statement).await {
            Ok(_) => {
                debug!(position, "Statement applied");
                report.succeeded += 1;
            }
            Err(e) => {
                warn!(position, error = %e, "Statement failed, continuing");
                report.failures.push(StatementFailure {
                    position,
                    preview: preview(statement),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        succeeded = report.succeeded,
        failed = report.failed(),
        "Schema statements applied"
    );
    report
}

/// Reads a SQL file, splits it into statements and applies them.
///
/// # Errors
/// Only failing to read the file is an error; statement failures are reported in
/// the returned [`ApplyReport`].
pub async fn apply_schema_file<C>(db: &C, path: &Path, pause: Duration) -> Result<ApplyReport>
where
    C: ConnectionTrait,
{
    let sql = std::fs::read_to_string(path)?;
    let statements = split_statements(&sql);
    info!(
        file = %path.display(),
        statements = statements.len(),
        "Applying schema file"
    );
    Ok(apply_statements(db, &statements, pause).await)
}

/// Counts the rows of each table, recording failures instead of stopping.
pub async fn verify_tables<C>(db: &C, tables: &[&str]) -> Vec<TableStatus>
where
    C: ConnectionTrait,
{
    let mut statuses = Vec::with_capacity(tables.len());
    for table in tables {
        let rows = count_rows(db, table).await.map_err(|e| e.to_string());
        if let Err(error) = &rows {
            warn!(table, error, "Table verification failed");
        }
        statuses.push(TableStatus {
            table: (*table).to_string(),
            rows,
        });
    }
    statuses
}

async fn count_rows<C>(db: &C, table: &str) -> Result<i64>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let sql = format!("SELECT COUNT(*) AS row_count FROM \"{}\"", table.replace('"', "\"\""));
    let row = db
        .query_one(Statement::from_string(backend, sql))
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("no count returned for {table}")))?;
    Ok(row.try_get::<i64>("", "row_count")?)
}

fn preview(statement: &str) -> String {
    let flat = statement.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let head: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        flat
    }
}
