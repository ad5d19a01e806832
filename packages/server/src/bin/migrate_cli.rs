//! CLI for applying and inspecting schema migrations
//!
//! Outputs one JSON document per invocation so deploy scripts can parse it.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sqlx::migrate::Migrator;
use sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migration CLI for the campus events database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations
    Run,

    /// List migrations and whether each is applied
    Info,
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<Vec<MigrationInfo>>,
}

#[derive(Serialize)]
struct MigrationInfo {
    version: i64,
    description: String,
    applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    installed_on: Option<DateTime<Utc>>,
}

fn output(resp: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => cmd_run().await,
        Commands::Info => cmd_info().await,
    }
}

async fn get_pool() -> Result<PgPool> {
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn cmd_run() -> Result<()> {
    let pool = get_pool().await?;

    match MIGRATOR.run(&pool).await {
        Ok(()) => output(&Response {
            success: true,
            message: Some("Migrations applied".to_string()),
            migrations: Some(list_migrations(&pool).await?),
        }),
        Err(e) => output(&Response {
            success: false,
            message: Some(e.to_string()),
            migrations: None,
        }),
    }
}

async fn cmd_info() -> Result<()> {
    let pool = get_pool().await?;
    output(&Response {
        success: true,
        message: None,
        migrations: Some(list_migrations(&pool).await?),
    })
}

async fn list_migrations(pool: &PgPool) -> Result<Vec<MigrationInfo>> {
    let applied = applied_versions(pool).await?;

    Ok(MIGRATOR
        .iter()
        .map(|m| {
            let installed_on = applied.get(&m.version).copied();
            MigrationInfo {
                version: m.version,
                description: m.description.to_string(),
                applied: installed_on.is_some(),
                installed_on,
            }
        })
        .collect())
}

/// Successfully applied versions; empty before the first `run`
async fn applied_versions(pool: &PgPool) -> Result<HashMap<i64, DateTime<Utc>>> {
    let (table_exists,): (bool,) =
        sqlx::query_as("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;
    if !table_exists {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i64, DateTime<Utc>)> = sqlx::query_as(
        "SELECT version, installed_on FROM _sqlx_migrations WHERE success ORDER BY version",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().collect())
}
