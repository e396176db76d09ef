use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use formdata_server::config::AppConfig;
use formdata_server::contacts::{ContactImporter, PgContactStore, read_rows};
use formdata_server::migration::run_migrations;

#[derive(Parser, Debug)]
#[command(
    name = "import_contacts",
    about = "Import a contacts CSV file into the FormData database"
)]
struct Args {
    /// Path to the CSV file to import.
    #[arg(long)]
    file: PathBuf,

    /// Per-call storage timeout in milliseconds (0 disables it). Defaults to
    /// `FORMDATA_IMPORT_TIMEOUT_MS`.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env();
    let timeout = match args.timeout_ms {
        Some(0) => None,
        Some(ms) => Some(Duration::from_millis(ms)),
        None => config.import_timeout,
    };

    let content = std::fs::read(&args.file)?;
    let rows = read_rows(&content)?;
    log::info!("read {} rows from {}", rows.len(), args.file.display());

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;
    run_migrations(&pool).await?;

    let store = PgContactStore::new(pool.clone());
    let summary = ContactImporter::new(&store)
        .with_storage_timeout(timeout)
        .import(&rows)
        .await?;

    println!(
        "inserted: {}, duplicates: {}, malformed: {}",
        summary.inserted, summary.duplicates, summary.malformed
    );

    pool.close().await;
    Ok(())
}
