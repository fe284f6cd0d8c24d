use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quote_core::SettingsStore;
use quote_data::TemplateLoader;
use quote_db_sqlite::{SqliteKeyValueStore, default_database_path, ensure_parent_dir};

/// Load template lists from a CSV file into the settings database.
///
/// The CSV file should have the following columns:
/// - list: weekly_tasks, monthly_tasks, contractor_responsibilities,
///   customer_responsibilities or extra_services
/// - text: the entry text (the label for extra services)
/// - price: the price text, required for extra_services
///
/// Every list named in the file is replaced; other lists are kept.
#[derive(Parser, Debug)]
#[command(name = "quote-template-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing template entries
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database path or URL (created if missing). Defaults to the
    /// database `cleaning-quote` uses.
    #[arg(short, long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let database = args
        .database
        .unwrap_or_else(|| default_database_path().to_string_lossy().into_owned());

    ensure_parent_dir(&database)
        .with_context(|| format!("Failed to create database directory for {database}"))?;
    let store = SqliteKeyValueStore::new(&database)
        .await
        .with_context(|| format!("Failed to connect to database: {database}"))?;
    store
        .run_migrations()
        .await
        .context("Failed to run migrations")?;

    println!("Loading templates from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let entries = TemplateLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} entries from CSV", entries.len());

    let mut settings = SettingsStore::load(Box::new(store)).await;
    let loaded = TemplateLoader::load(&mut settings, &entries)
        .await
        .context("Failed to save templates")?;

    println!("Successfully loaded {} template entries.", loaded);

    Ok(())
}
