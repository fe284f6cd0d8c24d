//! Integration tests for template loading against the SQLite backend.

use pretty_assertions::assert_eq;
use quote_core::{ExtraService, SettingsStore, TemplateList};
use quote_data::{TemplateLoader, TemplateLoaderError};
use quote_db_sqlite::SqliteKeyValueStore;

const TEST_CSV: &str = include_str!("../test-data/templates.csv");

async fn open_store(path: &std::path::Path) -> SettingsStore {
    let store = SqliteKeyValueStore::new(&path.to_string_lossy())
        .await
        .expect("Failed to open database");
    store
        .run_migrations()
        .await
        .expect("Failed to run migrations");
    SettingsStore::load(Box::new(store)).await
}

#[tokio::test]
async fn test_load_all_lists_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("settings.db");

    let entries = TemplateLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    {
        let mut settings = open_store(&db).await;
        let loaded = TemplateLoader::load(&mut settings, &entries)
            .await
            .expect("Failed to load templates");
        assert_eq!(loaded, 9);
    }

    let settings = open_store(&db).await;
    let current = settings.settings();
    assert_eq!(current.list(TemplateList::WeeklyTasks).len(), 3);
    assert_eq!(
        current.list(TemplateList::WeeklyTasks)[2],
        "Clean and sanitize restrooms, including fixtures."
    );
    assert_eq!(current.list(TemplateList::MonthlyTasks), ["Dust baseboards."]);
    assert_eq!(current.list(TemplateList::CustomerResponsibilities).len(), 2);
    assert_eq!(
        current.agreement_template.extra_services[0],
        ExtraService::new("Refrigerator inside cleaning", "€35 each")
    );
}

#[tokio::test]
async fn test_loading_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("settings.db");
    let entries = TemplateLoader::parse(TEST_CSV.as_bytes()).unwrap();

    let mut settings = open_store(&db).await;
    TemplateLoader::load(&mut settings, &entries).await.unwrap();
    let first = settings.settings().clone();
    TemplateLoader::load(&mut settings, &entries).await.unwrap();

    assert_eq!(settings.settings(), &first);
}

#[tokio::test]
async fn test_invalid_file_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("settings.db");

    let result = TemplateLoader::parse("list,text,price\nbad_list,x,\n".as_bytes());
    assert!(matches!(
        result,
        Err(TemplateLoaderError::UnknownList { row: 1, .. })
    ));

    let settings = open_store(&db).await;
    assert_eq!(settings.settings(), &quote_core::Settings::default());
}
