use probe_browser::database::connection::Database;
use probe_browser::database::migrations;
use tempfile::TempDir;

#[test]
fn test_open_in_memory_creates_tables() {
    let db = Database::open_in_memory().expect("Failed to open database");
    let conn = db.connection();

    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap();
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .filter_map(|r| r.ok())
        .collect();

    assert!(tables.contains(&"bookmarks".to_string()));
    assert!(tables.contains(&"history".to_string()));
    assert!(tables.contains(&"schema_version".to_string()));
}

#[test]
fn test_schema_version_is_recorded() {
    let db = Database::open_in_memory().expect("Failed to open database");
    assert_eq!(
        migrations::get_schema_version(db.connection()),
        migrations::CURRENT_SCHEMA_VERSION
    );
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("Failed to open database");
    // A second run must be a no-op, not an error.
    migrations::run_all(db.connection()).expect("Re-running migrations failed");
    assert_eq!(
        migrations::get_schema_version(db.connection()),
        migrations::CURRENT_SCHEMA_VERSION
    );
}

#[test]
fn test_open_on_disk_persists_across_reopen() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = tmp.path().join("probe.db");

    {
        let db = Database::open(&path).expect("Failed to open database");
        db.connection()
            .execute(
                "INSERT INTO history (id, url, title, visit_time, visit_count) VALUES ('x', 'https://a.com', 'A', 1, 1)",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&path).expect("Failed to reopen database");
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
