//! Miscellaneous endpoint and infrastructure tests.

mod common;

use axum::http::StatusCode;
use common::TestClient;
use fintrack::db::{create_pool, migrations};

#[tokio::test]
async fn test_health_endpoint() {
    let client = TestClient::new();
    let (status, body) = client.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

/// The recommended category list is served for client pickers.
#[tokio::test]
async fn test_categories_endpoint() {
    let client = TestClient::new();
    let (status, parsed): (_, Option<Vec<String>>) = client.get_json("/categories").await;
    assert_eq!(status, StatusCode::OK);
    let categories = parsed.unwrap();
    assert!(categories.contains(&"Food & Dining".to_string()));
    assert!(categories.contains(&"Other".to_string()));
}

/// A file-backed pool creates missing parent directories and migrations are
/// idempotent across restarts.
#[test]
fn test_pool_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested/data/fintrack.db");

    let pool = create_pool(&db_path).unwrap();
    {
        let conn = pool.get().unwrap();
        migrations::run_migrations(&conn, std::path::Path::new("migrations")).unwrap();
        // Re-running applies nothing and must not fail.
        migrations::run_migrations(&conn, std::path::Path::new("migrations")).unwrap();
    }

    assert!(db_path.exists());
}
