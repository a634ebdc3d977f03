use rusqlite::Connection;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Apply any pending `.sql` files from `migrations_dir` in filename order.
/// Applied migrations are recorded by name in `_migrations` and skipped on
/// subsequent runs.
pub fn run_migrations(conn: &Connection, migrations_dir: &Path) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let applied: HashSet<String> = conn
        .prepare("SELECT name FROM _migrations")?
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<_>>()?;

    let mut files: Vec<_> = fs::read_dir(migrations_dir)
        .map(|rd| {
            rd.filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().map(|ext| ext == "sql").unwrap_or(false))
                .collect()
        })
        .unwrap_or_default();
    files.sort();

    tracing::debug!(
        dir = %migrations_dir.display(),
        count = files.len(),
        "Found migration files"
    );

    let mut pending = 0;
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if applied.contains(&name) {
            continue;
        }

        let sql = fs::read_to_string(&path)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        tracing::info!(migration = %name, "Applying migration");
        conn.execute_batch(&sql)?;
        conn.execute("INSERT INTO _migrations (name) VALUES (?)", [&name])?;
        pending += 1;
    }

    if pending > 0 {
        tracing::info!(count = pending, "Migrations applied");
    } else {
        tracing::debug!("Database schema is up to date");
    }

    Ok(())
}
