use crate::ui::messages::success;
use rusqlite::{Connection, Result, params};
use tracing::info;

/// Ordered schema steps. `PRAGMA user_version` holds how many have run.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "20250301_0001_create_log",
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    ),
    (
        "20250301_0002_create_trips",
        r#"
        CREATE TABLE IF NOT EXISTS trips (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            payload     TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_trips_updated_at ON trips(updated_at);
        "#,
    ),
    (
        "20250301_0003_create_settings",
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        "#,
    ),
    (
        "20250412_0004_add_trip_position",
        "ALTER TABLE trips ADD COLUMN position INTEGER NOT NULL DEFAULT 0;",
    ),
];

/// Schema version this build writes.
pub const SCHEMA_VERSION: u32 = MIGRATIONS.len() as u32;

fn user_version(conn: &Connection) -> Result<u32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// Public entry point: run all pending migrations, each in its own
/// transaction, and mark them in the `log` table.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<u32> {
    let current = user_version(conn)?;
    let mut applied = 0;

    for (idx, (name, sql)) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = idx as u32 + 1;

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            params![name, format!("Schema upgraded to version {version}")],
        )?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;

        info!(migration = *name, version, "migration applied");
        applied += 1;
    }

    if applied > 0 && current > 0 {
        success(format!(
            "Database schema upgraded from version {current} to {SCHEMA_VERSION}"
        ));
    }

    Ok(applied)
}
