use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Trip;
use crate::store::TripStore;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, info, warn};

pub const ACTIVE_TRIP_KEY: &str = "active_trip_id";

/// Outcome of [`save_store`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub written: usize,
    /// Rows left alone because the database already held a newer version.
    pub stale: Vec<String>,
    pub deleted: usize,
}

/// Fixed-width UTC timestamps so that text comparison in SQL matches
/// chronological order.
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn map_trip(row: &Row) -> rusqlite::Result<Trip> {
    let id: String = row.get("id")?;
    let payload: String = row.get("payload")?;
    serde_json::from_str::<Trip>(&payload).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Corrupt payload for trip {id}: {e}"))),
        )
    })
}

pub fn load_trips(pool: &mut DbPool) -> AppResult<Vec<Trip>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT id, payload FROM trips ORDER BY position ASC, rowid ASC")?;

    let rows = stmt.query_map([], map_trip)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_setting(pool: &mut DbPool, key: &str) -> AppResult<Option<String>> {
    let value = pool
        .conn
        .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

pub fn save_setting(pool: &mut DbPool, key: &str, value: &str) -> AppResult<()> {
    pool.conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Load every trip and the active selection. An empty database is seeded
/// with one default trip, which is persisted right away.
pub fn load_store(pool: &mut DbPool) -> AppResult<TripStore> {
    let trips = load_trips(pool)?;
    let active = load_setting(pool, ACTIVE_TRIP_KEY)?;

    if let Some(store) = TripStore::from_parts(trips, active.as_deref()) {
        debug!(trips = store.trips().len(), active = store.active_trip_id(), "store loaded");
        return Ok(store);
    }

    info!("empty database, seeding default trip");
    let store = TripStore::default();
    save_store(pool, &store)?;
    Ok(store)
}

/// Persist the store in one transaction.
///
/// Conflict policy is last-write-wins on `updated_at`: a row is only
/// replaced by a trip that is not older than what is stored. Only trips
/// deleted through this store are removed; rows created elsewhere since the
/// load are left alone.
pub fn save_store(pool: &mut DbPool, store: &TripStore) -> AppResult<SaveReport> {
    let mut report = SaveReport::default();
    let tx = pool.conn.transaction()?;

    {
        let mut upsert = tx.prepare_cached(
            "INSERT INTO trips (id, name, payload, updated_at, position)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                payload = excluded.payload,
                updated_at = excluded.updated_at,
                position = excluded.position
             WHERE excluded.updated_at >= trips.updated_at",
        )?;

        for (position, trip) in store.trips().iter().enumerate() {
            let payload = serde_json::to_string(trip.as_ref())?;
            let changed = upsert.execute(params![
                trip.id,
                trip.name,
                payload,
                timestamp(&trip.updated_at),
                position as i64,
            ])?;
            if changed == 0 {
                warn!(trip_id = %trip.id, "stored trip is newer, keeping it");
                report.stale.push(trip.id.clone());
            } else {
                report.written += 1;
            }
        }

        // only trips deleted through this store
        let mut delete = tx.prepare_cached("DELETE FROM trips WHERE id = ?1")?;
        for id in store.deleted_trip_ids() {
            report.deleted += delete.execute([id])?;
        }
    }

    tx.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![ACTIVE_TRIP_KEY, store.active_trip_id()],
    )?;

    tx.commit()?;
    debug!(?report, "store saved");
    Ok(report)
}
