//! SQLite schema and connection setup.

use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection, OpenFlags};

use crate::error::StoreResult;

pub(crate) const SCHEMA_VERSION: u32 = 1;
const BUSY_TIMEOUT_MS: u64 = 5_000;

pub(crate) fn open_connection(path: &Path) -> StoreResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
    let conn = Connection::open_with_flags(path, flags)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

pub(crate) fn apply_pragmas(conn: &Connection) -> StoreResult<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
    Ok(())
}

pub(crate) fn initialize_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS meta (
           key TEXT PRIMARY KEY,
           value TEXT NOT NULL
         );
         CREATE TABLE IF NOT EXISTS groups (
           id TEXT PRIMARY KEY,
           name TEXT NOT NULL,
           gifts_per_participant INTEGER NOT NULL DEFAULT 1,
           max_participants INTEGER NOT NULL DEFAULT 50,
           created_at TEXT NOT NULL
         );
         CREATE INDEX IF NOT EXISTS groups_by_name ON groups (name);
         CREATE TABLE IF NOT EXISTS participants (
           id TEXT PRIMARY KEY,
           group_id TEXT NOT NULL REFERENCES groups (id) ON DELETE CASCADE,
           name TEXT NOT NULL,
           email TEXT,
           joined_at TEXT NOT NULL,
           UNIQUE (group_id, id)
         );
         CREATE INDEX IF NOT EXISTS participants_by_group ON participants (group_id);
         CREATE TABLE IF NOT EXISTS assignments (
           id TEXT PRIMARY KEY,
           group_id TEXT NOT NULL REFERENCES groups (id) ON DELETE CASCADE,
           giver_id TEXT NOT NULL,
           receiver_id TEXT NOT NULL,
           gift_number INTEGER NOT NULL,
           created_at TEXT NOT NULL,
           FOREIGN KEY (group_id, giver_id)
             REFERENCES participants (group_id, id) ON DELETE CASCADE,
           FOREIGN KEY (group_id, receiver_id)
             REFERENCES participants (group_id, id) ON DELETE CASCADE,
           CHECK (giver_id <> receiver_id),
           UNIQUE (group_id, giver_id, gift_number),
           UNIQUE (group_id, giver_id, receiver_id)
         );
         CREATE INDEX IF NOT EXISTS assignments_by_group ON assignments (group_id);",
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO meta (key, value) VALUES ('schema_version', ?1)",
        params![SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}
