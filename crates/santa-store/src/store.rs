use std::fs;

use parking_lot::Mutex;
use rusqlite::Connection;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::debug;

use santa_core::config::{validate_config, CoreConfig};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::schema;

/// SQLite-backed store for groups, participants and assignment triples.
///
/// A single connection is shared behind a mutex; every multi-statement write
/// runs inside one IMMEDIATE transaction so readers never see a partial
/// assignment set.
pub struct Store {
    conn: Mutex<Connection>,
    core: CoreConfig,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("core", &self.core).finish()
    }
}

impl Store {
    pub fn open(cfg: StoreConfig) -> StoreResult<Self> {
        validate_config(&cfg.core)?;
        fs::create_dir_all(&cfg.root).map_err(|source| StoreError::Io {
            path: cfg.root.clone(),
            source,
        })?;

        let path = cfg.db_path();
        debug!(path = %path.display(), "opening store");
        let conn = schema::open_connection(&path)?;
        schema::initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            core: cfg.core,
        })
    }

    /// Throwaway store, mostly for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::apply_pragmas(&conn)?;
        schema::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            core: CoreConfig::default(),
        })
    }

    pub fn core_config(&self) -> &CoreConfig {
        &self.core
    }

    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut conn = self.conn.lock();
        f(&mut conn)
    }
}

pub(crate) fn now_rfc3339() -> StoreResult<String> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn open_creates_root_and_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join(".santa");
        let cfg = StoreConfig::local(&root).unwrap();
        let db = cfg.db_path();

        let _store = Store::open(cfg).unwrap();
        assert!(db.exists());
    }

    #[test]
    fn reopen_keeps_schema() {
        let temp = TempDir::new().unwrap();
        let cfg = StoreConfig::local(temp.path()).unwrap();
        drop(Store::open(cfg.clone()).unwrap());
        Store::open(cfg).unwrap();
    }

    #[test]
    fn invalid_core_config_rejected() {
        let temp = TempDir::new().unwrap();
        let mut cfg = StoreConfig::local(temp.path()).unwrap();
        cfg.core.limits.min_participants = 1;
        assert!(matches!(Store::open(cfg), Err(StoreError::Core(_))));
    }
}
