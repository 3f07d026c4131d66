//! SQLite database setup and connection management for ProStock
//! Handles opening the store, schema creation and explicit shutdown.

use super::repository::{DbConn, InventoryRepository};
use crate::domain::PersistenceError;
use crate::infra::app_config;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

type Result<T> = std::result::Result<T, PersistenceError>;

const SCHEMA_VERSION: i32 = 1;

/// Database wrapper that owns the process-wide SQLite connection
pub struct Database {
    conn: DbConn,
}

impl Database {
    /// Create or open the database at the default location
    pub fn open() -> Result<Self> {
        let path = Self::default_path();
        Self::open_at(path)
    }

    /// Create an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Create or open the database at a specific path
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(&path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize()?;
        log::info!("Opened inventory database at {}", path.display());
        Ok(db)
    }

    /// Get the default database path
    fn default_path() -> PathBuf {
        app_config::resolve_database_path(None, &app_config::load_config())
    }

    /// Ensure the inventory table exists. Safe to call on every startup.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| PersistenceError::LockPoisoned)?;

        let existing_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if existing_version > SCHEMA_VERSION {
            return Err(PersistenceError::UnsupportedSchema {
                found: existing_version,
                supported: SCHEMA_VERSION,
            });
        }

        Self::create_schema(&conn)?;
        if existing_version < SCHEMA_VERSION {
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            log::debug!("Inventory schema set to version {}", SCHEMA_VERSION);
        }

        Ok(())
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> DbConn {
        self.conn.clone()
    }

    pub fn inventory_repo(&self) -> InventoryRepository {
        InventoryRepository::new(self.connection())
    }

    /// Release the connection. Fails if a repository still holds a handle to it.
    pub fn close(self) -> Result<()> {
        let others = Arc::strong_count(&self.conn) - 1;
        let mutex = Arc::try_unwrap(self.conn).map_err(|_| PersistenceError::InUse(others))?;
        let conn = mutex
            .into_inner()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        conn.close().map_err(|(_, err)| PersistenceError::Close(err))?;
        log::debug!("Closed inventory database");
        Ok(())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS inventory (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                product TEXT NOT NULL,
                unit TEXT NOT NULL CHECK (unit IN ('unit','kilogram','liter','pack','box')),
                inbound_quantity INTEGER NOT NULL CHECK (inbound_quantity >= 0),
                inbound_date TEXT NOT NULL,
                outbound_quantity INTEGER NOT NULL CHECK (outbound_quantity >= 0),
                outbound_date TEXT NOT NULL,
                remaining INTEGER NOT NULL,
                note TEXT NOT NULL DEFAULT ''
            );

            CREATE INDEX IF NOT EXISTS idx_inventory_product ON inventory(product);
            "#,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_default_path() {
        let path = Database::default_path();
        assert!(path.file_name().is_some());
    }

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let guard = conn.lock().unwrap();
        let version: i32 = guard
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
        let tables: i32 = guard
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='inventory'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db.initialize().unwrap();
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("prostock.db");

        let db = Database::open_at(path.clone()).unwrap();
        {
            let conn = db.connection();
            let guard = conn.lock().unwrap();
            guard
                .execute(
                    "INSERT INTO inventory (product, unit, inbound_quantity, inbound_date, outbound_quantity, outbound_date, remaining, note)
                     VALUES ('Rice', 'kilogram', 5, '2024-01-01', 1, '2024-01-02', 4, '')",
                    [],
                )
                .unwrap();
        }
        db.close().unwrap();

        let db = Database::open_at(path).unwrap();
        let conn = db.connection();
        let guard = conn.lock().unwrap();
        let count: i64 = guard
            .query_row("SELECT COUNT(*) FROM inventory", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1)
            .unwrap();
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };

        let err = db.initialize().unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::UnsupportedSchema { found: 2, supported: 1 }
        ));
    }

    #[test]
    fn test_close_refuses_while_repository_alive() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.inventory_repo();

        let err = db.close().unwrap_err();
        assert!(matches!(err, PersistenceError::InUse(1)));
        drop(repo);
    }

    #[test]
    fn test_parent_that_is_a_file_is_an_io_error() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let blocked = tmp.path().to_path_buf();

        let err = Database::open_at(blocked.join("prostock.db")).err().unwrap();
        match err {
            PersistenceError::Io { path, .. } => assert_eq!(path, blocked),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn test_open_uses_configured_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env").join("prostock.db");
        unsafe {
            std::env::set_var("PROSTOCK_DB_PATH", &path);
        }

        let opened = Database::open();

        unsafe {
            std::env::remove_var("PROSTOCK_DB_PATH");
        }
        opened.unwrap().close().unwrap();
        assert!(path.exists());
    }
}
