//! Repository implementations for data access in ProStock.
//!
//! Provides the database operations over the inventory table.

mod inventory;

pub use inventory::InventoryRepository;

use crate::domain::PersistenceError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to the single SQLite connection opened by [`super::Database`].
pub type DbConn = Arc<Mutex<Connection>>;

fn lock(conn: &DbConn) -> Result<MutexGuard<'_, Connection>, PersistenceError> {
    conn.lock().map_err(|_| PersistenceError::LockPoisoned)
}
