pub mod error;
pub mod memory;
pub mod migrations;
pub mod queries;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryTodoStore;
pub use store::TodoStore;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// SQLite-backed todo store. One connection, shared by every request.
pub struct Database {
    conn: Mutex<Option<Connection>>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self::from_connection(conn))
    }

    /// Private database that disappears with the handle.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;

        info!("In-memory database opened");
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(Some(conn)),
        }
    }

    pub fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        f(conn)
    }

    /// Releases the connection. Calling it again is a no-op.
    pub fn shutdown(&self) -> StoreResult<()> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        match guard.take() {
            Some(conn) => {
                conn.close()
                    .map_err(|(_, e)| StoreError::sqlite("close", "")(e))?;
                info!("Database closed");
                Ok(())
            }
            None => Ok(()),
        }
    }
}
