use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS todos (
            id              TEXT PRIMARY KEY,
            text            TEXT NOT NULL,
            done            INTEGER NOT NULL DEFAULT 0,
            owner_id        TEXT NOT NULL,
            created_at      TEXT NOT NULL,
            completed_at    TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_todos_owner
            ON todos(owner_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
