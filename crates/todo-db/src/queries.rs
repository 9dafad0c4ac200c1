use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, warn};

use todo_types::{TodoPatch, TodoRecord};

use crate::Database;
use crate::error::{StoreError, StoreResult};
use crate::store::TodoStore;

const TODO_SELECT_SQL: &str =
    "SELECT id, text, done, owner_id, created_at, completed_at FROM todos";

impl TodoStore for Database {
    fn fetch_by_id(&self, id: &str) -> StoreResult<TodoRecord> {
        self.with_conn(|conn| {
            conn.query_row(&format!("{TODO_SELECT_SQL} WHERE id = ?1"), [id], map_todo_row)
                .optional()
                .map_err(StoreError::sqlite("fetch_by_id", id))?
                .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
        })
    }

    fn list_by_owner(&self, owner_id: &str) -> StoreResult<Vec<TodoRecord>> {
        self.with_conn(|conn| {
            query_todos_by_owner(conn, owner_id)
                .map_err(StoreError::sqlite("list_by_owner", owner_id))
        })
    }

    fn insert(&self, todo: &TodoRecord) -> StoreResult<bool> {
        self.with_conn(|conn| {
            let inserted = conn
                .execute(
                    "INSERT INTO todos (id, text, done, owner_id, created_at, completed_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        todo.id,
                        todo.text,
                        todo.done,
                        todo.owner_id,
                        todo.created_at,
                        todo.completed_at,
                    ],
                )
                .map_err(|e| map_insert_error(&todo.id, e))?;

            if inserted != 1 {
                warn!("Insert of todo {} wrote {} rows", todo.id, inserted);
            }
            Ok(inserted == 1)
        })
    }

    fn update(&self, patch: &TodoPatch) -> StoreResult<bool> {
        let statement = UpdateStatement::for_patch(patch);
        debug!("Updating todo {} with {:?}", patch.id, statement);

        self.with_conn(|conn| {
            let updated = statement
                .execute(conn, &patch.id, Utc::now())
                .map_err(StoreError::sqlite("update", &patch.id))?;

            if updated != 1 {
                warn!("Update of todo {} wrote {} rows", patch.id, updated);
            }
            Ok(updated == 1)
        })
    }

    fn close(&self) -> StoreResult<()> {
        self.shutdown()
    }

    fn ping(&self) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map_err(StoreError::sqlite("ping", ""))?;
            Ok(())
        })
    }
}

/// The write chosen for a patch. `completed_at` always follows `done`:
/// stamped with the current time when it becomes true, cleared when false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatement<'a> {
    TextAndComplete(&'a str),
    TextAndReopen(&'a str),
    Complete,
    Reopen,
    /// `done` absent: only the text changes, completion is left alone.
    TextOnly(&'a str),
    /// Nothing to change; still reports whether the row exists.
    Touch,
}

impl<'a> UpdateStatement<'a> {
    pub fn for_patch(patch: &'a TodoPatch) -> Self {
        match (patch.text.as_deref(), patch.done) {
            (Some(text), Some(true)) => Self::TextAndComplete(text),
            (Some(text), Some(false)) => Self::TextAndReopen(text),
            (None, Some(true)) => Self::Complete,
            (None, Some(false)) => Self::Reopen,
            (Some(text), None) => Self::TextOnly(text),
            (None, None) => Self::Touch,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Self::TextAndComplete(_) => {
                "UPDATE todos SET text = ?1, done = 1, completed_at = ?2 WHERE id = ?3"
            }
            Self::TextAndReopen(_) => {
                "UPDATE todos SET text = ?1, done = 0, completed_at = NULL WHERE id = ?2"
            }
            Self::Complete => "UPDATE todos SET done = 1, completed_at = ?1 WHERE id = ?2",
            Self::Reopen => "UPDATE todos SET done = 0, completed_at = NULL WHERE id = ?1",
            Self::TextOnly(_) => "UPDATE todos SET text = ?1 WHERE id = ?2",
            Self::Touch => "UPDATE todos SET id = id WHERE id = ?1",
        }
    }

    fn execute(&self, conn: &Connection, id: &str, now: DateTime<Utc>) -> rusqlite::Result<usize> {
        let sql = self.sql();
        match *self {
            Self::TextAndComplete(text) => conn.execute(sql, params![text, now, id]),
            Self::TextAndReopen(text) => conn.execute(sql, params![text, id]),
            Self::Complete => conn.execute(sql, params![now, id]),
            Self::Reopen => conn.execute(sql, params![id]),
            Self::TextOnly(text) => conn.execute(sql, params![text, id]),
            Self::Touch => conn.execute(sql, params![id]),
        }
    }

    /// Same transition applied to a record held in memory.
    pub fn apply(&self, todo: &mut TodoRecord, now: DateTime<Utc>) {
        match *self {
            Self::TextAndComplete(text) => {
                todo.text = text.to_string();
                complete(todo, now);
            }
            Self::TextAndReopen(text) => {
                todo.text = text.to_string();
                reopen(todo);
            }
            Self::Complete => complete(todo, now),
            Self::Reopen => reopen(todo),
            Self::TextOnly(text) => todo.text = text.to_string(),
            Self::Touch => {}
        }
    }
}

fn complete(todo: &mut TodoRecord, now: DateTime<Utc>) {
    todo.done = true;
    todo.completed_at = Some(now);
}

fn reopen(todo: &mut TodoRecord) {
    todo.done = false;
    todo.completed_at = None;
}

fn query_todos_by_owner(conn: &Connection, owner_id: &str) -> rusqlite::Result<Vec<TodoRecord>> {
    let mut stmt = conn.prepare(&format!("{TODO_SELECT_SQL} WHERE owner_id = ?1"))?;

    let rows = stmt
        .query_map([owner_id], map_todo_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Column order is fixed by `TODO_SELECT_SQL`.
fn map_todo_row(row: &Row<'_>) -> rusqlite::Result<TodoRecord> {
    Ok(TodoRecord {
        id: row.get(0)?,
        text: row.get(1)?,
        done: row.get(2)?,
        owner_id: row.get(3)?,
        created_at: row.get(4)?,
        completed_at: row.get(5)?,
    })
}

fn map_insert_error(id: &str, err: rusqlite::Error) -> StoreError {
    if err.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) {
        StoreError::Conflict { id: id.to_string() }
    } else {
        StoreError::sqlite("insert", id)(err)
    }
}
