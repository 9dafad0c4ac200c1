use async_graphql::{ID, InputObject, SimpleObject};
use chrono::{DateTime, Utc};

use todo_types::TodoRecord;

/// Wire format for `createdAt` / `completedAt`, always UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Todo {
    pub id: ID,
    pub text: String,
    pub done: bool,
    pub owner_id: String,
    pub created_at: String,
    /// Empty string while the todo is not completed.
    pub completed_at: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateTodoInput {
    pub text: String,
    pub owner_id: String,
    /// Accepted for compatibility; new todos always start not done.
    pub done: Option<bool>,
}

#[derive(Debug, Clone, InputObject)]
pub struct UpdateTodoInput {
    pub id: ID,
    pub text: Option<String>,
    pub done: Option<bool>,
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        Self {
            id: ID(record.id),
            text: record.text,
            done: record.done,
            owner_id: record.owner_id,
            created_at: format_timestamp(&record.created_at),
            completed_at: record
                .completed_at
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_default(),
        }
    }
}

pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
