use chrono::{DateTime, Utc};

/// A todo item as the storage layer sees it.
///
/// `completed_at` is `Some` exactly when the last write that touched `done`
/// set it to `true`. It is never taken from callers; stores derive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRecord {
    pub id: String,
    pub text: String,
    pub done: bool,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TodoRecord {
    /// Fresh, not-yet-completed record stamped with `created_at`.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        owner_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            done: false,
            owner_id: owner_id.into(),
            created_at,
            completed_at: None,
        }
    }
}

/// Partial update of a single todo. `None` leaves the field as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub id: String,
    pub text: Option<String>,
    pub done: Option<bool>,
}

impl TodoPatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }
}
