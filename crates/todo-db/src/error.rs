pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by a [`TodoStore`](crate::TodoStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("todo not found: {id}")]
    NotFound { id: String },

    #[error("todo already exists: {id}")]
    Conflict { id: String },

    /// Driver failure, tagged with the store operation and its key argument.
    #[error("{op} {key:?}: {source}")]
    Sqlite {
        op: &'static str,
        key: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("store is closed")]
    Closed,

    #[error("store lock poisoned: {0}")]
    Poisoned(String),
}

impl StoreError {
    /// Adapter for `map_err` that attaches operation context to a driver error.
    pub fn sqlite(op: &'static str, key: &str) -> impl FnOnce(rusqlite::Error) -> Self {
        let key = key.to_string();
        move |source| Self::Sqlite { op, key, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
