use async_graphql::ErrorExtensions;
use todo_db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("todo not found: {id}")]
    NotFound { id: String },

    /// The insert ran cleanly but reported no written row.
    #[error("todo {id} was not inserted")]
    InsertFailed { id: String },

    #[error("failed to create todo: {source}")]
    CreateFailed {
        #[source]
        source: StoreError,
    },

    /// `source` is `None` when the update matched no row.
    #[error(
        "failed to update todo {id}{}",
        .source.as_ref().map(|e| format!(": {e}")).unwrap_or_default()
    )]
    UpdateFailed {
        id: String,
        #[source]
        source: Option<StoreError>,
    },

    #[error("failed to retrieve todo {id}: {source}")]
    Fetch {
        id: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to retrieve todos for {owner_id}: {source}")]
    List {
        owner_id: String,
        #[source]
        source: StoreError,
    },

    #[error("resolver task failed: {0}")]
    Join(String),
}

impl ResolverError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InsertFailed { .. } => "INSERT_FAILED",
            Self::UpdateFailed { source: None, .. } => "UPDATE_FAILED",
            Self::UpdateFailed { source: Some(e), .. } if e.is_not_found() => "NOT_FOUND",
            _ => "INTERNAL",
        }
    }
}

impl ErrorExtensions for ResolverError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}
