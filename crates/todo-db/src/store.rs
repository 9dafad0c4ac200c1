use todo_types::{TodoPatch, TodoRecord};

use crate::error::StoreResult;

/// Persistence seam between the resolvers and a concrete backend.
///
/// Implementations are shared across concurrent requests, so they must not
/// keep per-call mutable state beyond their connection handle.
pub trait TodoStore: Send + Sync {
    /// Fails with `StoreError::NotFound` when no todo has this id.
    fn fetch_by_id(&self, id: &str) -> StoreResult<TodoRecord>;

    /// Empty when the owner has no todos. Order is unspecified.
    fn list_by_owner(&self, owner_id: &str) -> StoreResult<Vec<TodoRecord>>;

    /// `Ok(true)` when exactly one row was written.
    fn insert(&self, todo: &TodoRecord) -> StoreResult<bool>;

    /// Applies the patch and derives `completed_at` from `done`.
    /// `Ok(false)` when no row matched the id.
    fn update(&self, patch: &TodoPatch) -> StoreResult<bool>;

    fn close(&self) -> StoreResult<()>;

    fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
