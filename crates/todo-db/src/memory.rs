use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use todo_types::{TodoPatch, TodoRecord};

use crate::error::{StoreError, StoreResult};
use crate::queries::UpdateStatement;
use crate::store::TodoStore;

/// Map-backed store with the same semantics as [`Database`](crate::Database).
/// Nothing survives the process.
pub struct MemoryTodoStore {
    todos: RwLock<Option<HashMap<String, TodoRecord>>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self {
            todos: RwLock::new(Some(HashMap::new())),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Option<HashMap<String, TodoRecord>>>> {
        self.todos
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Option<HashMap<String, TodoRecord>>>> {
        self.todos
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore for MemoryTodoStore {
    fn fetch_by_id(&self, id: &str) -> StoreResult<TodoRecord> {
        let guard = self.read()?;
        let todos = guard.as_ref().ok_or(StoreError::Closed)?;
        todos
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn list_by_owner(&self, owner_id: &str) -> StoreResult<Vec<TodoRecord>> {
        let guard = self.read()?;
        let todos = guard.as_ref().ok_or(StoreError::Closed)?;
        Ok(todos
            .values()
            .filter(|todo| todo.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn insert(&self, todo: &TodoRecord) -> StoreResult<bool> {
        let mut guard = self.write()?;
        let todos = guard.as_mut().ok_or(StoreError::Closed)?;
        if todos.contains_key(&todo.id) {
            return Err(StoreError::Conflict {
                id: todo.id.clone(),
            });
        }
        todos.insert(todo.id.clone(), todo.clone());
        Ok(true)
    }

    fn update(&self, patch: &TodoPatch) -> StoreResult<bool> {
        let statement = UpdateStatement::for_patch(patch);
        debug!("Updating in-memory todo {} with {:?}", patch.id, statement);

        let mut guard = self.write()?;
        let todos = guard.as_mut().ok_or(StoreError::Closed)?;
        match todos.get_mut(&patch.id) {
            Some(todo) => {
                statement.apply(todo, Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn close(&self) -> StoreResult<()> {
        self.write()?.take();
        Ok(())
    }

    fn ping(&self) -> StoreResult<()> {
        self.read()?.as_ref().map(|_| ()).ok_or(StoreError::Closed)
    }
}
