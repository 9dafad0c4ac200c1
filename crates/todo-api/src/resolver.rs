use chrono::Utc;
use tracing::{debug, error, info, warn};

use todo_db::{StoreError, TodoStore};
use todo_types::{TodoPatch, TodoRecord};

use crate::error::ResolverError;
use crate::ids::IdGenerator;
use crate::model::{CreateTodoInput, Todo, UpdateTodoInput};

/// Translates API requests into store calls and store records into API output.
///
/// Each call is independent; the resolver keeps no state besides the store
/// and id source it was built with.
pub struct TodoResolver {
    store: Box<dyn TodoStore>,
    ids: Box<dyn IdGenerator>,
}

impl TodoResolver {
    pub fn new(store: impl TodoStore + 'static, ids: impl IdGenerator + 'static) -> Self {
        Self {
            store: Box::new(store),
            ids: Box::new(ids),
        }
    }

    pub fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, ResolverError> {
        if input.done == Some(true) {
            debug!("Ignoring done=true on create for owner {}", input.owner_id);
        }

        let id = self.ids.generate();
        let record = TodoRecord::new(id, input.text, input.owner_id, Utc::now());

        let inserted = self.store.insert(&record).map_err(|source| {
            error!("Insert of todo {} failed: {}", record.id, source);
            ResolverError::CreateFailed { source }
        })?;
        if !inserted {
            warn!("Insert of todo {} reported no rows", record.id);
            return Err(ResolverError::InsertFailed { id: record.id });
        }

        let created = self
            .store
            .fetch_by_id(&record.id)
            .map_err(|source| ResolverError::CreateFailed { source })?;

        info!("Created todo {} for owner {}", created.id, created.owner_id);
        Ok(created.into())
    }

    pub fn update_todo(&self, input: UpdateTodoInput) -> Result<Todo, ResolverError> {
        let patch = TodoPatch {
            id: input.id.0,
            text: input.text,
            done: input.done,
        };

        let updated = self.store.update(&patch).map_err(|source| {
            error!("Update of todo {} failed: {}", patch.id, source);
            ResolverError::UpdateFailed {
                id: patch.id.clone(),
                source: Some(source),
            }
        })?;
        if !updated {
            return Err(ResolverError::UpdateFailed {
                id: patch.id,
                source: None,
            });
        }

        let todo = self
            .store
            .fetch_by_id(&patch.id)
            .map_err(|source| ResolverError::UpdateFailed {
                id: patch.id.clone(),
                source: Some(source),
            })?;

        debug!("Updated todo {}", todo.id);
        Ok(todo.into())
    }

    pub fn todo(&self, id: &str) -> Result<Todo, ResolverError> {
        match self.store.fetch_by_id(id) {
            Ok(todo) => Ok(todo.into()),
            Err(StoreError::NotFound { id }) => Err(ResolverError::NotFound { id }),
            Err(source) => {
                error!("Fetch of todo {} failed: {}", id, source);
                Err(ResolverError::Fetch {
                    id: id.to_string(),
                    source,
                })
            }
        }
    }

    pub fn todos(&self, owner_id: &str) -> Result<Vec<Todo>, ResolverError> {
        let records = self.store.list_by_owner(owner_id).map_err(|source| {
            error!("Listing todos for {} failed: {}", owner_id, source);
            ResolverError::List {
                owner_id: owner_id.to_string(),
                source,
            }
        })?;

        Ok(records.into_iter().map(Todo::from).collect())
    }

    pub fn ping(&self) -> Result<(), StoreError> {
        self.store.ping()
    }

    pub fn close(&self) -> Result<(), StoreError> {
        self.store.close()
    }
}
