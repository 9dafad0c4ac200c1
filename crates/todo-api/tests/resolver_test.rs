//! Resolver behaviour against both store implementations.
//!
//! Every scenario runs once on the in-memory store and once on an in-memory
//! SQLite database, so the two backends stay interchangeable.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_graphql::ID;
use chrono::{NaiveDateTime, Timelike, Utc};

use todo_api::model::TIMESTAMP_FORMAT;
use todo_api::{CreateTodoInput, ResolverError, TodoResolver, UpdateTodoInput, UuidIdGenerator};
use todo_db::{Database, MemoryTodoStore, StoreError, StoreResult, TodoStore};
use todo_types::{TodoPatch, TodoRecord};

fn resolvers() -> Vec<(&'static str, TodoResolver)> {
    vec![
        ("memory", TodoResolver::new(MemoryTodoStore::new(), UuidIdGenerator)),
        (
            "sqlite",
            TodoResolver::new(Database::open_in_memory().unwrap(), UuidIdGenerator),
        ),
    ]
}

fn create(resolver: &TodoResolver, text: &str, owner_id: &str) -> todo_api::Todo {
    resolver
        .create_todo(CreateTodoInput {
            text: text.to_string(),
            owner_id: owner_id.to_string(),
            done: None,
        })
        .unwrap()
}

fn update(id: &ID, text: Option<&str>, done: Option<bool>) -> UpdateTodoInput {
    UpdateTodoInput {
        id: id.clone(),
        text: text.map(str::to_string),
        done,
    }
}

#[test]
fn create_starts_not_done() {
    for (backend, resolver) in resolvers() {
        let started = Utc::now().with_nanosecond(0).unwrap().naive_utc();
        let todo = create(&resolver, "Buy milk", "u1");

        assert!(!todo.id.is_empty(), "{backend}");
        assert_eq!(todo.text, "Buy milk", "{backend}");
        assert_eq!(todo.owner_id, "u1", "{backend}");
        assert!(!todo.done, "{backend}");
        assert_eq!(todo.completed_at, "", "{backend}");

        let created_at = NaiveDateTime::parse_from_str(&todo.created_at, TIMESTAMP_FORMAT).unwrap();
        assert!(created_at >= started, "{backend}: {created_at} < {started}");
    }
}

#[test]
fn create_ignores_done_flag() {
    for (backend, resolver) in resolvers() {
        let todo = resolver
            .create_todo(CreateTodoInput {
                text: "Pick up laundry".into(),
                owner_id: "u1".into(),
                done: Some(true),
            })
            .unwrap();
        assert!(!todo.done, "{backend}");
        assert_eq!(todo.completed_at, "", "{backend}");
    }
}

#[test]
fn create_assigns_unique_ids() {
    for (backend, resolver) in resolvers() {
        let a = create(&resolver, "Buy milk", "u1");
        let b = create(&resolver, "Buy milk", "u1");
        assert_ne!(a.id, b.id, "{backend}");
    }
}

#[test]
fn complete_keeps_text() {
    for (backend, resolver) in resolvers() {
        let todo = create(&resolver, "Buy milk", "u1");
        let done = resolver.update_todo(update(&todo.id, None, Some(true))).unwrap();

        assert_eq!(done.text, "Buy milk", "{backend}");
        assert!(done.done, "{backend}");
        assert!(!done.completed_at.is_empty(), "{backend}");
        assert_eq!(done.created_at, todo.created_at, "{backend}");
    }
}

#[test]
fn reopen_clears_completion() {
    for (backend, resolver) in resolvers() {
        let todo = create(&resolver, "Buy milk", "u1");
        resolver.update_todo(update(&todo.id, None, Some(true))).unwrap();

        let reopened = resolver.update_todo(update(&todo.id, None, Some(false))).unwrap();
        assert!(!reopened.done, "{backend}");
        assert_eq!(reopened.completed_at, "", "{backend}");
    }
}

#[test]
fn repeated_reopen_is_stable() {
    for (backend, resolver) in resolvers() {
        let todo = create(&resolver, "Buy milk", "u1");
        let first = resolver
            .update_todo(update(&todo.id, Some("Buy oat milk"), Some(false)))
            .unwrap();
        let second = resolver
            .update_todo(update(&todo.id, Some("Buy oat milk"), Some(false)))
            .unwrap();
        assert_eq!(first, second, "{backend}");
    }
}

#[test]
fn text_only_update_leaves_done() {
    for (backend, resolver) in resolvers() {
        let todo = create(&resolver, "Buy milk", "u1");
        let done = resolver.update_todo(update(&todo.id, None, Some(true))).unwrap();

        let renamed = resolver
            .update_todo(update(&todo.id, Some("Buy bread"), None))
            .unwrap();
        assert_eq!(renamed.text, "Buy bread", "{backend}");
        assert!(renamed.done, "{backend}");
        assert_eq!(renamed.completed_at, done.completed_at, "{backend}");
    }
}

#[test]
fn update_unknown_id_fails() {
    for (backend, resolver) in resolvers() {
        let err = resolver
            .update_todo(update(&ID("missing".to_string()), None, Some(true)))
            .unwrap_err();
        assert!(
            matches!(err, ResolverError::UpdateFailed { source: None, .. }),
            "{backend}: {err:?}"
        );
        assert_eq!(err.code(), "UPDATE_FAILED");
    }
}

#[test]
fn fetch_unknown_id_is_not_found() {
    for (backend, resolver) in resolvers() {
        let err = resolver.todo("missing").unwrap_err();
        assert!(matches!(err, ResolverError::NotFound { .. }), "{backend}: {err:?}");
        assert_eq!(err.code(), "NOT_FOUND");
    }
}

#[test]
fn fetch_returns_created_todo() {
    for (backend, resolver) in resolvers() {
        let todo = create(&resolver, "Water roses and lilies", "u1");
        assert_eq!(resolver.todo(&todo.id).unwrap(), todo, "{backend}");
    }
}

#[test]
fn list_by_owner_returns_only_owner_todos() {
    for (backend, resolver) in resolvers() {
        let a = create(&resolver, "Buy milk", "u1");
        let b = create(&resolver, "Pick up laundry", "u1");
        create(&resolver, "Water roses", "u2");

        let mut ids: Vec<String> = resolver
            .todos("u1")
            .unwrap()
            .into_iter()
            .map(|t| t.id.0)
            .collect();
        ids.sort();
        let mut expected = vec![a.id.0, b.id.0];
        expected.sort();
        assert_eq!(ids, expected, "{backend}");
    }
}

#[test]
fn list_for_unknown_owner_is_empty() {
    for (backend, resolver) in resolvers() {
        assert!(resolver.todos("nobody").unwrap().is_empty(), "{backend}");
    }
}

#[test]
fn injected_id_generator_is_used() {
    let counter = AtomicUsize::new(0);
    let resolver = TodoResolver::new(MemoryTodoStore::new(), move || {
        format!("todo-{}", counter.fetch_add(1, Ordering::Relaxed))
    });

    assert_eq!(create(&resolver, "first", "u1").id.as_str(), "todo-0");
    assert_eq!(create(&resolver, "second", "u1").id.as_str(), "todo-1");
}

#[test]
fn colliding_id_is_create_failure() {
    let resolver = TodoResolver::new(MemoryTodoStore::new(), || "same".to_string());
    create(&resolver, "first", "u1");

    let err = resolver
        .create_todo(CreateTodoInput {
            text: "second".into(),
            owner_id: "u1".into(),
            done: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ResolverError::CreateFailed {
            source: StoreError::Conflict { .. }
        }
    ));
    assert_eq!(err.code(), "INTERNAL");
}

/// Accepts every write but never reports an affected row.
struct NoRowsStore;

impl TodoStore for NoRowsStore {
    fn fetch_by_id(&self, id: &str) -> StoreResult<TodoRecord> {
        Err(StoreError::NotFound { id: id.to_string() })
    }

    fn list_by_owner(&self, _owner_id: &str) -> StoreResult<Vec<TodoRecord>> {
        Ok(vec![])
    }

    fn insert(&self, _todo: &TodoRecord) -> StoreResult<bool> {
        Ok(false)
    }

    fn update(&self, _patch: &TodoPatch) -> StoreResult<bool> {
        Ok(false)
    }

    fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[test]
fn zero_row_insert_is_insert_failed() {
    let resolver = TodoResolver::new(NoRowsStore, UuidIdGenerator);
    let err = resolver
        .create_todo(CreateTodoInput {
            text: "Buy milk".into(),
            owner_id: "u1".into(),
            done: None,
        })
        .unwrap_err();
    assert!(matches!(err, ResolverError::InsertFailed { .. }));
    assert_eq!(err.code(), "INSERT_FAILED");
}

#[test]
fn closed_store_surfaces_errors() {
    for (backend, resolver) in resolvers() {
        resolver.close().unwrap();

        let err = resolver.todos("u1").unwrap_err();
        assert!(
            matches!(err, ResolverError::List { source: StoreError::Closed, .. }),
            "{backend}: {err:?}"
        );
        assert!(resolver.todo("t1").is_err(), "{backend}");
    }
}
