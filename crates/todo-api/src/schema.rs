use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, ID, Object, Result, Schema};
use tracing::error;

use crate::error::ResolverError;
use crate::model::{CreateTodoInput, Todo, UpdateTodoInput};
use crate::resolver::TodoResolver;

pub type TodoSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(resolver: Arc<TodoResolver>) -> TodoSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(resolver)
        .finish()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Fetch a single todo by id.
    async fn todo(&self, ctx: &Context<'_>, id: ID) -> Result<Todo> {
        run_blocking(ctx, move |resolver| resolver.todo(&id)).await
    }

    /// All todos belonging to one owner, in no particular order.
    async fn todos(&self, ctx: &Context<'_>, owner_id: String) -> Result<Vec<Todo>> {
        run_blocking(ctx, move |resolver| resolver.todos(&owner_id)).await
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_todo(&self, ctx: &Context<'_>, input: CreateTodoInput) -> Result<Todo> {
        run_blocking(ctx, move |resolver| resolver.create_todo(input)).await
    }

    async fn update_todo(&self, ctx: &Context<'_>, input: UpdateTodoInput) -> Result<Todo> {
        run_blocking(ctx, move |resolver| resolver.update_todo(input)).await
    }
}

/// Store calls block, so run them off the async runtime.
async fn run_blocking<T, F>(ctx: &Context<'_>, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&TodoResolver) -> std::result::Result<T, ResolverError> + Send + 'static,
{
    let resolver = Arc::clone(ctx.data::<Arc<TodoResolver>>()?);

    tokio::task::spawn_blocking(move || f(&resolver))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ResolverError::Join(e.to_string())
        })
        .and_then(|result| result)
        .map_err(|e| e.extend())
}
