use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use tracing::{error, warn};

use crate::resolver::TodoResolver;
use crate::schema::{TodoSchema, build_schema};

pub const GRAPHQL_PATH: &str = "/query";

#[derive(Clone)]
pub struct AppState {
    pub schema: TodoSchema,
    pub resolver: Arc<TodoResolver>,
}

impl AppState {
    pub fn new(resolver: TodoResolver) -> Self {
        let resolver = Arc::new(resolver);
        Self {
            schema: build_schema(resolver.clone()),
            resolver,
        }
    }
}

pub async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

pub async fn playground() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

pub async fn health(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    let resolver = state.resolver.clone();
    tokio::task::spawn_blocking(move || resolver.ping())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            warn!("Health check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok("ok")
}
