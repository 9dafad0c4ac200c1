//! Resolvers and GraphQL surface for the todo service.
//!
//! `resolver` is the synchronous translation layer between API-shaped
//! input/output and a [`todo_db::TodoStore`]. `schema` and `routes` bind it
//! to async-graphql and axum.

pub mod error;
pub mod ids;
pub mod model;
pub mod resolver;
pub mod routes;
pub mod schema;

pub use error::ResolverError;
pub use ids::{IdGenerator, UuidIdGenerator};
pub use model::{CreateTodoInput, Todo, UpdateTodoInput};
pub use resolver::TodoResolver;
pub use routes::AppState;
pub use schema::{TodoSchema, build_schema};
