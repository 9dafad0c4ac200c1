pub mod models;

pub use models::{TodoPatch, TodoRecord};
