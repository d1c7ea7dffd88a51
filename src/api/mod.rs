//! Local stand-in for the documentation API, backed by memory.

pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;

use std::sync::Arc;

pub use repository::{DocsRepository, ListFilter, RepositoryError};
pub use routes::create_router;

#[derive(Debug, Clone, Default)]
pub struct ApiState {
    pub docs: DocsRepository,
    /// Token admin routes require. `None` accepts any bearer token.
    pub admin_token: Option<Arc<str>>,
}

impl ApiState {
    pub fn new(docs: DocsRepository, admin_token: Option<String>) -> Self {
        Self {
            docs,
            admin_token: admin_token.map(Arc::from),
        }
    }
}
