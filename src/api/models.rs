use axum::{
    Json,
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::docs::ApiResponse;

use super::repository::RepositoryError;

#[derive(Debug, Default, Deserialize)]
pub struct DocsQuery {
    pub category: Option<String>,
    /// Public listings show drafts only when this is `"false"`.
    pub published: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Renders `body` with `status` as JSON.
pub fn respond<T: Serialize>(status: StatusCode, body: ApiResponse<T>) -> Response<Body> {
    (status, Json(body)).into_response()
}

pub fn failure(status: StatusCode, message: impl Into<String>) -> Response<Body> {
    respond::<()>(status, ApiResponse::failure(message))
}

pub fn unauthorized() -> Response<Body> {
    failure(StatusCode::UNAUTHORIZED, "Unauthorized")
}

impl IntoResponse for RepositoryError {
    fn into_response(self) -> Response {
        let status = match self {
            RepositoryError::NotFound => StatusCode::NOT_FOUND,
            RepositoryError::DuplicateSlug | RepositoryError::MissingFields => {
                StatusCode::BAD_REQUEST
            }
        };
        failure(status, self.to_string())
    }
}
