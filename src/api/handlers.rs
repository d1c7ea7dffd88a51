use axum::{
    Json,
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use crate::docs::{ApiResponse, DocArticleUpdate, NewDocArticle};

use super::ApiState;
use super::models::{CategoryQuery, DocsQuery, failure, respond, unauthorized};
use super::repository::ListFilter;

const FETCHED: &str = "Documentation fetched successfully";

/// Accepts any bearer token when none is configured; otherwise it must match.
fn authorize(state: &ApiState, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    match (token, state.admin_token.as_deref()) {
        (None, _) => Err(unauthorized()),
        (Some(_), None) => Ok(()),
        (Some(given), Some(expected)) if given == expected => Ok(()),
        (Some(_), Some(_)) => {
            debug!("Rejected admin request with wrong token");
            Err(unauthorized())
        }
    }
}

/// Guards the admin routes. Runs before any body is read, so an
/// unauthenticated request gets the 401 envelope whatever it carries.
pub async fn require_admin(State(state): State<ApiState>, req: Request, next: Next) -> Response {
    match authorize(&state, req.headers()) {
        Ok(()) => next.run(req).await,
        Err(rejection) => rejection,
    }
}

pub async fn list_docs(State(state): State<ApiState>, Query(query): Query<DocsQuery>) -> Response {
    let filter = ListFilter {
        category: query.category,
        published_only: query.published.as_deref() != Some("false"),
    };
    let docs = state.docs.list(&filter).await;
    respond(StatusCode::OK, ApiResponse::ok(FETCHED, docs))
}

pub async fn get_doc(State(state): State<ApiState>, Path(slug): Path<String>) -> Response {
    match state.docs.find_published(&slug).await {
        Some(doc) => respond(StatusCode::OK, ApiResponse::ok(FETCHED, doc)),
        None => failure(StatusCode::NOT_FOUND, "Documentation not found"),
    }
}

pub async fn admin_list_docs(
    State(state): State<ApiState>,
    Query(query): Query<CategoryQuery>,
) -> Response {
    let filter = ListFilter {
        category: query.category,
        published_only: false,
    };
    let docs = state.docs.list(&filter).await;
    respond(StatusCode::OK, ApiResponse::ok(FETCHED, docs))
}

pub async fn create_doc(
    State(state): State<ApiState>,
    Json(req): Json<NewDocArticle>,
) -> Response {
    match state.docs.create(req).await {
        Ok(doc) => {
            info!(id = %doc.id, slug = %doc.slug, "Documentation created");
            respond(
                StatusCode::CREATED,
                ApiResponse::ok("Documentation created successfully", doc),
            )
        }
        Err(e) => e.into_response(),
    }
}

pub async fn update_doc(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(req): Json<DocArticleUpdate>,
) -> Response {
    match state.docs.update(&id, req).await {
        Ok(doc) => respond(
            StatusCode::OK,
            ApiResponse::ok("Documentation updated successfully", doc),
        ),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_doc(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Response {
    match state.docs.delete(&id).await {
        Ok(()) => {
            info!(id = %id, "Documentation deleted");
            respond(
                StatusCode::OK,
                ApiResponse::done("Documentation deleted successfully"),
            )
        }
        Err(e) => e.into_response(),
    }
}
