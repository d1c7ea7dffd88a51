use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::ApiState;
use super::handlers;

async fn health_check() -> &'static str {
    "ok"
}

pub fn create_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route("/all", get(handlers::admin_list_docs))
        .route("/create", post(handlers::create_doc))
        .route("/{id}", put(handlers::update_doc).delete(handlers::delete_doc))
        .route_layer(from_fn_with_state(state.clone(), handlers::require_admin));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/docs", get(handlers::list_docs))
        .nest("/api/docs/admin", admin)
        .route("/api/docs/{slug}", get(handlers::get_doc))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
