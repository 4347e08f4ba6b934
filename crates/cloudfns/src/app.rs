use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        connectivity::connectivity_check,
        health::livez,
        items::{items_collection, items_member},
        rls::rls_demo,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for the items endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let item_routes = Router::new()
        .route("/items", any(items_collection))
        .route("/items/{id}", any(items_member))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .route("/connectivity", get(connectivity_check))
        .route("/rls-demo", get(rls_demo))
        .merge(item_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
