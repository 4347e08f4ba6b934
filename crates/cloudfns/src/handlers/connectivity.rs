//! Connectivity check handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// Body returned when the check gets any HTTP response.
pub const SUCCESS_MESSAGE: &str = "Connectivity test successful!";

/// GET /connectivity - HEAD the configured URL and echo its status code.
///
/// Any HTTP response counts as connected, so a 404 upstream is returned as
/// a 404 with the success message. Transport failures return 500.
pub async fn connectivity_check(State(state): State<AppState>) -> Response {
    match state.connectivity.check().await {
        Ok(code) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(SUCCESS_MESSAGE)).into_response()
        }
        Err(e) => {
            tracing::error!(
                url = %state.connectivity.target(),
                error = %e,
                "Connectivity test failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(format!("Error: {e}")),
            )
                .into_response()
        }
    }
}
