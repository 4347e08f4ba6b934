//! Row-level security demo handler.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::state::AppState;

/// Output format of the demo report.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct RlsQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

/// GET /rls-demo - provision the demo schema and report tenant isolation.
pub async fn rls_demo(State(state): State<AppState>, Query(query): Query<RlsQuery>) -> Response {
    match state.rls.run().await {
        Ok(report) => match query.format {
            ReportFormat::Text => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                report.render(),
            )
                .into_response(),
            ReportFormat::Json => (StatusCode::OK, Json(report)).into_response(),
        },
        Err(e) => {
            tracing::error!(error = %e, "Error during RLS demo execution");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {e}")).into_response()
        }
    }
}
