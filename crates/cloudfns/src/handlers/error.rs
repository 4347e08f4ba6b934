use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cloudfns_core::items::{error_body, ItemRequestError};
use cloudfns_core::storage::{repository_error_to_status_code, RepositoryError};

/// Error type for JSON handlers, rendered as `{"error": "<message>"}`.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(repo_error)
        } else if let Some(request_error) = self.0.downcast_ref::<ItemRequestError>() {
            request_error.status_code()
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(error = %self.0, status = %status_code, "Request failed");
        } else {
            tracing::warn!(error = %self.0, status = %status_code, "Request rejected");
        }

        (status_code, Json(error_body(&self.0))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_use_mapping() {
        let err = AppError::from(RepositoryError::Throttled("slow down".to_string()));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_request_errors_use_their_status() {
        let err = AppError::from(ItemRequestError::MethodNotAllowed("PUT".to_string()));
        assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = AppError(anyhow::anyhow!("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
