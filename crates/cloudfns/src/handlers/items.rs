//! Items CRUD handler.
//!
//! Both item routes funnel into one handler: the HTTP method and the path id
//! are turned into an `ItemAction` by `cloudfns_core::items::dispatch`, so
//! unsupported methods get the same JSON 405 body on every path.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use cloudfns_core::items::{
    dispatch, error_body, ItemAction, ItemRequest, ItemRequestError, ITEM_NOT_FOUND,
};

use crate::{handlers::AppError, state::AppState};

/// Any method on `/items`.
pub async fn items_collection(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, AppError> {
    handle_items(&state, method, None, body).await
}

/// Any method on `/items/{id}`.
pub async fn items_member(
    State(state): State<AppState>,
    method: Method,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Response, AppError> {
    let Path(id) = path.map_err(|e| ItemRequestError::InvalidId(e.body_text()))?;
    handle_items(&state, method, Some(id), body).await
}

async fn handle_items(
    state: &AppState,
    method: Method,
    id: Option<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let action = dispatch(ItemRequest {
        method: method.as_str().to_string(),
        id,
        body: Some(body.to_vec()),
    })?;

    match action {
        ItemAction::Put(item) => {
            state.item_repo.put_item(&item).await?;
            tracing::info!(item_id = %item.id(), "Stored item");
            Ok((StatusCode::CREATED, Json(item)).into_response())
        }
        ItemAction::Get(id) => match state.item_repo.get_item(&id).await? {
            Some(item) => Ok((StatusCode::OK, Json(item)).into_response()),
            None => {
                tracing::debug!(item_id = %id, "Item not found");
                Ok((StatusCode::NOT_FOUND, Json(error_body(ITEM_NOT_FOUND))).into_response())
            }
        },
        ItemAction::Delete(id) => {
            state.item_repo.delete_item(&id).await?;
            tracing::info!(item_id = %id, "Deleted item");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}
