//! CRUD and reorder endpoints, one generic set of handlers per section.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use folio_core::api::{ApiResponse, ListEditRequest, MoveRequest};
use folio_core::content::{MoveOutcome, Reordered};
use folio_core::database::Section;
use folio_model::{ListFields, OrderedEntity};
use tracing::info;
use uuid::Uuid;

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppJson, AppResult};

pub async fn list_handler<E: Section>(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<E>>>> {
    let items = state.facade::<E>().list().await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn create_handler<E: Section>(
    State(state): State<AppState>,
    AppJson(draft): AppJson<E::Draft>,
) -> AppResult<(StatusCode, Json<ApiResponse<E>>)> {
    let created = state.facade::<E>().create(draft).await?;
    info!(section = %E::KIND, id = %created.id(), "row created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn update_handler<E: Section>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(patch): AppJson<E::Patch>,
) -> AppResult<Json<ApiResponse<E>>> {
    let updated = state.facade::<E>().update(id, patch).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// Deletes one row and answers with the refreshed listing.
pub async fn delete_handler<E: Section>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<E>>>> {
    let remaining = state.facade::<E>().delete(id).await?;
    info!(section = %E::KIND, %id, "row deleted");
    Ok(Json(ApiResponse::success(remaining)))
}

/// One add/remove on an array column, as the admin array inputs send it.
pub async fn list_edit_handler<E: Section + ListFields>(
    State(state): State<AppState>,
    Path((id, field)): Path<(Uuid, String)>,
    AppJson(request): AppJson<ListEditRequest>,
) -> AppResult<Json<ApiResponse<E>>> {
    let updated = state
        .facade::<E>()
        .edit_list(id, &field, request.action, &request.value)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// Swaps a row with its neighbour. Out-of-range moves and failed writes
/// still answer 200 with the re-fetched listing; a failed write flips the
/// envelope to `error` with the store message.
pub async fn move_handler<E: Section + OrderedEntity>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<MoveRequest>,
) -> AppResult<Json<ApiResponse<Reordered<E>>>> {
    let reordered = state.facade::<E>().move_item(id, request.direction).await?;
    let response = match &reordered.outcome {
        MoveOutcome::Failed(message) => {
            let message = message.clone();
            ApiResponse::error_with_data(reordered, message)
        }
        MoveOutcome::Moved | MoveOutcome::Unchanged => ApiResponse::success(reordered),
    };
    Ok(Json(response))
}
