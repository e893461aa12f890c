use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{delete, get, post},
};
use services::services::trash::{TrashContents, TrashService};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// GET /api/trash - Deactivated users and deleted plant beds
pub async fn get_trash(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<TrashContents>>, ApiError> {
    let contents = TrashService::list(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(contents)))
}

/// POST /api/trash/plant-beds/{id}/restore - Restore a deleted bed;
/// 409 when its letter code has been reassigned
pub async fn restore_plant_bed(
    State(state): State<AppState>,
    Path(original_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    TrashService::restore_plant_bed(&state.db().pool, original_id).await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        (),
        "Plantvak hersteld",
    )))
}

/// DELETE /api/trash/plant-beds/{id} - Purge a deleted bed for good
pub async fn purge_plant_bed(
    State(state): State<AppState>,
    Path(original_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    TrashService::permanently_delete_plant_bed(&state.db().pool, original_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

/// POST /api/trash/users/{id}/restore - Reactivate a deactivated user
pub async fn restore_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    TrashService::restore_user(&state.db().pool, user_id).await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        (),
        "Gebruiker hersteld",
    )))
}

/// DELETE /api/trash/users/{id} - Purge a deactivated user for good
pub async fn purge_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    TrashService::permanently_delete_user(&state.db().pool, user_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    let inner = Router::new()
        .route("/", get(get_trash))
        .route("/plant-beds/{original_id}/restore", post(restore_plant_bed))
        .route("/plant-beds/{original_id}", delete(purge_plant_bed))
        .route("/users/{user_id}/restore", post(restore_user))
        .route("/users/{user_id}", delete(purge_user));

    Router::new().nest("/trash", inner)
}
