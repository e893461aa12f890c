use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::logbook_entry::{CreateLogbookEntry, LogbookEntry, UpdateLogbookEntry};
use serde::Deserialize;
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::load_logbook_entry_middleware};

#[derive(Deserialize, TS)]
pub struct LogbookQueryParams {
    #[serde(default)]
    pub plant_bed_id: Option<Uuid>,
}

/// GET /api/logbook - Entries, newest first, optionally scoped to a bed
pub async fn get_logbook_entries(
    State(state): State<AppState>,
    Query(params): Query<LogbookQueryParams>,
) -> Result<ResponseJson<ApiResponse<Vec<LogbookEntry>>>, ApiError> {
    let pool = &state.db().pool;
    let entries = match params.plant_bed_id {
        Some(plant_bed_id) => LogbookEntry::find_by_bed(pool, plant_bed_id).await?,
        None => LogbookEntry::find_all(pool).await?,
    };
    Ok(ResponseJson(ApiResponse::success(entries)))
}

/// POST /api/logbook - Create an entry
pub async fn create_logbook_entry(
    State(state): State<AppState>,
    Json(payload): Json<CreateLogbookEntry>,
) -> Result<ResponseJson<ApiResponse<LogbookEntry>>, ApiError> {
    let entry = LogbookEntry::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(entry)))
}

/// GET /api/logbook/{id} - Get an entry by ID
pub async fn get_logbook_entry(
    Extension(entry): Extension<LogbookEntry>,
) -> Result<ResponseJson<ApiResponse<LogbookEntry>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(entry)))
}

/// PUT /api/logbook/{id} - Update an entry
pub async fn update_logbook_entry(
    Extension(entry): Extension<LogbookEntry>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLogbookEntry>,
) -> Result<ResponseJson<ApiResponse<LogbookEntry>>, ApiError> {
    let updated = LogbookEntry::update(&state.db().pool, entry.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(updated)))
}

/// DELETE /api/logbook/{id} - Delete an entry
pub async fn delete_logbook_entry(
    Extension(entry): Extension<LogbookEntry>,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = LogbookEntry::delete(&state.db().pool, entry.id).await?;
    if rows_affected == 0 {
        Err(ApiError::NotFound)
    } else {
        Ok(ResponseJson(ApiResponse::success(())))
    }
}

pub fn router(state: &AppState) -> Router<AppState> {
    let entry_router = Router::new()
        .route(
            "/",
            get(get_logbook_entry)
                .put(update_logbook_entry)
                .delete(delete_logbook_entry),
        )
        .layer(from_fn_with_state(
            state.clone(),
            load_logbook_entry_middleware,
        ));

    let inner = Router::new()
        .route("/", get(get_logbook_entries).post(create_logbook_entry))
        .nest("/{entry_id}", entry_router);

    Router::new().nest("/logbook", inner)
}
