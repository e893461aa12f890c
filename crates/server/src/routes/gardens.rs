use axum::{
    Extension, Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::garden::{CreateGarden, Garden, UpdateGarden};
use db::models::plant_bed::PlantBed;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::load_garden_middleware};

/// GET /api/gardens - List active gardens
pub async fn get_gardens(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Garden>>>, ApiError> {
    let gardens = Garden::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(gardens)))
}

/// POST /api/gardens - Create a garden
pub async fn create_garden(
    State(state): State<AppState>,
    Json(payload): Json<CreateGarden>,
) -> Result<ResponseJson<ApiResponse<Garden>>, ApiError> {
    let garden = Garden::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(garden)))
}

/// GET /api/gardens/{id} - Get a garden by ID
pub async fn get_garden(
    Extension(garden): Extension<Garden>,
) -> Result<ResponseJson<ApiResponse<Garden>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(garden)))
}

/// PUT /api/gardens/{id} - Update a garden
pub async fn update_garden(
    Extension(garden): Extension<Garden>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateGarden>,
) -> Result<ResponseJson<ApiResponse<Garden>>, ApiError> {
    let updated = Garden::update(&state.db().pool, garden.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(updated)))
}

/// DELETE /api/gardens/{id} - Soft delete a garden
pub async fn delete_garden(
    Extension(garden): Extension<Garden>,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = Garden::soft_delete(&state.db().pool, garden.id).await?;
    if rows_affected == 0 {
        Err(ApiError::NotFound)
    } else {
        Ok(ResponseJson(ApiResponse::success(())))
    }
}

/// GET /api/gardens/{id}/plant-beds - Active beds in a garden
pub async fn get_garden_plant_beds(
    Extension(garden): Extension<Garden>,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<PlantBed>>>, ApiError> {
    let beds = PlantBed::find_by_garden(&state.db().pool, garden.id).await?;
    Ok(ResponseJson(ApiResponse::success(beds)))
}

pub fn router(state: &AppState) -> Router<AppState> {
    let garden_router = Router::new()
        .route("/", get(get_garden).put(update_garden).delete(delete_garden))
        .route("/plant-beds", get(get_garden_plant_beds))
        .layer(from_fn_with_state(state.clone(), load_garden_middleware));

    let inner = Router::new()
        .route("/", get(get_gardens).post(create_garden))
        .nest("/{garden_id}", garden_router);

    Router::new().nest("/gardens", inner)
}
