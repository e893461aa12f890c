use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::plant::{CreatePlant, Plant, UpdatePlant};
use serde::{Deserialize, Serialize};
use services::services::bloom_calendar;
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::load_plant_middleware};

#[derive(Deserialize, TS)]
pub struct PlantQueryParams {
    pub plant_bed_id: Uuid,
}

/// Bloom and sowing months for a plant, resolved from its bloom period
/// and planting date.
#[derive(Debug, Serialize, TS)]
pub struct BloomCalendar {
    pub bloom_months: Vec<u32>,
    pub sowing_months: Vec<u32>,
}

/// GET /api/plants?plant_bed_id= - Plants in a bed
pub async fn get_plants(
    State(state): State<AppState>,
    Query(params): Query<PlantQueryParams>,
) -> Result<ResponseJson<ApiResponse<Vec<Plant>>>, ApiError> {
    let plants = Plant::find_by_bed(&state.db().pool, params.plant_bed_id).await?;
    Ok(ResponseJson(ApiResponse::success(plants)))
}

/// POST /api/plants - Create a plant
pub async fn create_plant(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlant>,
) -> Result<ResponseJson<ApiResponse<Plant>>, ApiError> {
    let plant = Plant::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(plant)))
}

/// GET /api/plants/{id} - Get a plant by ID
pub async fn get_plant(
    Extension(plant): Extension<Plant>,
) -> Result<ResponseJson<ApiResponse<Plant>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(plant)))
}

/// PUT /api/plants/{id} - Update a plant
pub async fn update_plant(
    Extension(plant): Extension<Plant>,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePlant>,
) -> Result<ResponseJson<ApiResponse<Plant>>, ApiError> {
    let updated = Plant::update(&state.db().pool, plant.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(updated)))
}

/// DELETE /api/plants/{id} - Delete a plant
pub async fn delete_plant(
    Extension(plant): Extension<Plant>,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = Plant::delete(&state.db().pool, plant.id).await?;
    if rows_affected == 0 {
        Err(ApiError::NotFound)
    } else {
        Ok(ResponseJson(ApiResponse::success(())))
    }
}

/// GET /api/plants/{id}/bloom-calendar - Bloom and sowing months
pub async fn get_plant_bloom_calendar(
    Extension(plant): Extension<Plant>,
) -> Result<ResponseJson<ApiResponse<BloomCalendar>>, ApiError> {
    let bloom_months = bloom_calendar::parse_month_range(plant.bloom_period.as_deref());
    let sowing_months =
        bloom_calendar::sowing_months(plant.bloom_period.as_deref(), plant.planting_date);
    Ok(ResponseJson(ApiResponse::success(BloomCalendar {
        bloom_months,
        sowing_months,
    })))
}

pub fn router(state: &AppState) -> Router<AppState> {
    let plant_router = Router::new()
        .route("/", get(get_plant).put(update_plant).delete(delete_plant))
        .route("/bloom-calendar", get(get_plant_bloom_calendar))
        .layer(from_fn_with_state(state.clone(), load_plant_middleware));

    let inner = Router::new()
        .route("/", get(get_plants).post(create_plant))
        .nest("/{plant_id}", plant_router);

    Router::new().nest("/plants", inner)
}
