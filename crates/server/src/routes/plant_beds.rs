use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::plant::Plant;
use db::models::plant_bed::{CreatePlantBed, PlantBed, UpdatePlantBed};
use serde::Deserialize;
use services::services::plant_beds::PlantBedService;
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::load_plant_bed_middleware};

#[derive(Deserialize, TS)]
pub struct PlantBedQueryParams {
    pub garden_id: Uuid,
}

/// GET /api/plant-beds?garden_id= - Active beds in a garden
pub async fn get_plant_beds(
    State(state): State<AppState>,
    Query(params): Query<PlantBedQueryParams>,
) -> Result<ResponseJson<ApiResponse<Vec<PlantBed>>>, ApiError> {
    let beds = PlantBed::find_by_garden(&state.db().pool, params.garden_id).await?;
    Ok(ResponseJson(ApiResponse::success(beds)))
}

/// POST /api/plant-beds - Create a bed; the letter code is assigned
/// server-side from the next free slot in the garden.
pub async fn create_plant_bed(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlantBed>,
) -> Result<ResponseJson<ApiResponse<PlantBed>>, ApiError> {
    let bed = PlantBedService::create(&state.db().pool, state.notifier(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(bed)))
}

/// GET /api/plant-beds/{id} - Get a bed by ID
pub async fn get_plant_bed(
    Extension(bed): Extension<PlantBed>,
) -> Result<ResponseJson<ApiResponse<PlantBed>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(bed)))
}

/// PUT /api/plant-beds/{id} - Update a bed
pub async fn update_plant_bed(
    Extension(bed): Extension<PlantBed>,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePlantBed>,
) -> Result<ResponseJson<ApiResponse<PlantBed>>, ApiError> {
    let updated = PlantBed::update(&state.db().pool, bed.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(updated)))
}

/// DELETE /api/plant-beds/{id} - Soft delete a bed into the trash
pub async fn delete_plant_bed(
    Extension(bed): Extension<PlantBed>,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    if PlantBedService::soft_delete(&state.db().pool, bed.id).await? {
        Ok(ResponseJson(ApiResponse::success(())))
    } else {
        Err(ApiError::NotFound)
    }
}

/// GET /api/plant-beds/{id}/plants - Plants in a bed
pub async fn get_plant_bed_plants(
    Extension(bed): Extension<PlantBed>,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Plant>>>, ApiError> {
    let plants = Plant::find_by_bed(&state.db().pool, bed.id).await?;
    Ok(ResponseJson(ApiResponse::success(plants)))
}

pub fn router(state: &AppState) -> Router<AppState> {
    let bed_router = Router::new()
        .route(
            "/",
            get(get_plant_bed)
                .put(update_plant_bed)
                .delete(delete_plant_bed),
        )
        .route("/plants", get(get_plant_bed_plants))
        .layer(from_fn_with_state(state.clone(), load_plant_bed_middleware));

    let inner = Router::new()
        .route("/", get(get_plant_beds).post(create_plant_bed))
        .nest("/{plant_bed_id}", bed_router);

    Router::new().nest("/plant-beds", inner)
}
