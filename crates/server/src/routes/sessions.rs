use axum::{
    Extension, Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::session::{
    CreateSession, GardenSession, SessionWithRegistrations, UpdateSession,
};
use serde::Deserialize;
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::load_session_middleware};

#[derive(Deserialize, TS)]
pub struct RegistrationPayload {
    pub user_id: Uuid,
}

/// GET /api/sessions - Sessions with registration counts
pub async fn get_sessions(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<SessionWithRegistrations>>>, ApiError> {
    let sessions = GardenSession::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(sessions)))
}

/// POST /api/sessions - Create a work session
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateSession>,
) -> Result<ResponseJson<ApiResponse<GardenSession>>, ApiError> {
    let session = GardenSession::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(session)))
}

/// GET /api/sessions/{id} - Get a session by ID
pub async fn get_session(
    Extension(session): Extension<GardenSession>,
) -> Result<ResponseJson<ApiResponse<GardenSession>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(session)))
}

/// PUT /api/sessions/{id} - Update a session
pub async fn update_session(
    Extension(session): Extension<GardenSession>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateSession>,
) -> Result<ResponseJson<ApiResponse<GardenSession>>, ApiError> {
    let updated = GardenSession::update(&state.db().pool, session.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(updated)))
}

/// DELETE /api/sessions/{id} - Delete a session and its registrations
pub async fn delete_session(
    Extension(session): Extension<GardenSession>,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = GardenSession::delete(&state.db().pool, session.id).await?;
    if rows_affected == 0 {
        Err(ApiError::NotFound)
    } else {
        Ok(ResponseJson(ApiResponse::success(())))
    }
}

/// GET /api/sessions/{id}/registrations - Registered volunteer ids
pub async fn get_session_registrations(
    Extension(session): Extension<GardenSession>,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Uuid>>>, ApiError> {
    let user_ids = GardenSession::registered_user_ids(&state.db().pool, session.id).await?;
    Ok(ResponseJson(ApiResponse::success(user_ids)))
}

/// POST /api/sessions/{id}/register - Sign a volunteer up; 409 when the
/// session is full or the volunteer is already registered
pub async fn register_volunteer(
    Extension(session): Extension<GardenSession>,
    State(state): State<AppState>,
    Json(payload): Json<RegistrationPayload>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    GardenSession::register_volunteer(&state.db().pool, session.id, payload.user_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

/// POST /api/sessions/{id}/unregister - Withdraw a volunteer
pub async fn unregister_volunteer(
    Extension(session): Extension<GardenSession>,
    State(state): State<AppState>,
    Json(payload): Json<RegistrationPayload>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected =
        GardenSession::unregister_volunteer(&state.db().pool, session.id, payload.user_id).await?;
    if rows_affected == 0 {
        Err(ApiError::NotFound)
    } else {
        Ok(ResponseJson(ApiResponse::success(())))
    }
}

pub fn router(state: &AppState) -> Router<AppState> {
    let session_router = Router::new()
        .route(
            "/",
            get(get_session).put(update_session).delete(delete_session),
        )
        .route("/registrations", get(get_session_registrations))
        .route("/register", post(register_volunteer))
        .route("/unregister", post(unregister_volunteer))
        .layer(from_fn_with_state(state.clone(), load_session_middleware));

    let inner = Router::new()
        .route("/", get(get_sessions).post(create_session))
        .nest("/{session_id}", session_router);

    Router::new().nest("/sessions", inner)
}
