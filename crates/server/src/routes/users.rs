use axum::{
    Extension, Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::user::{CreateUser, UpdateUser, User};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::load_user_middleware};

/// GET /api/users - List active users
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<User>>>, ApiError> {
    let users = User::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(users)))
}

/// POST /api/users - Create a user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<ResponseJson<ApiResponse<User>>, ApiError> {
    let user = User::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(user)))
}

/// GET /api/users/{id} - Get a user by ID
pub async fn get_user(
    Extension(user): Extension<User>,
) -> Result<ResponseJson<ApiResponse<User>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(user)))
}

/// PUT /api/users/{id} - Update a user
pub async fn update_user(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUser>,
) -> Result<ResponseJson<ApiResponse<User>>, ApiError> {
    let updated = User::update(&state.db().pool, user.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(updated)))
}

/// DELETE /api/users/{id} - Deactivate a user (moves them to the trash)
pub async fn delete_user(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = User::deactivate(&state.db().pool, user.id).await?;
    if rows_affected == 0 {
        Err(ApiError::NotFound)
    } else {
        Ok(ResponseJson(ApiResponse::success(())))
    }
}

pub fn router(state: &AppState) -> Router<AppState> {
    let user_router = Router::new()
        .route("/", get(get_user).put(update_user).delete(delete_user))
        .layer(from_fn_with_state(state.clone(), load_user_middleware));

    let inner = Router::new()
        .route("/", get(get_users).post(create_user))
        .nest("/{user_id}", user_router);

    Router::new().nest("/users", inner)
}
