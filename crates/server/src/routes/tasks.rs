use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::task::{CreateTask, Task, TaskWithContext, UpdateTask};
use serde::Deserialize;
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::load_task_middleware};

#[derive(Deserialize, TS)]
pub struct TaskQueryParams {
    #[serde(default)]
    pub plant_id: Option<Uuid>,
    #[serde(default)]
    pub plant_bed_id: Option<Uuid>,
}

#[derive(Deserialize, TS)]
pub struct CompleteTask {
    pub completed: bool,
}

/// GET /api/tasks - List tasks, optionally filtered by plant or bed
pub async fn get_tasks(
    State(state): State<AppState>,
    Query(params): Query<TaskQueryParams>,
) -> Result<ResponseJson<ApiResponse<Vec<Task>>>, ApiError> {
    let pool = &state.db().pool;
    let tasks = match (params.plant_id, params.plant_bed_id) {
        (Some(plant_id), _) => Task::find_by_plant(pool, plant_id).await?,
        (None, Some(plant_bed_id)) => Task::find_by_plant_bed(pool, plant_bed_id).await?,
        (None, None) => Task::find_all(pool).await?,
    };
    Ok(ResponseJson(ApiResponse::success(tasks)))
}

/// GET /api/tasks/with-context - All tasks with plant/bed/garden names
pub async fn get_tasks_with_context(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<TaskWithContext>>>, ApiError> {
    let tasks = Task::find_all_with_context(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(tasks)))
}

/// POST /api/tasks - Create a task against a plant or a bed
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTask>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    let task = Task::create(&state.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(task)))
}

/// GET /api/tasks/{id} - Get a task by ID
pub async fn get_task(
    Extension(task): Extension<Task>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(task)))
}

/// PUT /api/tasks/{id} - Update a task
pub async fn update_task(
    Extension(task): Extension<Task>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateTask>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    let updated = Task::update(&state.db().pool, task.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(updated)))
}

/// PUT /api/tasks/{id}/complete - Toggle completion
pub async fn complete_task(
    Extension(task): Extension<Task>,
    State(state): State<AppState>,
    Json(payload): Json<CompleteTask>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    let updated = Task::set_completed(&state.db().pool, task.id, payload.completed).await?;
    Ok(ResponseJson(ApiResponse::success(updated)))
}

/// DELETE /api/tasks/{id} - Delete a task
pub async fn delete_task(
    Extension(task): Extension<Task>,
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = Task::delete(&state.db().pool, task.id).await?;
    if rows_affected == 0 {
        Err(ApiError::NotFound)
    } else {
        Ok(ResponseJson(ApiResponse::success(())))
    }
}

pub fn router(state: &AppState) -> Router<AppState> {
    let task_router = Router::new()
        .route("/", get(get_task).put(update_task).delete(delete_task))
        .route("/complete", put(complete_task))
        .layer(from_fn_with_state(state.clone(), load_task_middleware));

    let inner = Router::new()
        .route("/", get(get_tasks).post(create_task))
        .route("/with-context", get(get_tasks_with_context))
        .nest("/{task_id}", task_router);

    Router::new().nest("/tasks", inner)
}
