//! Middleware that resolves path ids to model records.
//!
//! Each loader fetches the record for the id in the path and stores it
//! as a request extension, so handlers downstream can take it with
//! `Extension<T>`. Missing rows short-circuit to 404.

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use db::models::{
    garden::Garden, logbook_entry::LogbookEntry, plant::Plant, plant_bed::PlantBed,
    session::GardenSession, task::Task, user::User,
};
use uuid::Uuid;

use crate::AppState;

macro_rules! model_loader {
    ($fn_name:ident, $finder:path, $label:literal) => {
        pub async fn $fn_name(
            State(state): State<AppState>,
            Path(id): Path<Uuid>,
            mut request: Request,
            next: Next,
        ) -> Result<Response, StatusCode> {
            let record = match $finder(&state.db().pool, id).await {
                Ok(Some(record)) => record,
                Ok(None) => {
                    tracing::warn!("{} {} not found", $label, id);
                    return Err(StatusCode::NOT_FOUND);
                }
                Err(e) => {
                    tracing::error!("Failed to fetch {} {}: {}", $label, id, e);
                    return Err(StatusCode::INTERNAL_SERVER_ERROR);
                }
            };
            request.extensions_mut().insert(record);
            Ok(next.run(request).await)
        }
    };
}

model_loader!(load_garden_middleware, Garden::find_by_id, "garden");
model_loader!(load_plant_bed_middleware, PlantBed::find_by_id, "plant bed");
model_loader!(load_plant_middleware, Plant::find_by_id, "plant");
model_loader!(load_task_middleware, Task::find_by_id, "task");
model_loader!(
    load_logbook_entry_middleware,
    LogbookEntry::find_by_id,
    "logbook entry"
);
model_loader!(load_user_middleware, User::find_by_id, "user");
model_loader!(
    load_session_middleware,
    GardenSession::find_by_id,
    "session"
);
