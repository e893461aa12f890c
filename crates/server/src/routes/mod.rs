use axum::{
    Router,
    routing::{IntoMakeService, get},
};
use tower_http::cors::CorsLayer;

use crate::AppState;

pub mod gardens;
pub mod health;
pub mod logbook;
pub mod plant_beds;
pub mod plants;
pub mod sessions;
pub mod tasks;
pub mod trash;
pub mod users;

pub fn router(state: AppState) -> IntoMakeService<Router> {
    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .merge(gardens::router(&state))
        .merge(plant_beds::router(&state))
        .merge(plants::router(&state))
        .merge(tasks::router(&state))
        .merge(logbook::router(&state))
        .merge(users::router(&state))
        .merge(sessions::router(&state))
        .merge(trash::router())
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .into_make_service()
}
