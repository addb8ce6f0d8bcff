//! API handlers and router for the equipment REST endpoints

pub mod equipment;
pub mod health;
pub mod openapi;

use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // `:id` is shared by every nested route; the type route reads it as a string
    let api = Router::new()
        .route(
            "/equipamentos",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/equipamentos/:id",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        .route("/equipamentos/:id/status", get(equipment::get_equipment_status))
        .route("/equipamentos/:id/tipo", get(equipment::list_equipment_by_type))
        .route("/equipamentos/:id/avancar-status", patch(equipment::advance_status))
        .route(
            "/equipamentos/:id/atualizar-horimetro",
            patch(equipment::update_hour_meter),
        )
        .route(
            "/equipamentos/:id/atualizar-localizacao",
            patch(equipment::update_location),
        )
        .with_state(state.clone());

    let health = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(health)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
