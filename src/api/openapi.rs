//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipamentos Pesados API",
        version = "0.1.0",
        description = "Heavy equipment inventory REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::get_equipment,
        equipment::list_equipment,
        equipment::get_equipment_status,
        equipment::list_equipment_by_type,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::advance_status,
        equipment::update_hour_meter,
        equipment::update_location,
        equipment::delete_equipment,
    ),
    components(
        schemas(
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentRequest,
            crate::models::equipment::UpdateHourMeter,
            crate::models::equipment::UpdateLocation,
            crate::models::equipment::StatusResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipamentos", description = "Heavy equipment management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
