//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};

use crate::{
    error::AppResult,
    models::equipment::{
        Equipment, EquipmentQuery, EquipmentRequest, StatusResponse, UpdateHourMeter,
        UpdateLocation,
    },
    AppState,
};

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/api/equipamentos/{id}",
    tag = "equipamentos",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// List all equipment
#[utoipa::path(
    get,
    path = "/api/equipamentos",
    tag = "equipamentos",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list(query.tipo.as_deref()).await?;
    Ok(Json(equipment))
}

/// Get only the operational status
#[utoipa::path(
    get,
    path = "/api/equipamentos/{id}/status",
    tag = "equipamentos",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Current status", body = StatusResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<StatusResponse>> {
    let status = state.services.equipment.get_status(id).await?;
    Ok(Json(status))
}

/// List equipment of one type (case-insensitive)
#[utoipa::path(
    get,
    path = "/api/equipamentos/{tipo}/tipo",
    tag = "equipamentos",
    params(("tipo" = String, Path, description = "Equipment type")),
    responses(
        (status = 200, description = "Filtered equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment_by_type(
    State(state): State<AppState>,
    Path(tipo): Path<String>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list(Some(&tipo)).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/api/equipamentos",
    tag = "equipamentos",
    request_body = EquipmentRequest,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    Json(data): Json<EquipmentRequest>,
) -> AppResult<impl IntoResponse> {
    let equipment = state.services.equipment.create(&data).await?;
    let location = format!("/api/equipamentos/{}", equipment.id);
    Ok((
        StatusCode::CREATED,
        AppendHeaders([(LOCATION, location)]),
        Json(equipment),
    ))
}

/// Replace every field of an equipment record
#[utoipa::path(
    put,
    path = "/api/equipamentos/{id}",
    tag = "equipamentos",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = EquipmentRequest,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<EquipmentRequest>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Advance the operational status one step
#[utoipa::path(
    patch,
    path = "/api/equipamentos/{id}/avancar-status",
    tag = "equipamentos",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Status advanced", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn advance_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.advance_status(id).await?;
    Ok(Json(equipment))
}

/// Update the hour meter reading
#[utoipa::path(
    patch,
    path = "/api/equipamentos/{id}/atualizar-horimetro",
    tag = "equipamentos",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateHourMeter,
    responses(
        (status = 200, description = "Hour meter updated", body = Equipment),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_hour_meter(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateHourMeter>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update_hour_meter(id, &data).await?;
    Ok(Json(equipment))
}

/// Update the current location
#[utoipa::path(
    patch,
    path = "/api/equipamentos/{id}/atualizar-localizacao",
    tag = "equipamentos",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateLocation,
    responses(
        (status = 200, description = "Location updated", body = Equipment),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLocation>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update_location(id, &data).await?;
    Ok(Json(equipment))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/api/equipamentos/{id}",
    tag = "equipamentos",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
