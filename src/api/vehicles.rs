//! Catálogo de vehículos y administración de la flota

use crate::middleware::auth::AdminUser;
use crate::models::vehicle::{
    CreateVehicleRequest, UpdateVehicleStatusRequest, Vehicle, VehicleFilters,
};
use crate::models::{ApiResponse, PaginatedResponse};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use validator::Validate;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/", post(create_vehicle))
        .route("/:id", get(get_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/status", put(set_vehicle_status))
}

/// Listado público con búsqueda por texto sobre marca, modelo o tipo
async fn list_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<PaginatedResponse<Vehicle>>, AppError> {
    let repository = VehicleRepository::new(state.pool.clone());
    let page = filters.page.unwrap_or(1).max(1);
    let per_page = filters.per_page.unwrap_or(10).clamp(1, 50);
    let (vehicles, total) = repository.search(&filters).await?;
    Ok(Json(PaginatedResponse::new(vehicles, total, page, per_page)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vehicle>, AppError> {
    let repository = VehicleRepository::new(state.pool.clone());
    let vehicle = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))?;
    Ok(Json(vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    request.validate()?;

    let repository = VehicleRepository::new(state.pool.clone());
    if repository.registration_exists(&request.registration_no).await? {
        return Err(AppError::Conflict(
            "Registration number is already in use".to_string(),
        ));
    }

    let vehicle = repository.create(&request).await?;
    Ok(Json(ApiResponse::success_with_message(
        vehicle,
        "Vehicle created".to_string(),
    )))
}

/// Toggle manual del staff (bloqueo por mantenimiento). Escribe directo el
/// estado del vehículo, por fuera del ciclo de vida de las reservas.
async fn set_vehicle_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateVehicleStatusRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let repository = VehicleRepository::new(state.pool.clone());
    let vehicle = repository.set_status(id, request.status).await?;
    Ok(Json(ApiResponse::success_with_message(
        vehicle,
        format!("Vehicle status set to {}", request.status),
    )))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let repository = VehicleRepository::new(state.pool.clone());
    repository.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        (),
        "Vehicle deleted".to_string(),
    )))
}
