//! Rutas de staff: gestión de órdenes y de miembros

use crate::middleware::auth::AdminUser;
use crate::models::rental::{AdminOrderRow, OrderFilters};
use crate::models::user::{UserFilters, UserResponse};
use crate::models::{ApiResponse, PaginatedResponse};
use crate::repositories::rental_repository::RentalRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::lifecycle_service::LifecycleService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/:id/approve", post(approve_order))
        .route("/orders/:id/reject", post(reject_order))
        .route("/orders/:id/return", post(mark_order_returned))
        .route("/users", get(list_members))
        .route("/users/:id/toggle-lock", post(toggle_member_lock))
}

async fn list_orders(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(filters): Query<OrderFilters>,
) -> Result<Json<PaginatedResponse<AdminOrderRow>>, AppError> {
    let repository = RentalRepository::new(state.pool.clone());
    let page = filters.page.unwrap_or(1).max(1);
    let per_page = filters.per_page.unwrap_or(10).clamp(1, 50);
    let (orders, total) = repository.list_orders(&filters).await?;
    Ok(Json(PaginatedResponse::new(orders, total, page, per_page)))
}

async fn approve_order(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let service = LifecycleService::new(state.pool.clone());
    service.approve(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        (),
        "Booking approved".to_string(),
    )))
}

async fn reject_order(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let service = LifecycleService::new(state.pool.clone());
    service.reject(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        (),
        "Booking rejected".to_string(),
    )))
}

async fn mark_order_returned(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let service = LifecycleService::new(state.pool.clone());
    service.mark_returned(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        (),
        "Vehicle returned, booking completed".to_string(),
    )))
}

async fn list_members(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(filters): Query<UserFilters>,
) -> Result<Json<PaginatedResponse<UserResponse>>, AppError> {
    let repository = UserRepository::new(state.pool.clone());
    let page = filters.page.unwrap_or(1).max(1);
    let per_page = filters.per_page.unwrap_or(10).clamp(1, 50);
    let (users, total) = repository.search_members(&filters).await?;
    let users = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(PaginatedResponse::new(users, total, page, per_page)))
}

async fn toggle_member_lock(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let repository = UserRepository::new(state.pool.clone());
    let user = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
    let user = repository.set_locked(id, !user.is_locked).await?;

    let message = if user.is_locked {
        "Account locked".to_string()
    } else {
        "Account unlocked".to_string()
    };
    Ok(Json(ApiResponse::success_with_message(user.into(), message)))
}
