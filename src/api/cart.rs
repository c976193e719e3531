//! Carrito por sesión
//!
//! El carrito vive en la sesión en memoria (`AppState.sessions`); estas rutas
//! lo mutan bajo el write lock de la sesión del usuario.

use crate::middleware::auth::CurrentUser;
use crate::models::cart::{
    AddToCartRequest, CartItemView, CartLine, CartView, UpdateCartLineRequest,
};
use crate::models::vehicle::VehicleStatus;
use crate::models::ApiResponse;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use validator::Validate;

pub fn create_cart_router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart))
        .route("/add", post(add_to_cart))
        .route("/:index", put(update_cart_line))
        .route("/:index", delete(remove_from_cart))
}

/// Vista del carrito con datos actuales del vehículo y subtotales.
/// Líneas cuyo vehículo ya no existe se omiten de la vista.
async fn view_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<CartView>, AppError> {
    let cart = state
        .get_session(&user.token)
        .await
        .map(|session| session.cart)
        .unwrap_or_default();

    let repository = VehicleRepository::new(state.pool.clone());
    let mut items = Vec::with_capacity(cart.len());
    let mut total_amount = 0;
    let mut total_days = 0;

    for line in &cart {
        if let Some(vehicle) = repository.find_by_id(line.vehicle_id).await? {
            let subtotal = vehicle.daily_rate * line.days;
            total_amount += subtotal;
            total_days += line.days;
            items.push(CartItemView {
                vehicle_id: vehicle.vehicle_id,
                brand: vehicle.brand,
                model: vehicle.model,
                daily_rate: vehicle.daily_rate,
                days: line.days,
                subtotal,
            });
        }
    }

    Ok(Json(CartView {
        items,
        total_amount,
        total_days,
    }))
}

async fn add_to_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<ApiResponse<CartLine>>, AppError> {
    request.validate()?;

    let repository = VehicleRepository::new(state.pool.clone());
    let vehicle = repository
        .find_by_id(request.vehicle_id)
        .await?
        .ok_or(AppError::VehicleUnavailable(request.vehicle_id))?;
    if vehicle.status != VehicleStatus::Available {
        return Err(AppError::VehicleUnavailable(request.vehicle_id));
    }

    let line = CartLine {
        vehicle_id: request.vehicle_id,
        days: request.days,
    };

    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&user.token)
        .ok_or_else(|| AppError::Unauthorized("Unknown or expired session".to_string()))?;
    session.cart.push(line.clone());

    Ok(Json(ApiResponse::success_with_message(
        line,
        "Added to cart".to_string(),
    )))
}

async fn update_cart_line(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(index): Path<usize>,
    Json(request): Json<UpdateCartLineRequest>,
) -> Result<Json<ApiResponse<CartLine>>, AppError> {
    request.validate()?;

    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&user.token)
        .ok_or_else(|| AppError::Unauthorized("Unknown or expired session".to_string()))?;
    let line = session
        .cart
        .get_mut(index)
        .ok_or_else(|| AppError::NotFound(format!("Cart line {} not found", index)))?;
    line.days = request.days;
    let line = line.clone();

    Ok(Json(ApiResponse::success_with_message(
        line,
        "Cart updated".to_string(),
    )))
}

async fn remove_from_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&user.token)
        .ok_or_else(|| AppError::Unauthorized("Unknown or expired session".to_string()))?;

    if index >= session.cart.len() {
        return Err(AppError::NotFound(format!("Cart line {} not found", index)));
    }
    session.cart.remove(index);

    Ok(Json(ApiResponse::success_with_message(
        (),
        "Removed from cart".to_string(),
    )))
}
