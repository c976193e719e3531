//! Checkout y reservas del usuario

use crate::middleware::auth::CurrentUser;
use crate::models::rental::{CheckoutRequest, CheckoutResponse, RentalSummary};
use crate::models::ApiResponse;
use crate::repositories::rental_repository::RentalRepository;
use crate::services::booking_service::BookingService;
use crate::services::lifecycle_service::LifecycleService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/", get(my_bookings))
        .route("/:id/cancel", post(cancel_booking))
}

/// Checkout del carrito completo. Se mantiene el write lock de la sesión
/// durante toda la operación: un doble submit desde la misma sesión no puede
/// insertar el carrito dos veces, y el carrito solo se vacía si el lote se
/// comprometió. Con error, el carrito queda intacto para reintentar.
async fn checkout(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&user.token)
        .ok_or_else(|| AppError::Unauthorized("Unknown or expired session".to_string()))?;

    let cart = session.cart.clone();
    let service = BookingService::new(state.pool.clone());
    let rental_ids = service.checkout(user.user_id, &cart, &request).await?;
    session.cart.clear();

    Ok(Json(ApiResponse::success_with_message(
        CheckoutResponse { rental_ids },
        "Booking submitted, awaiting approval".to_string(),
    )))
}

async fn my_bookings(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<RentalSummary>>, AppError> {
    let repository = RentalRepository::new(state.pool.clone());
    let rentals = repository.list_for_user(user.user_id).await?;
    Ok(Json(rentals))
}

async fn cancel_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let service = LifecycleService::new(state.pool.clone());
    service.cancel(id, user.user_id).await?;
    Ok(Json(ApiResponse::success_with_message(
        (),
        "Booking cancelled".to_string(),
    )))
}
