//! Handlers HTTP agrupados por recurso

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod cart;
pub mod vehicles;

use crate::state::AppState;
use axum::Router;

/// Crear el router completo de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::create_auth_router())
        .nest("/vehicles", vehicles::create_vehicle_router())
        .nest("/cart", cart::create_cart_router())
        .nest("/bookings", bookings::create_booking_router())
        .nest("/admin", admin::create_admin_router())
}
