//! Modelo de Rental (reserva)
//!
//! Una reserva cubre un vehículo por una ventana contigua de fechas
//! [start_date, end_date) para un usuario. Las filas nunca se borran:
//! cancelación y rechazo son estados terminales.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use validator::Validate;

/// Estado de la reserva - máquina de estados estrictamente hacia adelante:
///
/// pending --approve--> confirmed --return--> completed
/// pending --reject---> rejected
/// pending --cancel---> cancelled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    Completed,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Confirmed => "confirmed",
            RentalStatus::Rejected => "rejected",
            RentalStatus::Cancelled => "cancelled",
            RentalStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rental principal - mapea exactamente a la tabla rentals
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub rental_id: i64,
    pub user_id: i64,
    pub vehicle_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Precio congelado al momento de reservar: daily_rate × días
    pub total_amount: i64,
    pub payment_method: String,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
}

/// Request de checkout: una sola ventana de fechas para todo el carrito.
/// end_date la deriva el cliente (start + total de días) y el motor la
/// verifica; un desajuste es error de validación, nunca se corrige en silencio.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(length(min = 1, max = 200))]
    pub pickup_location: String,

    #[validate(length(min = 1, max = 200))]
    pub dropoff_location: String,
}

/// Response de checkout con los ids creados (una reserva por línea del carrito)
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub rental_ids: Vec<i64>,
}

/// Reserva con datos del vehículo para el listado del usuario
#[derive(Debug, Serialize, FromRow)]
pub struct RentalSummary {
    pub rental_id: i64,
    pub vehicle_id: i64,
    pub brand: String,
    pub model: String,
    pub registration_no: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub total_amount: i64,
    pub payment_method: String,
    pub status: RentalStatus,
}

/// Fila del listado de órdenes del admin: reserva + cliente + vehículo
#[derive(Debug, Serialize, FromRow)]
pub struct AdminOrderRow {
    pub rental_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub email: String,
    pub vehicle_id: i64,
    pub brand: String,
    pub model: String,
    pub registration_no: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub total_amount: i64,
    pub status: RentalStatus,
}

/// Filtros para el listado de órdenes del admin
#[derive(Debug, Default, Deserialize)]
pub struct OrderFilters {
    pub status: Option<RentalStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
