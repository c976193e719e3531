//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente al schema SQLite con primary key 'vehicle_id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use validator::Validate;

/// Estado del vehículo - campo cacheado, mantenido por el ciclo de vida
/// de las reservas y por el toggle manual del staff
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Rented,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub vehicle_id: i64,
    pub registration_no: String,
    pub brand: String,
    pub model: String,
    pub vehicle_type: String,
    pub year: i64,
    /// Tarifa diaria en VND (enteros, sin decimales)
    pub daily_rate: i64,
    pub seats: i64,
    pub description: Option<String>,
    pub image_path: String,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

/// Request para crear un nuevo vehículo (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 4, max = 20))]
    pub registration_no: String,

    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(length(min = 2, max = 50))]
    pub vehicle_type: String,

    #[validate(range(min = 1950, max = 2030))]
    pub year: i64,

    #[validate(range(min = 0))]
    pub daily_rate: i64,

    #[validate(range(min = 1, max = 64))]
    pub seats: i64,

    pub description: Option<String>,
    pub image_path: Option<String>,
}

/// Request para el toggle manual de estado (bloqueo por mantenimiento).
/// Escribe directo sobre vehicles.status, fuera del ciclo de vida de reservas.
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleStatusRequest {
    pub status: VehicleStatus,
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    /// Texto a buscar en marca, modelo o tipo
    pub q: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
