//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Vehicle {0} is already booked for the requested dates")]
    VehicleConflict(i64),

    #[error("Vehicle {0} is no longer available")]
    VehicleUnavailable(i64),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code: Some("VALIDATION_ERROR".to_string()),
                },
            ),

            AppError::InvalidDateRange(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid Date Range".to_string(),
                    message: msg,
                    details: None,
                    code: Some("INVALID_DATE_RANGE".to_string()),
                },
            ),

            AppError::EmptyCart => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Empty Cart".to_string(),
                    message: "The cart has no items to check out".to_string(),
                    details: None,
                    code: Some("EMPTY_CART".to_string()),
                },
            ),

            AppError::VehicleConflict(vehicle_id) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Vehicle Conflict".to_string(),
                    message: format!(
                        "Vehicle {} is already booked for the requested dates",
                        vehicle_id
                    ),
                    details: Some(json!({ "vehicle_id": vehicle_id })),
                    code: Some("VEHICLE_CONFLICT".to_string()),
                },
            ),

            AppError::VehicleUnavailable(vehicle_id) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Vehicle Unavailable".to_string(),
                    message: format!("Vehicle {} is no longer available", vehicle_id),
                    details: Some(json!({ "vehicle_id": vehicle_id })),
                    code: Some("VEHICLE_UNAVAILABLE".to_string()),
                },
            ),

            AppError::InvalidTransition(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Invalid Transition".to_string(),
                    message: msg,
                    details: None,
                    code: Some("INVALID_TRANSITION".to_string()),
                },
            ),

            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: msg,
                    details: None,
                    code: Some("UNAUTHORIZED".to_string()),
                },
            ),

            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    error: "Forbidden".to_string(),
                    message: msg,
                    details: None,
                    code: Some("FORBIDDEN".to_string()),
                },
            ),

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: Some("NOT_FOUND".to_string()),
                },
            ),

            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message: msg,
                    details: None,
                    code: Some("CONFLICT".to_string()),
                },
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code: Some("BAD_REQUEST".to_string()),
                },
            ),

            AppError::Hash(msg) => {
                tracing::error!("Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Hash Error".to_string(),
                        message: "An error occurred while processing credentials".to_string(),
                        details: None,
                        code: Some("HASH_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}
