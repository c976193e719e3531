//! Modelo de User
//!
//! Miembros y administradores. La contraseña se guarda como hash bcrypt;
//! el campo nunca sale en las responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Rol del usuario
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserRole {
    Member,
    Admin,
}

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub national_id: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub license_no: Option<String>,
    pub is_locked: bool,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Request de registro de un miembro nuevo
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(length(min = 1, max = 200))]
    pub address: String,

    #[validate(custom = "validate_national_id")]
    pub national_id: String,

    #[validate(length(min = 1, max = 50))]
    pub license_no: String,
}

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Response de usuario (sin password_hash)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub national_id: Option<String>,
    pub is_locked: bool,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            national_id: user.national_id,
            is_locked: user.is_locked,
            role: user.role,
        }
    }
}

/// Response de login con el token de sesión opaco
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub user: UserResponse,
}

/// Filtros para el listado de miembros del admin
#[derive(Debug, Default, Deserialize)]
pub struct UserFilters {
    /// Texto a buscar en nombre, email o documento
    pub q: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Teléfono: 10 u 11 dígitos
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if (phone.len() == 10 || phone.len() == 11) && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_must_be_10_or_11_digits"))
    }
}

/// Documento de identidad: exactamente 12 dígitos
fn validate_national_id(national_id: &str) -> Result<(), ValidationError> {
    if national_id.len() == 12 && national_id.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("national_id_must_be_12_digits"))
    }
}
