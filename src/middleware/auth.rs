//! Extracción de la sesión desde el header Authorization
//!
//! Los handlers reciben `CurrentUser` (cualquier sesión válida) o
//! `AdminUser` (solo staff). El token es un UUID opaco emitido en el login.

use crate::models::user::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

/// Usuario autenticado extraído de la sesión
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: Uuid,
    pub user_id: i64,
    pub name: String,
    pub role: UserRole,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized("Missing Authorization header".to_string())
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Expected a Bearer token".to_string()))?;
        let token = Uuid::parse_str(token)
            .map_err(|_| AppError::Unauthorized("Invalid session token".to_string()))?;

        let session = state
            .get_session(&token)
            .await
            .ok_or_else(|| AppError::Unauthorized("Unknown or expired session".to_string()))?;

        if session.is_expired() {
            state.remove_session(&token).await;
            return Err(AppError::Unauthorized(
                "Unknown or expired session".to_string(),
            ));
        }

        Ok(CurrentUser {
            token,
            user_id: session.user_id,
            name: session.name,
            role: session.role,
        })
    }
}

/// Usuario autenticado con rol admin
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Admin {
            return Err(AppError::Forbidden(
                "This action requires an admin account".to_string(),
            ));
        }
        Ok(AdminUser(user))
    }
}
