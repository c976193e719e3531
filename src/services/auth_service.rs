//! Servicio de autenticación
//!
//! Registro y login de usuarios. El hash de contraseñas es bcrypt; las
//! sesiones con su carrito viven en `AppState`, no acá.

use crate::models::user::{LoginRequest, RegisterRequest, User};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

pub struct AuthService {
    repository: UserRepository,
}

impl AuthService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AppError> {
        request.validate()?;

        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "Email is already registered".to_string(),
            ));
        }
        if self.repository.national_id_exists(&request.national_id).await? {
            return Err(AppError::Conflict(
                "National id is already registered".to_string(),
            ));
        }

        let password_hash =
            hash(&request.password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .repository
            .create(
                &request.name,
                &request.email,
                &password_hash,
                &request.phone,
                &request.address,
                &request.national_id,
                &request.license_no,
            )
            .await?;

        info!("👤 Usuario registrado: {} ({})", user.name, user.email);
        Ok(user)
    }

    /// Verifica credenciales y que la cuenta no esté bloqueada. El mismo
    /// mensaje para email desconocido y contraseña incorrecta.
    pub async fn login(&self, request: &LoginRequest) -> Result<User, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        if user.is_locked {
            return Err(AppError::Forbidden("This account is locked".to_string()));
        }

        info!("🔑 Login de {} ({})", user.name, user.email);
        Ok(user)
    }
}
