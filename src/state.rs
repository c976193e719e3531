//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: pool de SQLite, configuración y las
//! sesiones en memoria con su carrito.

use crate::config::environment::EnvironmentConfig;
use crate::models::cart::CartLine;
use crate::models::user::{User, UserRole};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Sesión de un usuario logueado: identidad más el carrito efímero.
/// El carrito nunca se persiste; muere con la sesión.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: i64,
    pub name: String,
    pub role: UserRole,
    pub cart: Vec<CartLine>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: &User, ttl_hours: i64) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name.clone(),
            role: user.role,
            cart: Vec::new(),
            expires_at: Utc::now() + Duration::hours(ttl_hours),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: EnvironmentConfig,
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: EnvironmentConfig) -> Self {
        Self {
            pool,
            config,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Crear una sesión nueva para un usuario autenticado
    pub async fn create_session(&self, user: &User) -> Uuid {
        let token = Uuid::new_v4();
        let session = Session::new(user, self.config.session_ttl_hours);
        self.sessions.write().await.insert(token, session);
        token
    }

    /// Obtener una copia de la sesión asociada al token
    pub async fn get_session(&self, token: &Uuid) -> Option<Session> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Eliminar una sesión (logout o expiración)
    pub async fn remove_session(&self, token: &Uuid) {
        self.sessions.write().await.remove(token);
    }

    /// Limpiar sesiones expiradas
    pub async fn cleanup_expired_sessions(&self) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.is_expired());
    }
}
