//! Acceso a datos de usuarios

use crate::models::user::{User, UserFilters, UserRole};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        phone: &str,
        address: &str,
        national_id: &str,
        license_no: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users
                (name, email, password_hash, phone, address, national_id, license_no, is_locked, role, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, 0, 'member', ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(phone)
        .bind(address)
        .bind(national_id)
        .bind(license_no)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn national_id_exists(&self, national_id: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE national_id = ?)")
                .bind(national_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Listado paginado de miembros (los admins no se listan)
    pub async fn search_members(&self, filters: &UserFilters) -> Result<(Vec<User>, i64), AppError> {
        let (_, per_page, offset) = super::page_window(filters.page, filters.per_page);
        let like = filters
            .q
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(|q| format!("%{}%", q.trim()));

        let (total, users) = match &like {
            Some(like) => {
                let total: (i64,) = sqlx::query_as(
                    "SELECT COUNT(*) FROM users WHERE role = 'member' AND (name LIKE ? OR email LIKE ? OR national_id LIKE ?)",
                )
                .bind(like)
                .bind(like)
                .bind(like)
                .fetch_one(&self.pool)
                .await?;

                let users = sqlx::query_as::<_, User>(
                    r#"
                    SELECT * FROM users
                    WHERE role = 'member' AND (name LIKE ? OR email LIKE ? OR national_id LIKE ?)
                    ORDER BY user_id LIMIT ? OFFSET ?
                    "#,
                )
                .bind(like)
                .bind(like)
                .bind(like)
                .bind(per_page)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (total.0, users)
            }
            None => {
                let total: (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'member'")
                        .fetch_one(&self.pool)
                        .await?;

                let users = sqlx::query_as::<_, User>(
                    "SELECT * FROM users WHERE role = 'member' ORDER BY user_id LIMIT ? OFFSET ?",
                )
                .bind(per_page)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (total.0, users)
            }
        };

        Ok((users, total))
    }

    pub async fn set_locked(&self, user_id: i64, locked: bool) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET is_locked = ? WHERE user_id = ? AND role = ? RETURNING *",
        )
        .bind(locked)
        .bind(user_id)
        .bind(UserRole::Member)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        Ok(user)
    }
}
