//! Acceso a datos de vehículos

use crate::models::vehicle::{CreateVehicleRequest, Vehicle, VehicleFilters, VehicleStatus};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateVehicleRequest) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles
                (registration_no, brand, model, vehicle_type, year, daily_rate, seats, description, image_path, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 'available', ?)
            RETURNING *
            "#,
        )
        .bind(&request.registration_no)
        .bind(&request.brand)
        .bind(&request.model)
        .bind(&request.vehicle_type)
        .bind(request.year)
        .bind(request.daily_rate)
        .bind(request.seats)
        .bind(&request.description)
        .bind(request.image_path.as_deref().unwrap_or("default.jpg"))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, vehicle_id: i64) -> Result<Option<Vehicle>, AppError> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE vehicle_id = ?")
                .bind(vehicle_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(vehicle)
    }

    pub async fn registration_exists(&self, registration_no: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE registration_no = ?)",
        )
        .bind(registration_no)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Búsqueda paginada con texto libre sobre marca, modelo o tipo
    pub async fn search(&self, filters: &VehicleFilters) -> Result<(Vec<Vehicle>, i64), AppError> {
        let (_, per_page, offset) = super::page_window(filters.page, filters.per_page);
        let like = filters
            .q
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(|q| format!("%{}%", q.trim()));

        let (total, vehicles) = match &like {
            Some(like) => {
                let total: (i64,) = sqlx::query_as(
                    "SELECT COUNT(*) FROM vehicles WHERE brand LIKE ? OR model LIKE ? OR vehicle_type LIKE ? OR registration_no LIKE ?",
                )
                .bind(like)
                .bind(like)
                .bind(like)
                .bind(like)
                .fetch_one(&self.pool)
                .await?;

                let vehicles = sqlx::query_as::<_, Vehicle>(
                    r#"
                    SELECT * FROM vehicles
                    WHERE brand LIKE ? OR model LIKE ? OR vehicle_type LIKE ? OR registration_no LIKE ?
                    ORDER BY vehicle_id LIMIT ? OFFSET ?
                    "#,
                )
                .bind(like)
                .bind(like)
                .bind(like)
                .bind(like)
                .bind(per_page)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (total.0, vehicles)
            }
            None => {
                let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
                    .fetch_one(&self.pool)
                    .await?;

                let vehicles = sqlx::query_as::<_, Vehicle>(
                    "SELECT * FROM vehicles ORDER BY vehicle_id LIMIT ? OFFSET ?",
                )
                .bind(per_page)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (total.0, vehicles)
            }
        };

        Ok((vehicles, total))
    }

    /// Escritura directa del estado: toggle manual del staff, independiente
    /// del ciclo de vida de las reservas
    pub async fn set_status(
        &self,
        vehicle_id: i64,
        status: VehicleStatus,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET status = ? WHERE vehicle_id = ? RETURNING *",
        )
        .bind(status)
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", vehicle_id)))?;

        Ok(vehicle)
    }

    pub async fn delete(&self, vehicle_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE vehicle_id = ?")
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Vehicle {} not found",
                vehicle_id
            )));
        }

        Ok(())
    }
}
