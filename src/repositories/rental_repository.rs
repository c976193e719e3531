//! Acceso a datos de reservas (solo lecturas)
//!
//! Las escrituras de reservas pasan por los servicios de booking y ciclo de
//! vida, que las ejecutan dentro de sus propias transacciones.

use crate::models::rental::{AdminOrderRow, OrderFilters, Rental, RentalSummary};
use crate::utils::errors::AppError;
use sqlx::SqlitePool;

pub struct RentalRepository {
    pool: SqlitePool,
}

impl RentalRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, rental_id: i64) -> Result<Option<Rental>, AppError> {
        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE rental_id = ?")
            .bind(rental_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rental)
    }

    /// Reservas del usuario, más recientes primero
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<RentalSummary>, AppError> {
        let rentals = sqlx::query_as::<_, RentalSummary>(
            r#"
            SELECT r.rental_id, r.vehicle_id, v.brand, v.model, v.registration_no,
                   r.start_date, r.end_date, r.pickup_location, r.dropoff_location,
                   r.total_amount, r.payment_method, r.status
            FROM rentals r
            JOIN vehicles v ON r.vehicle_id = v.vehicle_id
            WHERE r.user_id = ?
            ORDER BY r.rental_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }

    /// Listado de órdenes para el staff, con filtro opcional por estado
    pub async fn list_orders(
        &self,
        filters: &OrderFilters,
    ) -> Result<(Vec<AdminOrderRow>, i64), AppError> {
        let (_, per_page, offset) = super::page_window(filters.page, filters.per_page);

        let (total, orders) = match filters.status {
            Some(status) => {
                let total: (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM rentals WHERE status = ?")
                        .bind(status)
                        .fetch_one(&self.pool)
                        .await?;

                let orders = sqlx::query_as::<_, AdminOrderRow>(
                    r#"
                    SELECT r.rental_id, r.user_id, u.name AS user_name, u.email,
                           r.vehicle_id, v.brand, v.model, v.registration_no,
                           r.start_date, r.end_date, r.pickup_location, r.dropoff_location,
                           r.total_amount, r.status
                    FROM rentals r
                    JOIN users u ON r.user_id = u.user_id
                    JOIN vehicles v ON r.vehicle_id = v.vehicle_id
                    WHERE r.status = ?
                    ORDER BY r.rental_id DESC LIMIT ? OFFSET ?
                    "#,
                )
                .bind(status)
                .bind(per_page)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (total.0, orders)
            }
            None => {
                let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rentals")
                    .fetch_one(&self.pool)
                    .await?;

                let orders = sqlx::query_as::<_, AdminOrderRow>(
                    r#"
                    SELECT r.rental_id, r.user_id, u.name AS user_name, u.email,
                           r.vehicle_id, v.brand, v.model, v.registration_no,
                           r.start_date, r.end_date, r.pickup_location, r.dropoff_location,
                           r.total_amount, r.status
                    FROM rentals r
                    JOIN users u ON r.user_id = u.user_id
                    JOIN vehicles v ON r.vehicle_id = v.vehicle_id
                    ORDER BY r.rental_id DESC LIMIT ? OFFSET ?
                    "#,
                )
                .bind(per_page)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (total.0, orders)
            }
        };

        Ok((orders, total))
    }
}
