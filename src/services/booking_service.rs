//! Motor de reservas
//!
//! Convierte el carrito de una sesión más una ventana de fechas en filas de
//! reserva comprometidas, o rechaza el lote completo. La verificación de
//! conflictos y los inserts corren en UNA transacción sobre el único writer
//! de SQLite, así dos checkouts concurrentes sobre el mismo vehículo nunca
//! pueden tener éxito los dos.

use crate::models::cart::CartLine;
use crate::models::rental::CheckoutRequest;
use crate::utils::errors::{validation_error, AppError};
use chrono::{Duration, Local, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

pub struct BookingService {
    pool: SqlitePool,
}

impl BookingService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Checkout de todo el carrito: una reserva por línea, todas con la misma
    /// ventana [start_date, end_date), precio congelado a la tarifa actual,
    /// estado inicial `pending` y pago contra entrega.
    ///
    /// Todo o nada: si cualquier línea falla (vehículo inexistente o ventana
    /// en conflicto) no se inserta ninguna fila. Los chequeos van en orden de
    /// carrito y se reporta el primer vehículo bloqueante.
    pub async fn checkout(
        &self,
        user_id: i64,
        cart: &[CartLine],
        request: &CheckoutRequest,
    ) -> Result<Vec<i64>, AppError> {
        if cart.is_empty() {
            return Err(AppError::EmptyCart);
        }
        request.validate()?;

        if cart.iter().any(|line| line.days < 1) {
            return Err(validation_error("days", "day count must be at least 1"));
        }

        let total_days: i64 = cart.iter().map(|line| line.days).sum();
        validate_window(
            Local::now().date_naive(),
            request.start_date,
            request.end_date,
            total_days,
        )?;

        let mut tx = self.pool.begin().await?;
        let mut rental_ids = Vec::with_capacity(cart.len());

        for line in cart {
            // La tarifa se lee dentro de la transacción: el precio queda
            // congelado en total_amount aunque la tarifa cambie después
            let daily_rate: Option<i64> =
                sqlx::query_scalar("SELECT daily_rate FROM vehicles WHERE vehicle_id = ?")
                    .bind(line.vehicle_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            let daily_rate = daily_rate.ok_or(AppError::VehicleUnavailable(line.vehicle_id))?;

            // Solape semiabierto: ventanas que solo se tocan en un extremo
            // no cuentan como conflicto
            let conflicts: bool = sqlx::query_scalar(
                r#"
                SELECT EXISTS(
                    SELECT 1 FROM rentals
                    WHERE vehicle_id = ?
                      AND status IN ('pending', 'confirmed')
                      AND start_date < ?
                      AND end_date > ?
                )
                "#,
            )
            .bind(line.vehicle_id)
            .bind(request.end_date)
            .bind(request.start_date)
            .fetch_one(&mut *tx)
            .await?;

            if conflicts {
                return Err(AppError::VehicleConflict(line.vehicle_id));
            }

            let rental_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO rentals
                    (user_id, vehicle_id, start_date, end_date, pickup_location,
                     dropoff_location, total_amount, payment_method, status, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, 'cod', 'pending', ?)
                RETURNING rental_id
                "#,
            )
            .bind(user_id)
            .bind(line.vehicle_id)
            .bind(request.start_date)
            .bind(request.end_date)
            .bind(&request.pickup_location)
            .bind(&request.dropoff_location)
            .bind(daily_rate * line.days)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

            rental_ids.push(rental_id);
        }

        tx.commit().await?;

        info!(
            "📝 Checkout de usuario {}: {} reservas creadas ({} -> {})",
            user_id,
            rental_ids.len(),
            request.start_date,
            request.end_date
        );
        Ok(rental_ids)
    }
}

/// Valida la ventana de fechas del checkout: el inicio no puede estar en el
/// pasado y el fin debe ser exactamente inicio + total de días del carrito.
fn validate_window(
    today: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
    total_days: i64,
) -> Result<(), AppError> {
    if start < today {
        return Err(AppError::InvalidDateRange(
            "pickup date cannot be in the past".to_string(),
        ));
    }
    if end <= start {
        return Err(AppError::InvalidDateRange(
            "return date must be after the pickup date".to_string(),
        ));
    }
    if end != start + Duration::days(total_days) {
        return Err(AppError::InvalidDateRange(
            "return date must equal the pickup date plus the total rental days".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_matching_total_days_is_accepted() {
        let today = date(2025, 6, 1);
        assert!(validate_window(today, date(2025, 6, 1), date(2025, 6, 4), 3).is_ok());
    }

    #[test]
    fn window_in_the_past_is_rejected() {
        let today = date(2025, 6, 1);
        let result = validate_window(today, date(2025, 5, 31), date(2025, 6, 3), 3);
        assert!(matches!(result, Err(AppError::InvalidDateRange(_))));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let today = date(2025, 6, 1);
        let result = validate_window(today, date(2025, 6, 4), date(2025, 6, 4), 0);
        assert!(matches!(result, Err(AppError::InvalidDateRange(_))));
    }

    #[test]
    fn end_not_matching_total_days_is_rejected() {
        // 3 días en el carrito pero el cliente mandó start + 2
        let today = date(2025, 6, 1);
        let result = validate_window(today, date(2025, 6, 1), date(2025, 6, 3), 3);
        assert!(matches!(result, Err(AppError::InvalidDateRange(_))));
    }
}
