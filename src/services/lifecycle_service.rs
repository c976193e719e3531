//! Ciclo de vida de las reservas
//!
//! Máquina de estados por reserva, siempre hacia adelante:
//!
//! ```text
//! pending --approve--> confirmed --return--> completed
//! pending --reject---> rejected
//! pending --cancel---> cancelled
//! ```
//!
//! Las transiciones que además tocan el estado del vehículo (approve marca
//! `rented`, mark_returned devuelve `available`) corren en la misma
//! transacción que el cambio de estado de la reserva: el par
//! (reserva.status, vehículo.status) nunca se observa a medio actualizar.

use crate::models::rental::RentalStatus;
use crate::utils::errors::AppError;
use sqlx::SqlitePool;
use tracing::info;

pub struct LifecycleService {
    pool: SqlitePool,
}

impl LifecycleService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// pending -> confirmed; el vehículo pasa a `rented` en la misma transacción
    pub async fn approve(&self, rental_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let (vehicle_id, status) = load_rental(&mut tx, rental_id).await?;
        require_status(rental_id, status, RentalStatus::Pending, "approved")?;

        sqlx::query("UPDATE rentals SET status = 'confirmed' WHERE rental_id = ? AND status = 'pending'")
            .bind(rental_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE vehicles SET status = 'rented' WHERE vehicle_id = ?")
            .bind(vehicle_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("✅ Reserva {} aprobada, vehículo {} marcado rented", rental_id, vehicle_id);
        Ok(())
    }

    /// pending -> rejected; el vehículo no se toca (nunca se marcó rented)
    pub async fn reject(&self, rental_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let (_, status) = load_rental(&mut tx, rental_id).await?;
        require_status(rental_id, status, RentalStatus::Pending, "rejected")?;

        sqlx::query("UPDATE rentals SET status = 'rejected' WHERE rental_id = ? AND status = 'pending'")
            .bind(rental_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("❌ Reserva {} rechazada", rental_id);
        Ok(())
    }

    /// pending -> cancelled; solo el dueño de la reserva puede cancelar.
    /// La búsqueda va acotada al usuario: una reserva ajena se reporta como
    /// inexistente, no como prohibida.
    pub async fn cancel(&self, rental_id: i64, requesting_user_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let status: Option<RentalStatus> =
            sqlx::query_scalar("SELECT status FROM rentals WHERE rental_id = ? AND user_id = ?")
                .bind(rental_id)
                .bind(requesting_user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let status = status
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", rental_id)))?;

        if status != RentalStatus::Pending {
            return Err(AppError::InvalidTransition(
                "only pending bookings can be cancelled".to_string(),
            ));
        }

        sqlx::query("UPDATE rentals SET status = 'cancelled' WHERE rental_id = ? AND status = 'pending'")
            .bind(rental_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("🚫 Reserva {} cancelada por el usuario {}", rental_id, requesting_user_id);
        Ok(())
    }

    /// confirmed -> completed; el vehículo vuelve a `available` en la misma
    /// transacción
    pub async fn mark_returned(&self, rental_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let (vehicle_id, status) = load_rental(&mut tx, rental_id).await?;
        require_status(rental_id, status, RentalStatus::Confirmed, "marked as returned")?;

        sqlx::query("UPDATE rentals SET status = 'completed' WHERE rental_id = ? AND status = 'confirmed'")
            .bind(rental_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE vehicles SET status = 'available' WHERE vehicle_id = ?")
            .bind(vehicle_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("🔁 Reserva {} completada, vehículo {} disponible de nuevo", rental_id, vehicle_id);
        Ok(())
    }
}

async fn load_rental(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    rental_id: i64,
) -> Result<(i64, RentalStatus), AppError> {
    let rental: Option<(i64, RentalStatus)> =
        sqlx::query_as("SELECT vehicle_id, status FROM rentals WHERE rental_id = ?")
            .bind(rental_id)
            .fetch_optional(&mut **tx)
            .await?;

    rental.ok_or_else(|| AppError::NotFound(format!("Rental {} not found", rental_id)))
}

fn require_status(
    rental_id: i64,
    actual: RentalStatus,
    expected: RentalStatus,
    action: &str,
) -> Result<(), AppError> {
    if actual != expected {
        return Err(AppError::InvalidTransition(format!(
            "rental {} is {}, only {} rentals can be {}",
            rental_id, actual, expected, action
        )));
    }
    Ok(())
}
