//! Helpers compartidos por los tests de integración.
//! Todo corre contra SQLite en memoria.

#![allow(dead_code)]

use chrono::{Duration, Local, NaiveDate, Utc};
use rental_booking::database;
use rental_booking::models::cart::CartLine;
use rental_booking::models::rental::CheckoutRequest;
use rental_booking::services::booking_service::BookingService;
use sqlx::SqlitePool;

pub async fn setup_pool() -> SqlitePool {
    let pool = database::create_pool(Some("sqlite::memory:"))
        .await
        .expect("in-memory pool");
    database::init_schema(&pool).await.expect("schema");
    pool
}

pub async fn insert_member(pool: &SqlitePool, name: &str, email: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (name, email, password_hash, role, created_at)
        VALUES (?, ?, 'not-a-real-hash', 'member', ?)
        RETURNING user_id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .expect("insert member")
}

pub async fn insert_vehicle(pool: &SqlitePool, registration_no: &str, daily_rate: i64) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO vehicles
            (registration_no, brand, model, vehicle_type, year, daily_rate, seats, created_at)
        VALUES (?, 'Toyota', 'Vios', 'Car', 2022, ?, 5, ?)
        RETURNING vehicle_id
        "#,
    )
    .bind(registration_no)
    .bind(daily_rate)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .expect("insert vehicle")
}

/// Fecha relativa a hoy (los tests nunca usan fechas absolutas para no
/// caducar)
pub fn day_from_now(offset: i64) -> NaiveDate {
    Local::now().date_naive() + Duration::days(offset)
}

pub fn checkout_request(start_offset: i64, total_days: i64) -> CheckoutRequest {
    CheckoutRequest {
        start_date: day_from_now(start_offset),
        end_date: day_from_now(start_offset + total_days),
        pickup_location: "Airport".to_string(),
        dropoff_location: "Downtown".to_string(),
    }
}

/// Crea una reserva pending por la vía real (checkout de una línea)
pub async fn create_booking(
    pool: &SqlitePool,
    user_id: i64,
    vehicle_id: i64,
    start_offset: i64,
    days: i64,
) -> i64 {
    let service = BookingService::new(pool.clone());
    let cart = vec![CartLine { vehicle_id, days }];
    let ids = service
        .checkout(user_id, &cart, &checkout_request(start_offset, days))
        .await
        .expect("checkout");
    ids[0]
}

pub async fn rental_status(pool: &SqlitePool, rental_id: i64) -> String {
    sqlx::query_scalar("SELECT status FROM rentals WHERE rental_id = ?")
        .bind(rental_id)
        .fetch_one(pool)
        .await
        .expect("rental status")
}

pub async fn vehicle_status(pool: &SqlitePool, vehicle_id: i64) -> String {
    sqlx::query_scalar("SELECT status FROM vehicles WHERE vehicle_id = ?")
        .bind(vehicle_id)
        .fetch_one(pool)
        .await
        .expect("vehicle status")
}

pub async fn rental_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM rentals")
        .fetch_one(pool)
        .await
        .expect("rental count")
}
