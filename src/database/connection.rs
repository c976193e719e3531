//! Configuración de conexión a SQLite
//!
//! Este módulo maneja la conexión a la base de datos SQLite, la creación
//! del schema al arranque y los datos semilla.
//!
//! El pool se limita a UNA conexión: el único writer de SQLite serializa
//! la secuencia chequeo-de-conflictos + insert del checkout y las
//! transiciones read-modify-write del ciclo de vida.

use anyhow::Result;
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(database_url: Option<&str>) -> Result<SqlitePool> {
    let database_url = match database_url {
        Some(url) => url.to_string(),
        None => std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://rental_system.db".to_string()),
    };

    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Crear las tablas si no existen
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT,
            phone TEXT,
            national_id TEXT UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            license_no TEXT,
            is_locked INTEGER NOT NULL DEFAULT 0,
            role TEXT NOT NULL DEFAULT 'member',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            vehicle_id INTEGER PRIMARY KEY AUTOINCREMENT,
            registration_no TEXT NOT NULL UNIQUE,
            brand TEXT NOT NULL,
            model TEXT NOT NULL,
            vehicle_type TEXT NOT NULL,
            year INTEGER NOT NULL,
            daily_rate INTEGER NOT NULL CHECK (daily_rate >= 0),
            seats INTEGER NOT NULL,
            description TEXT,
            image_path TEXT NOT NULL DEFAULT 'default.jpg',
            status TEXT NOT NULL DEFAULT 'available',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rentals (
            rental_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(user_id),
            vehicle_id INTEGER NOT NULL REFERENCES vehicles(vehicle_id),
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            pickup_location TEXT NOT NULL,
            dropoff_location TEXT NOT NULL,
            total_amount INTEGER NOT NULL,
            payment_method TEXT NOT NULL DEFAULT 'cod',
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insertar datos semilla: vehículos de ejemplo y la cuenta de admin,
/// solo cuando las tablas están vacías
pub async fn seed_data(pool: &SqlitePool) -> Result<()> {
    let vehicle_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
        .fetch_one(pool)
        .await?;

    if vehicle_count == 0 {
        let samples = [
            ("51H-12345", "Toyota", "Vios", "Car", 2022, 800_000_i64, 5, "Sedán de 5 asientos, bajo consumo"),
            ("29A-67890", "Honda", "Wave Alpha", "Motorcycle", 2023, 150_000, 2, "Moto popular y confiable"),
            ("30E-55555", "Toyota", "Hiace", "Van", 2021, 1_500_000, 16, "Van de 16 asientos para grupos"),
        ];
        for (reg, brand, model, vtype, year, rate, seats, description) in samples {
            sqlx::query(
                r#"
                INSERT INTO vehicles
                    (registration_no, brand, model, vehicle_type, year, daily_rate, seats, description, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(reg)
            .bind(brand)
            .bind(model)
            .bind(vtype)
            .bind(year)
            .bind(rate)
            .bind(seats)
            .bind(description)
            .bind(Utc::now())
            .execute(pool)
            .await?;
        }
        info!("🌱 Vehículos de ejemplo insertados");
    }

    let admin_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE role = 'admin')")
            .fetch_one(pool)
            .await?;

    if !admin_exists {
        let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
        let password_hash = hash(password, DEFAULT_COST)?;
        sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, role, created_at)
            VALUES ('Admin', 'admin@gmail.com', ?, 'admin', ?)
            "#,
        )
        .bind(password_hash)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        info!("🌱 Cuenta de admin creada (admin@gmail.com)");
    }

    Ok(())
}
