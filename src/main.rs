use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use rental_booking::api;
use rental_booking::config::environment::EnvironmentConfig;
use rental_booking::database;
use rental_booking::middleware::cors::cors_middleware;
use rental_booking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Rental Booking - Sistema de alquiler de vehículos");
    info!("====================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = database::create_pool(Some(&config.database_url)).await?;
    database::init_schema(&pool).await?;
    database::seed_data(&pool).await?;
    info!("✅ Base de datos lista");

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api::create_api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/register - Registrar miembro");
    info!("   POST /api/auth/login - Login (devuelve token de sesión)");
    info!("   POST /api/auth/logout - Cerrar sesión");
    info!("🚗 Catálogo:");
    info!("   GET  /api/vehicles - Listar/buscar vehículos");
    info!("   GET  /api/vehicles/:id - Detalle de vehículo");
    info!("   POST /api/vehicles - Crear vehículo (admin)");
    info!("   PUT  /api/vehicles/:id/status - Bloqueo manual (admin)");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo (admin)");
    info!("🛒 Carrito:");
    info!("   GET  /api/cart - Ver carrito");
    info!("   POST /api/cart/add - Agregar línea");
    info!("   PUT  /api/cart/:index - Cambiar días");
    info!("   DELETE /api/cart/:index - Quitar línea");
    info!("📝 Reservas:");
    info!("   POST /api/bookings/checkout - Checkout del carrito");
    info!("   GET  /api/bookings - Mis reservas");
    info!("   POST /api/bookings/:id/cancel - Cancelar (solo pending)");
    info!("🛠  Staff:");
    info!("   GET  /api/admin/orders - Órdenes (filtro por estado)");
    info!("   POST /api/admin/orders/:id/approve - Aprobar");
    info!("   POST /api/admin/orders/:id/reject - Rechazar");
    info!("   POST /api/admin/orders/:id/return - Marcar devuelto");
    info!("   GET  /api/admin/users - Miembros");
    info!("   POST /api/admin/users/:id/toggle-lock - Bloquear/desbloquear");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "rental-booking",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
