//! Backend de reservas de alquiler de vehículos
//!
//! Catálogo de vehículos, carrito por sesión, checkout con detección de
//! conflictos de fechas y ciclo de vida de reservas con aprobación por staff.

pub mod api;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;
