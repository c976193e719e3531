//! Modelo del carrito
//!
//! El carrito vive solo en la sesión (nunca se persiste): una lista de
//! (vehículo, días) que se descarta al hacer checkout o al quitar líneas.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Línea del carrito: selección efímera de un vehículo por N días
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub vehicle_id: i64,
    pub days: i64,
}

/// Request para agregar una línea al carrito
#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartRequest {
    pub vehicle_id: i64,

    #[validate(range(min = 1, max = 365))]
    pub days: i64,
}

/// Request para cambiar los días de una línea existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartLineRequest {
    #[validate(range(min = 1, max = 365))]
    pub days: i64,
}

/// Línea del carrito enriquecida con datos del vehículo
#[derive(Debug, Serialize)]
pub struct CartItemView {
    pub vehicle_id: i64,
    pub brand: String,
    pub model: String,
    pub daily_rate: i64,
    pub days: i64,
    pub subtotal: i64,
}

/// Vista completa del carrito con totales
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_amount: i64,
    pub total_days: i64,
}
