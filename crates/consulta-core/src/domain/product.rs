//! Product read projection.

use serde::{Deserialize, Serialize};

/// A product joined with its inventory row.
///
/// Field names on the wire keep the relational column names, so payloads
/// written to the cache and returned over HTTP are interchangeable.
/// Inventory quantities are `None` when the product has no inventory row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    /// Product identifier.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Free-form description.
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    /// Unit price.
    #[serde(rename = "precio")]
    pub price: f64,
    /// Units in stock.
    pub stock: i32,
    /// Category as stored (case preserved).
    #[serde(rename = "categoria")]
    pub category: String,
    /// Units available in inventory.
    #[serde(rename = "cantidad_disponible")]
    pub available_quantity: Option<i32>,
    /// Units reserved in inventory.
    #[serde(rename = "cantidad_reservada")]
    pub reserved_quantity: Option<i32>,
}
