//! Modelo de TireChange y sus costos embebidos
//!
//! Un `Cost` vive siempre dentro de exactamente un `TireChange` y no
//! tiene ciclo de vida propio.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::blob::BlobRef;
use super::common::WarrantyUnit;

pub const MIN_TIRE_POSITION: u8 = 1;
pub const MAX_TIRE_POSITION: u8 = 8;

/// Cambio de llantas - persistido en la colección `tireChanges`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TireChange {
    pub id: String,
    pub vehicle_id: i64,
    pub change_date: NaiveDate,
    #[serde(rename = "mileage", default)]
    pub odometer_km: u32,
    #[serde(default)]
    pub provider: String,
    /// Posiciones cambiadas (1-8)
    #[serde(default)]
    pub changed_tires: Vec<u8>,
    #[serde(default)]
    pub tire_brand: String,
    #[serde(default)]
    pub tire_model: String,
    #[serde(default)]
    pub tire_serial_numbers: String,
    #[serde(default)]
    pub recommended_life_km: u32,
    #[serde(rename = "nextChangeRecommendation", default)]
    pub next_change_km: u32,
    #[serde(default)]
    pub photos: Vec<BlobRef>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub costs: Vec<Cost>,
    #[serde(rename = "warrantyTime", default)]
    pub warranty_duration: u32,
    #[serde(default)]
    pub warranty_unit: WarrantyUnit,
}

impl TireChange {
    /// Suma de los totales de los costos; `None` si desborda
    pub fn costs_total(&self) -> Option<Decimal> {
        self.costs
            .iter()
            .try_fold(Decimal::ZERO, |acc, c| acc.checked_add(c.total))
    }
}

/// Línea de costo de un cambio de llantas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cost {
    pub id: String,
    #[serde(rename = "unitCost")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(rename = "includesVAT", default)]
    pub includes_tax: bool,
    pub subtotal: Decimal,
    #[serde(rename = "vat")]
    pub tax: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub notes: String,
}
