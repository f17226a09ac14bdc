//! DTOs de cambios de llantas y de sus líneas de costo

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::blob::{BlobMerge, BlobRef};
use crate::models::{Cost, TireChange, WarrantyUnit};
use crate::services::cost_calculator;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{validate_non_negative_amount, validate_tire_positions};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TireChangeRequest {
    pub vehicle_id: i64,
    pub change_date: NaiveDate,
    #[serde(default)]
    pub odometer_km: u32,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    #[validate(custom = "validate_tire_positions")]
    pub changed_tires: Vec<u8>,
    #[serde(default)]
    pub tire_brand: String,
    #[serde(default)]
    pub tire_model: String,
    #[serde(default)]
    pub tire_serial_numbers: String,
    #[serde(default)]
    pub recommended_life_km: u32,
    #[serde(default)]
    pub next_change_km: u32,
    #[serde(default)]
    #[validate(range(max = 36500))]
    pub warranty_duration: u32,
    #[serde(default)]
    pub warranty_unit: WarrantyUnit,
    #[serde(default)]
    pub notes: String,
    /// Fotos recién capturadas: al editar se agregan a las existentes
    #[serde(default)]
    pub photos: Vec<BlobRef>,
}

impl TireChangeRequest {
    /// Los costos embebidos se conservan al editar; se administran aparte
    pub fn into_record(self, existing: Option<&TireChange>) -> AppResult<TireChange> {
        self.validate()?;
        let photos = match existing {
            Some(stored) => BlobMerge::Append.apply(&stored.photos, self.photos),
            None => self.photos,
        };

        let mut changed_tires: Vec<u8> = Vec::with_capacity(self.changed_tires.len());
        for position in self.changed_tires {
            if !changed_tires.contains(&position) {
                changed_tires.push(position);
            }
        }

        Ok(TireChange {
            id: existing.map(|t| t.id.clone()).unwrap_or_default(),
            vehicle_id: self.vehicle_id,
            change_date: self.change_date,
            odometer_km: self.odometer_km,
            provider: self.provider,
            changed_tires,
            tire_brand: self.tire_brand,
            tire_model: self.tire_model,
            tire_serial_numbers: self.tire_serial_numbers,
            recommended_life_km: self.recommended_life_km,
            next_change_km: self.next_change_km,
            photos,
            notes: self.notes,
            costs: existing.map(|t| t.costs.clone()).unwrap_or_default(),
            warranty_duration: self.warranty_duration,
            warranty_unit: self.warranty_unit,
        })
    }
}

/// Línea de costo capturada; subtotal/IVA/total se derivan al guardar
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CostRequest {
    #[validate(custom = "validate_non_negative_amount")]
    pub unit_price: Decimal,
    #[validate(range(min = 0))]
    pub quantity: i64,
    #[serde(default)]
    pub includes_tax: bool,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub notes: String,
}

impl CostRequest {
    /// Construir la línea con su desglose recalculado por completo
    pub fn into_cost(self, id: String) -> AppResult<Cost> {
        self.validate()?;
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| validation_error("quantity", "out of range"))?;
        let breakdown = cost_calculator::calculate(self.unit_price, i64::from(quantity), self.includes_tax)?;
        Ok(Cost {
            id,
            unit_price: self.unit_price,
            quantity,
            includes_tax: self.includes_tax,
            subtotal: breakdown.subtotal,
            tax: breakdown.tax,
            total: breakdown.total,
            payment_method: self.payment_method,
            invoice_number: self.invoice_number,
            notes: self.notes,
        })
    }
}
