//! DTO de captura de reparaciones

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::blob::{BlobMerge, BlobRef};
use crate::models::{RecordStatus, Repair, WarrantyUnit};
use crate::utils::errors::AppResult;
use crate::utils::validation::{
    normalize_link, validate_non_negative_amount, validate_repair_categories,
};

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_workshop_dates"))]
pub struct RepairRequest {
    pub vehicle_id: i64,
    pub responsible_id: i64,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    #[serde(default)]
    pub odometer_km: u32,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub provider: String,
    #[serde(default)]
    #[validate(custom = "validate_repair_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(range(max = 36500))]
    pub warranty_duration: u32,
    #[serde(default)]
    pub warranty_unit: WarrantyUnit,
    #[serde(default)]
    pub invoice_id: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_notes: String,
    #[validate(custom = "validate_non_negative_amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub includes_tax: bool,
    /// Fotos recién capturadas: al editar se agregan a las existentes
    #[serde(default)]
    pub photos: Vec<BlobRef>,
    /// `"none"` o vacío significan sin vínculo
    #[serde(default)]
    pub maintenance_id: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

fn validate_workshop_dates(request: &RepairRequest) -> Result<(), ValidationError> {
    if request.exit_date < request.entry_date {
        return Err(ValidationError::new("exit_before_entry"));
    }
    Ok(())
}

impl RepairRequest {
    pub fn into_record(self, existing: Option<&Repair>) -> AppResult<Repair> {
        self.validate()?;
        let photos = match existing {
            Some(stored) => BlobMerge::Append.apply(&stored.photos, self.photos),
            None => self.photos,
        };

        let mut categories: Vec<String> = Vec::with_capacity(self.categories.len());
        for category in self.categories {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        Ok(Repair {
            id: existing.map(|r| r.id.clone()).unwrap_or_default(),
            vehicle_id: self.vehicle_id,
            responsible_id: self.responsible_id,
            entry_date: self.entry_date,
            exit_date: self.exit_date,
            odometer_km: self.odometer_km,
            provider: self.provider,
            categories,
            description: self.description,
            warranty_duration: self.warranty_duration,
            warranty_unit: self.warranty_unit,
            invoice_id: self.invoice_id,
            payment_method: self.payment_method,
            payment_notes: self.payment_notes,
            amount: self.amount,
            includes_tax: self.includes_tax,
            photos,
            maintenance_id: normalize_link(self.maintenance_id),
            status: self.status,
        })
    }
}
