//! DTO de captura de mantenimientos programados

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::{RecordStatus, ScheduledMaintenance};
use crate::utils::errors::AppResult;
use crate::utils::validation::{normalize_link, validate_non_negative_amount};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MaintenanceRequest {
    pub vehicle_id: i64,
    pub responsible_id: i64,
    #[serde(default)]
    pub scheduled_odometer_km: u32,
    pub due_date: NaiveDate,
    #[serde(default)]
    #[validate(custom = "validate_non_negative_amount")]
    pub approximate_cost: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub omission_consequence: String,
    #[serde(default)]
    pub repair_id: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl MaintenanceRequest {
    pub fn into_record(self, existing: Option<&ScheduledMaintenance>) -> AppResult<ScheduledMaintenance> {
        self.validate()?;
        Ok(ScheduledMaintenance {
            id: existing.map(|m| m.id.clone()).unwrap_or_default(),
            vehicle_id: self.vehicle_id,
            responsible_id: self.responsible_id,
            scheduled_odometer_km: self.scheduled_odometer_km,
            due_date: self.due_date,
            approximate_cost: self.approximate_cost,
            description: self.description,
            omission_consequence: self.omission_consequence,
            repair_id: normalize_link(self.repair_id),
            status: self.status,
        })
    }
}
