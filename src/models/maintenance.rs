//! Modelo de ScheduledMaintenance

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::{deserialize_link, RecordStatus};

/// Mantenimiento programado - persistido en la colección `mantenimientos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledMaintenance {
    pub id: String,
    #[serde(rename = "vehiculoId")]
    pub vehicle_id: i64,
    #[serde(rename = "responsableId")]
    pub responsible_id: i64,
    #[serde(rename = "kilometrajeProgramado", default)]
    pub scheduled_odometer_km: u32,
    #[serde(rename = "fechaAproximada")]
    pub due_date: NaiveDate,
    #[serde(rename = "costoAproximado", default)]
    pub approximate_cost: Decimal,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "consecuenciaOmision", default)]
    pub omission_consequence: String,
    /// Espejo de `Repair::maintenance_id`
    #[serde(
        rename = "reparacionId",
        default,
        deserialize_with = "deserialize_link",
        skip_serializing_if = "Option::is_none"
    )]
    pub repair_id: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: RecordStatus,
}
