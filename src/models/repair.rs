//! Modelo de Repair
//!
//! Reparación de un vehículo en taller. Puede estar vinculada a lo sumo a
//! un mantenimiento programado (`maintenance_id`).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::blob::BlobRef;
use super::common::{deserialize_link, RecordStatus, WarrantyUnit};

/// Catálogo de categorías de reparación
pub const REPAIR_CATEGORIES: [&str; 6] = [
    "Carrocería",
    "Parachoques",
    "Autoparte",
    "Sistema Eléctrico",
    "Sistema Mecánico",
    "Sistema de Enfriamiento",
];

/// Repair - persistido en la colección `reparaciones`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repair {
    pub id: String,
    #[serde(rename = "vehiculoId")]
    pub vehicle_id: i64,
    #[serde(rename = "responsableId")]
    pub responsible_id: i64,
    #[serde(rename = "fechaEntrada")]
    pub entry_date: NaiveDate,
    #[serde(rename = "fechaSalida")]
    pub exit_date: NaiveDate,
    #[serde(rename = "kilometraje", default)]
    pub odometer_km: u32,
    #[serde(rename = "proveedor", default)]
    pub provider: String,
    #[serde(rename = "tipoReparacion", default)]
    pub categories: Vec<String>,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "tiempoGarantia", default)]
    pub warranty_duration: u32,
    #[serde(rename = "unidadGarantia", default)]
    pub warranty_unit: WarrantyUnit,
    #[serde(rename = "idFactura", default)]
    pub invoice_id: String,
    #[serde(rename = "formaPago", default)]
    pub payment_method: String,
    #[serde(rename = "notasPago", default)]
    pub payment_notes: String,
    #[serde(rename = "monto")]
    pub amount: Decimal,
    /// El monto ya incluye el IVA fijo del 16 %
    #[serde(rename = "incluyeIVA", default)]
    pub includes_tax: bool,
    #[serde(rename = "fotos", default)]
    pub photos: Vec<BlobRef>,
    #[serde(
        rename = "mantenimientoId",
        default,
        deserialize_with = "deserialize_link",
        skip_serializing_if = "Option::is_none"
    )]
    pub maintenance_id: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: RecordStatus,
}
