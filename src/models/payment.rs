//! Modelo de VehicularPayment
//!
//! Pagos recurrentes asociados a un vehículo: pólizas, verificación,
//! tenencia, cambio de placas y permisos.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::blob::BlobRef;

/// Tipo de pago vehicular
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentCategory {
    #[serde(rename = "Polizas Seguro")]
    InsurancePolicy,
    #[serde(rename = "Verificacion")]
    Verification,
    #[serde(rename = "Tenencia/Control Vehicular")]
    RegistrationTax,
    #[serde(rename = "Cambio de Placas")]
    PlateChange,
    #[serde(rename = "Permiso")]
    Permit,
}

impl PaymentCategory {
    pub const ALL: [PaymentCategory; 5] = [
        PaymentCategory::InsurancePolicy,
        PaymentCategory::Verification,
        PaymentCategory::RegistrationTax,
        PaymentCategory::PlateChange,
        PaymentCategory::Permit,
    ];
}

impl std::fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentCategory::InsurancePolicy => "Polizas Seguro",
            PaymentCategory::Verification => "Verificacion",
            PaymentCategory::RegistrationTax => "Tenencia/Control Vehicular",
            PaymentCategory::PlateChange => "Cambio de Placas",
            PaymentCategory::Permit => "Permiso",
        };
        f.write_str(label)
    }
}

/// Pago vehicular - persistido en la colección `pagosVehiculares`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicularPayment {
    pub id: String,
    #[serde(rename = "vehiculoId")]
    pub vehicle_id: i64,
    #[serde(rename = "tipoPago")]
    pub category: PaymentCategory,
    #[serde(rename = "tipoPermiso", default, skip_serializing_if = "Option::is_none")]
    pub permit_subtype: Option<String>,
    #[serde(rename = "numeroDocumento", default)]
    pub document_number: String,
    #[serde(rename = "fechaEmision")]
    pub issued_on: NaiveDate,
    #[serde(rename = "fechaLimitePago")]
    pub next_due_on: NaiveDate,
    #[serde(rename = "montoPagado")]
    pub amount_paid: Decimal,
    #[serde(rename = "formaPago", default)]
    pub payment_method: String,
    #[serde(rename = "documento", default)]
    pub documents: Vec<BlobRef>,
    #[serde(rename = "comprobantePago", default)]
    pub receipts: Vec<BlobRef>,
}
