//! Modelo de ResponsibleParty
//!
//! Conductor/responsable de un vehículo, con los datos de su licencia
//! federal y de su identificación oficial (INE).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::blob::{deserialize_optional_blob, BlobRef};

/// Responsable - persistido en la colección `responsables`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponsibleParty {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "licenciaFederal")]
    pub federal_license: String,
    #[serde(rename = "fechaEmisionLicencia")]
    pub license_issued_on: NaiveDate,
    #[serde(rename = "fechaVencimientoLicencia")]
    pub license_expires_on: NaiveDate,
    #[serde(
        rename = "imagenLicencia",
        default,
        deserialize_with = "deserialize_optional_blob",
        skip_serializing_if = "Option::is_none"
    )]
    pub license_image: Option<BlobRef>,
    #[serde(rename = "numeroINE")]
    pub id_number: String,
    #[serde(rename = "fechaEmisionINE")]
    pub id_issued_on: NaiveDate,
    #[serde(rename = "fechaVencimientoINE")]
    pub id_expires_on: NaiveDate,
    #[serde(
        rename = "imagenINE",
        default,
        deserialize_with = "deserialize_optional_blob",
        skip_serializing_if = "Option::is_none"
    )]
    pub id_image: Option<BlobRef>,
    #[serde(rename = "numeroSeguridadSocial", default)]
    pub social_security_number: String,
    #[serde(rename = "celularDirecto", default)]
    pub direct_phone: String,
    #[serde(rename = "celularFamiliar", default)]
    pub family_phone: String,
    #[serde(
        rename = "seguro",
        default,
        deserialize_with = "deserialize_optional_blob",
        skip_serializing_if = "Option::is_none"
    )]
    pub insurance_image: Option<BlobRef>,
    /// Vínculo débil a un vehículo; puede apuntar a nada
    #[serde(rename = "vehiculoAsignado", default, skip_serializing_if = "Option::is_none")]
    pub assigned_vehicle: Option<i64>,
}
