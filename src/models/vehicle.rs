//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle con sus datos de identificación
//! y las seis secuencias independientes de fotos.

use serde::{Deserialize, Serialize};

use super::blob::{deserialize_optional_blob, BlobRef};

/// Vehicle - persistido en la colección `vehiculos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "ano")]
    pub year: String,
    #[serde(default)]
    pub color: String,
    /// Kilometraje al momento del registro
    #[serde(rename = "kilometraje", default)]
    pub odometer_km: u32,
    #[serde(rename = "niv", default)]
    pub vin: String,
    #[serde(rename = "placas")]
    pub plates: String,
    #[serde(rename = "numeroTarjetaCirculacion", default)]
    pub circulation_card_number: String,
    #[serde(
        rename = "imagenTarjetaCirculacion",
        default,
        deserialize_with = "deserialize_optional_blob",
        skip_serializing_if = "Option::is_none"
    )]
    pub circulation_card_image: Option<BlobRef>,
    #[serde(rename = "numeroPermisoFederal", default)]
    pub federal_permit_number: String,
    #[serde(flatten)]
    pub photos: VehiclePhotos,
}

/// Fotos del vehículo por ángulo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VehiclePhotos {
    #[serde(rename = "fotosFrente", default)]
    pub front: Vec<BlobRef>,
    #[serde(rename = "fotosDetras", default)]
    pub rear: Vec<BlobRef>,
    #[serde(rename = "fotosCostadoIzquierdo", default)]
    pub left_side: Vec<BlobRef>,
    #[serde(rename = "fotosCostadoDerecho", default)]
    pub right_side: Vec<BlobRef>,
    #[serde(rename = "fotosParteDelantera", default)]
    pub front_detail: Vec<BlobRef>,
    #[serde(rename = "fotosParteTrasera", default)]
    pub rear_detail: Vec<BlobRef>,
}

impl VehiclePhotos {
    pub fn total(&self) -> usize {
        self.front.len()
            + self.rear.len()
            + self.left_side.len()
            + self.right_side.len()
            + self.front_detail.len()
            + self.rear_detail.len()
    }
}

impl Vehicle {
    /// Etiqueta usada en reportes: `"{marca} {modelo} {año} ({placas})"`
    pub fn label(&self) -> String {
        format!("{} {} {} ({})", self.brand, self.model, self.year, self.plates)
    }
}
