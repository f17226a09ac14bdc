//! DTO de captura de vehículos

use serde::Deserialize;
use validator::Validate;

use crate::models::blob::{replace_single, BlobMerge, BlobRef};
use crate::models::{Vehicle, VehiclePhotos};
use crate::utils::errors::AppResult;
use crate::utils::validation::validate_not_blank;

/// Request para crear o actualizar un vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehicleRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub brand: String,
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub model: String,
    #[validate(custom = "validate_not_blank", length(max = 10))]
    pub year: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub color: String,
    #[serde(default)]
    pub odometer_km: u32,
    #[serde(default)]
    #[validate(length(max = 17))]
    pub vin: String,
    #[validate(custom = "validate_not_blank", length(max = 20))]
    pub plates: String,
    #[serde(default)]
    pub circulation_card_number: String,
    #[serde(default)]
    pub circulation_card_image: Option<BlobRef>,
    #[serde(default)]
    pub federal_permit_number: String,
    /// Fotos recién capturadas por ángulo
    #[serde(default)]
    pub photos: VehiclePhotos,
}

impl VehicleRequest {
    /// Cada secuencia de fotos se sustituye solo si llegó algo nuevo para ella
    pub fn into_record(self, existing: Option<&Vehicle>) -> AppResult<Vehicle> {
        self.validate()?;
        let stored = existing.map(|v| v.photos.clone()).unwrap_or_default();
        let merge = BlobMerge::ReplaceIfProvided;
        let photos = VehiclePhotos {
            front: merge.apply(&stored.front, self.photos.front),
            rear: merge.apply(&stored.rear, self.photos.rear),
            left_side: merge.apply(&stored.left_side, self.photos.left_side),
            right_side: merge.apply(&stored.right_side, self.photos.right_side),
            front_detail: merge.apply(&stored.front_detail, self.photos.front_detail),
            rear_detail: merge.apply(&stored.rear_detail, self.photos.rear_detail),
        };

        Ok(Vehicle {
            id: existing.map(|v| v.id).unwrap_or_default(),
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year.trim().to_string(),
            color: self.color,
            odometer_km: self.odometer_km,
            vin: self.vin.trim().to_uppercase(),
            plates: self.plates.trim().to_uppercase(),
            circulation_card_number: self.circulation_card_number,
            circulation_card_image: replace_single(
                existing.and_then(|v| v.circulation_card_image.as_ref()),
                self.circulation_card_image,
            ),
            federal_permit_number: self.federal_permit_number,
            photos,
        })
    }
}
