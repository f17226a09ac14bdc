//! DTO de captura de responsables

use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::blob::{replace_single, BlobRef};
use crate::models::ResponsibleParty;
use crate::utils::errors::AppResult;
use crate::utils::validation::validate_not_blank;

/// Datos capturados para crear o editar un responsable
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_document_dates"))]
pub struct ResponsibleRequest {
    #[validate(custom = "validate_not_blank", length(max = 150))]
    pub name: String,
    #[validate(custom = "validate_not_blank", length(max = 50))]
    pub federal_license: String,
    pub license_issued_on: NaiveDate,
    pub license_expires_on: NaiveDate,
    #[validate(custom = "validate_not_blank", length(max = 50))]
    pub id_number: String,
    pub id_issued_on: NaiveDate,
    pub id_expires_on: NaiveDate,
    #[serde(default)]
    pub social_security_number: String,
    #[serde(default)]
    pub direct_phone: String,
    #[serde(default)]
    pub family_phone: String,
    #[serde(default)]
    pub assigned_vehicle: Option<i64>,
    /// Imágenes recién capturadas; `None` conserva la almacenada
    #[serde(default)]
    pub license_image: Option<BlobRef>,
    #[serde(default)]
    pub id_image: Option<BlobRef>,
    #[serde(default)]
    pub insurance_image: Option<BlobRef>,
}

fn validate_document_dates(request: &ResponsibleRequest) -> Result<(), ValidationError> {
    if request.license_expires_on < request.license_issued_on {
        return Err(ValidationError::new("license_expires_before_issue"));
    }
    if request.id_expires_on < request.id_issued_on {
        return Err(ValidationError::new("id_expires_before_issue"));
    }
    Ok(())
}

impl ResponsibleRequest {
    /// Construir el registro completo; las imágenes se sustituyen solo si
    /// se capturó una nueva
    pub fn into_record(self, existing: Option<&ResponsibleParty>) -> AppResult<ResponsibleParty> {
        self.validate()?;
        Ok(ResponsibleParty {
            id: existing.map(|r| r.id).unwrap_or_default(),
            name: self.name.trim().to_string(),
            federal_license: self.federal_license.trim().to_string(),
            license_issued_on: self.license_issued_on,
            license_expires_on: self.license_expires_on,
            license_image: replace_single(
                existing.and_then(|r| r.license_image.as_ref()),
                self.license_image,
            ),
            id_number: self.id_number.trim().to_string(),
            id_issued_on: self.id_issued_on,
            id_expires_on: self.id_expires_on,
            id_image: replace_single(existing.and_then(|r| r.id_image.as_ref()), self.id_image),
            social_security_number: self.social_security_number,
            direct_phone: self.direct_phone,
            family_phone: self.family_phone,
            insurance_image: replace_single(
                existing.and_then(|r| r.insurance_image.as_ref()),
                self.insurance_image,
            ),
            assigned_vehicle: self.assigned_vehicle.filter(|id| *id > 0),
        })
    }
}
