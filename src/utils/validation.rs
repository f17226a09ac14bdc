//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos de
//! entrada. Se usan desde los `#[validate(custom = ...)]` de los DTOs.

use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

use crate::models::repair::REPAIR_CATEGORIES;
use crate::models::tire_change::{MAX_TIRE_POSITION, MIN_TIRE_POSITION};

/// Validar que un string no esté vacío (ignorando espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Variante para montos `Decimal` usada por el derive de `validator`
pub fn validate_non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

/// Validar posiciones de llanta (1 a 8)
pub fn validate_tire_positions(positions: &[u8]) -> Result<(), ValidationError> {
    if let Some(bad) = positions
        .iter()
        .find(|p| !(MIN_TIRE_POSITION..=MAX_TIRE_POSITION).contains(*p))
    {
        let mut error = ValidationError::new("tire_position");
        error.add_param("value".into(), bad);
        error.add_param(
            "range".into(),
            &format!("{}-{}", MIN_TIRE_POSITION, MAX_TIRE_POSITION),
        );
        return Err(error);
    }
    Ok(())
}

/// Validar que cada categoría de reparación pertenezca al catálogo
pub fn validate_repair_categories(categories: &[String]) -> Result<(), ValidationError> {
    if let Some(unknown) = categories
        .iter()
        .find(|c| !REPAIR_CATEGORIES.contains(&c.as_str()))
    {
        let mut error = ValidationError::new("repair_category");
        error.add_param("value".into(), unknown);
        error.add_param("allowed_values".into(), &format!("{:?}", REPAIR_CATEGORIES));
        return Err(error);
    }
    Ok(())
}

/// Normalizar una referencia opcional capturada desde un formulario.
///
/// Los selectores usan `"none"` o cadena vacía para "sin vínculo".
pub fn normalize_link(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "none")
}
