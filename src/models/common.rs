//! Tipos compartidos entre modelos
//!
//! Estados de registro, unidades de garantía y helpers de serde para el
//! formato persistido.

use serde::{Deserialize, Deserializer, Serialize};

/// Estado de una reparación o mantenimiento programado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum RecordStatus {
    #[default]
    #[serde(rename = "Programado", alias = "Scheduled")]
    Scheduled,
    #[serde(rename = "En proceso", alias = "InProgress")]
    InProgress,
    #[serde(rename = "Realizado", alias = "Done")]
    Done,
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RecordStatus::Scheduled => "Programado",
            RecordStatus::InProgress => "En proceso",
            RecordStatus::Done => "Realizado",
        };
        f.write_str(label)
    }
}

/// Unidad de la duración de garantía
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WarrantyUnit {
    #[default]
    #[serde(rename = "días", alias = "days", alias = "dias")]
    Days,
    #[serde(rename = "meses", alias = "months")]
    Months,
    #[serde(rename = "años", alias = "years", alias = "anos")]
    Years,
}

impl WarrantyUnit {
    /// Días por unidad: meses de 30 días y años de 365
    pub fn days_per_unit(self) -> i64 {
        match self {
            WarrantyUnit::Days => 1,
            WarrantyUnit::Months => 30,
            WarrantyUnit::Years => 365,
        }
    }
}

impl std::fmt::Display for WarrantyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            WarrantyUnit::Days => "días",
            WarrantyUnit::Months => "meses",
            WarrantyUnit::Years => "años",
        };
        f.write_str(label)
    }
}

/// Deserializa un vínculo débil tratando `""` y `"none"` como ausente
pub fn deserialize_link<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(crate::utils::validation::normalize_link(raw))
}
