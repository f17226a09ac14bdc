//! Métricas de fechas
//!
//! Conteos de días con signo entre fechas de calendario. Las fechas no
//! tienen hora, así que la diferencia siempre es un número entero de días
//! y el redondeo hacia arriba coincide con la resta exacta: hoy vale `0`,
//! mañana `1`, ayer `-1`.
//!
//! Cada función tiene una variante `*_from(.., today)` para poder fijar
//! el día de referencia; la variante corta usa la fecha local actual.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::common::WarrantyUnit;

/// Por encima de este número de días una cuenta regresiva es "safe"
pub const SAFE_THRESHOLD_DAYS: i64 = 180;
/// Por encima de este número (y hasta el umbral seguro) es "warning"
pub const WARNING_THRESHOLD_DAYS: i64 = 90;

/// Clasificación de urgencia de una cuenta regresiva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Safe,
    Warning,
    Critical,
}

impl Urgency {
    /// Misma regla para licencias, INE, pagos, garantías y mantenimientos
    pub fn classify(days: i64) -> Self {
        if days > SAFE_THRESHOLD_DAYS {
            Urgency::Safe
        } else if days > WARNING_THRESHOLD_DAYS {
            Urgency::Warning
        } else {
            Urgency::Critical
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Urgency::Safe => "safe",
            Urgency::Warning => "warning",
            Urgency::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Cuenta regresiva con su clasificación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub urgency: Urgency,
}

impl Countdown {
    pub fn new(days: i64) -> Self {
        Self {
            days,
            urgency: Urgency::classify(days),
        }
    }
}

/// Fecha local de hoy
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn days_remaining(target: NaiveDate) -> i64 {
    days_remaining_from(target, today())
}

pub fn days_remaining_from(target: NaiveDate, today: NaiveDate) -> i64 {
    days_between(today, target)
}

/// Días que el vehículo estuvo en taller (negativo si la salida es anterior)
pub fn days_in_workshop(entry: NaiveDate, exit: NaiveDate) -> i64 {
    days_between(entry, exit)
}

/// Fecha en que vence una garantía contada desde `start`.
///
/// `None` si el vencimiento cae fuera del calendario representable.
pub fn warranty_expiry(start: NaiveDate, duration: u32, unit: WarrantyUnit) -> Option<NaiveDate> {
    Duration::try_days(i64::from(duration) * unit.days_per_unit())
        .and_then(|span| start.checked_add_signed(span))
}

pub fn warranty_days_remaining(exit: NaiveDate, duration: u32, unit: WarrantyUnit) -> Option<i64> {
    warranty_days_remaining_from(exit, duration, unit, today())
}

pub fn warranty_days_remaining_from(
    exit: NaiveDate,
    duration: u32,
    unit: WarrantyUnit,
    today: NaiveDate,
) -> Option<i64> {
    warranty_expiry(exit, duration, unit).map(|expiry| days_remaining_from(expiry, today))
}

pub fn days_until_maintenance(due: NaiveDate) -> i64 {
    days_remaining(due)
}

pub fn days_until_maintenance_from(due: NaiveDate, today: NaiveDate) -> i64 {
    days_remaining_from(due, today)
}
