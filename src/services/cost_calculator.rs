//! Calculadora de costos
//!
//! Desglose subtotal/IVA/total de una línea de costo con la tasa fija
//! del 16 %. Para costos marcados como "incluye IVA" el total es el
//! subtotal: el IVA calculado es informativo y no se suma.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::utils::errors::{validation_error, AppResult};

/// Tasa fija de IVA (16 %)
pub fn tax_rate() -> Decimal {
    Decimal::new(16, 2)
}

/// Desglose derivado de una línea de costo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calcula el desglose de una línea de costo.
///
/// Rechaza precios o cantidades negativas en lugar de ajustarlos, y
/// también productos que no caben en un `Decimal`.
pub fn calculate(unit_price: Decimal, quantity: i64, includes_tax: bool) -> AppResult<CostBreakdown> {
    if unit_price < Decimal::ZERO {
        return Err(validation_error("unit_price", "must not be negative"));
    }
    if quantity < 0 {
        return Err(validation_error("quantity", "must not be negative"));
    }

    let subtotal = unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| validation_error("unit_price", "subtotal out of range"))?;
    let tax = if includes_tax {
        round_cents(
            subtotal
                .checked_mul(tax_rate())
                .ok_or_else(|| validation_error("unit_price", "tax out of range"))?,
        )
    } else {
        Decimal::ZERO
    };

    Ok(CostBreakdown {
        subtotal,
        tax,
        total: subtotal,
    })
}

/// Desglose de un monto de reparación para reportes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBreakdown {
    pub base: Decimal,
    pub tax: Decimal,
    pub amount: Decimal,
}

/// Separa base e IVA de un monto que ya incluye el impuesto.
///
/// Sin IVA la base es el monto completo.
pub fn repair_tax_breakdown(amount: Decimal, includes_tax: bool) -> AmountBreakdown {
    if !includes_tax {
        return AmountBreakdown {
            base: amount,
            tax: Decimal::ZERO,
            amount,
        };
    }
    let base = round_cents(amount / (Decimal::ONE + tax_rate()));
    AmountBreakdown {
        base,
        tax: amount - base,
        amount,
    }
}
