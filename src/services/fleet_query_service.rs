//! Consultas y agregaciones de solo lectura
//!
//! Vistas derivadas que consume la presentación: resolución de vínculos
//! débiles, pago más reciente por categoría y cuentas regresivas con su
//! clasificación de urgencia. Todas reciben el día de referencia.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{
    PaymentCategory, Repair, ResponsibleParty, ScheduledMaintenance, TireChange, Vehicle,
    VehicularPayment,
};
use crate::repositories::FleetSnapshot;
use crate::services::date_metrics::{self, Countdown};

/// Resultado de resolver un vínculo débil
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a, T> {
    Found(&'a T),
    NotFound,
}

impl<'a, T> Resolved<'a, T> {
    fn from_option(value: Option<&'a T>) -> Self {
        match value {
            Some(found) => Resolved::Found(found),
            None => Resolved::NotFound,
        }
    }

    pub fn found(self) -> Option<&'a T> {
        match self {
            Resolved::Found(value) => Some(value),
            Resolved::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolved::Found(_))
    }
}

/// `"{marca} {modelo} {año} ({placas})"`
pub fn vehicle_label(vehicle: &Vehicle) -> String {
    vehicle.label()
}

/// Texto mostrado cuando un vínculo no resuelve
pub const NOT_FOUND_LABEL: &str = "No encontrado";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentDeadline {
    pub payment_id: String,
    pub category: PaymentCategory,
    pub due_on: NaiveDate,
    pub countdown: Countdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairOverview {
    pub repair_id: String,
    pub vehicle: String,
    pub responsible: String,
    pub workshop_days: i64,
    /// `None` si el vencimiento de la garantía no es representable
    pub warranty: Option<Countdown>,
    pub maintenance_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceOverview {
    pub maintenance_id: String,
    pub vehicle: String,
    pub due: Countdown,
    pub repair_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TireChangeOverview {
    pub tire_change_id: String,
    pub vehicle: String,
    pub warranty: Option<Countdown>,
    pub cost_lines: usize,
    /// `None` si la suma de los costos desborda
    pub costs_total: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsibleOverview {
    pub responsible_id: i64,
    pub name: String,
    pub license: Countdown,
    pub id_document: Countdown,
    pub assigned_plates: String,
}

pub struct FleetQueryService<'a> {
    snapshot: &'a FleetSnapshot,
}

impl<'a> FleetQueryService<'a> {
    pub fn new(snapshot: &'a FleetSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn vehicle_for(&self, id: i64) -> Resolved<'a, Vehicle> {
        Resolved::from_option(self.snapshot.vehicles.iter().find(|v| v.id == id))
    }

    pub fn responsible_for(&self, id: i64) -> Resolved<'a, ResponsibleParty> {
        Resolved::from_option(self.snapshot.responsibles.iter().find(|r| r.id == id))
    }

    fn maintenance_for(&self, id: &str) -> Resolved<'a, ScheduledMaintenance> {
        Resolved::from_option(self.snapshot.maintenances.iter().find(|m| m.id == id))
    }

    fn repair_for(&self, id: &str) -> Resolved<'a, Repair> {
        Resolved::from_option(self.snapshot.repairs.iter().find(|r| r.id == id))
    }

    fn vehicle_text(&self, id: i64) -> String {
        self.vehicle_for(id)
            .found()
            .map(Vehicle::label)
            .unwrap_or_else(|| NOT_FOUND_LABEL.to_string())
    }

    /// Pago con la `fechaEmision` más reciente por categoría; en empate gana
    /// el último en el orden de la colección
    pub fn most_recent_payment_per_category(
        &self,
        vehicle_id: i64,
    ) -> BTreeMap<PaymentCategory, &'a VehicularPayment> {
        let mut latest: BTreeMap<PaymentCategory, &'a VehicularPayment> = BTreeMap::new();
        for payment in self.snapshot.payments.iter().filter(|p| p.vehicle_id == vehicle_id) {
            let newer = latest
                .get(&payment.category)
                .map_or(true, |current| payment.issued_on >= current.issued_on);
            if newer {
                latest.insert(payment.category, payment);
            }
        }
        latest
    }

    pub fn payment_deadlines(&self, vehicle_id: i64, today: NaiveDate) -> Vec<PaymentDeadline> {
        self.most_recent_payment_per_category(vehicle_id)
            .into_values()
            .map(|payment| PaymentDeadline {
                payment_id: payment.id.clone(),
                category: payment.category,
                due_on: payment.next_due_on,
                countdown: Countdown::new(date_metrics::days_remaining_from(
                    payment.next_due_on,
                    today,
                )),
            })
            .collect()
    }

    pub fn repair_overview(&self, today: NaiveDate) -> Vec<RepairOverview> {
        self.snapshot
            .repairs
            .iter()
            .map(|repair| RepairOverview {
                repair_id: repair.id.clone(),
                vehicle: self.vehicle_text(repair.vehicle_id),
                responsible: self
                    .responsible_for(repair.responsible_id)
                    .found()
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| NOT_FOUND_LABEL.to_string()),
                workshop_days: date_metrics::days_in_workshop(repair.entry_date, repair.exit_date),
                warranty: date_metrics::warranty_days_remaining_from(
                    repair.exit_date,
                    repair.warranty_duration,
                    repair.warranty_unit,
                    today,
                )
                .map(Countdown::new),
                maintenance_id: repair
                    .maintenance_id
                    .as_deref()
                    .and_then(|id| self.maintenance_for(id).found())
                    .map(|m| m.id.clone()),
            })
            .collect()
    }

    pub fn maintenance_overview(&self, today: NaiveDate) -> Vec<MaintenanceOverview> {
        self.snapshot
            .maintenances
            .iter()
            .map(|maintenance| MaintenanceOverview {
                maintenance_id: maintenance.id.clone(),
                vehicle: self.vehicle_text(maintenance.vehicle_id),
                due: Countdown::new(date_metrics::days_until_maintenance_from(
                    maintenance.due_date,
                    today,
                )),
                repair_id: maintenance
                    .repair_id
                    .as_deref()
                    .and_then(|id| self.repair_for(id).found())
                    .map(|r| r.id.clone()),
            })
            .collect()
    }

    pub fn tire_change_overview(&self, today: NaiveDate) -> Vec<TireChangeOverview> {
        self.snapshot
            .tire_changes
            .iter()
            .map(|tire_change: &TireChange| TireChangeOverview {
                tire_change_id: tire_change.id.clone(),
                vehicle: self.vehicle_text(tire_change.vehicle_id),
                warranty: date_metrics::warranty_days_remaining_from(
                    tire_change.change_date,
                    tire_change.warranty_duration,
                    tire_change.warranty_unit,
                    today,
                )
                .map(Countdown::new),
                cost_lines: tire_change.costs.len(),
                costs_total: tire_change.costs_total(),
            })
            .collect()
    }

    pub fn responsible_overview(&self, today: NaiveDate) -> Vec<ResponsibleOverview> {
        self.snapshot
            .responsibles
            .iter()
            .map(|responsible| ResponsibleOverview {
                responsible_id: responsible.id,
                name: responsible.name.clone(),
                license: Countdown::new(date_metrics::days_remaining_from(
                    responsible.license_expires_on,
                    today,
                )),
                id_document: Countdown::new(date_metrics::days_remaining_from(
                    responsible.id_expires_on,
                    today,
                )),
                assigned_plates: responsible
                    .assigned_vehicle
                    .and_then(|id| self.vehicle_for(id).found())
                    .map(|v| v.plates.clone())
                    .unwrap_or_else(|| NOT_FOUND_LABEL.to_string()),
            })
            .collect()
    }
}
