//! Colecciones persistidas y la instantánea completa de la flota

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::database::DurableStore;
use crate::models::{
    Repair, ResponsibleParty, ScheduledMaintenance, TireChange, Vehicle, VehicularPayment,
};
use crate::utils::errors::AppResult;

/// Las seis colecciones y su clave en el almacén durable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    ResponsibleParties,
    Vehicles,
    Repairs,
    ScheduledMaintenance,
    TireChanges,
    VehicularPayments,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::ResponsibleParties,
        Collection::Vehicles,
        Collection::Repairs,
        Collection::ScheduledMaintenance,
        Collection::TireChanges,
        Collection::VehicularPayments,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Collection::ResponsibleParties => "responsables",
            Collection::Vehicles => "vehiculos",
            Collection::Repairs => "reparaciones",
            Collection::ScheduledMaintenance => "mantenimientos",
            Collection::TireChanges => "tireChanges",
            Collection::VehicularPayments => "pagosVehiculares",
        }
    }

    pub fn keys() -> [&'static str; 6] {
        Self::ALL.map(Collection::key)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Instantánea de las seis colecciones.
///
/// También es el documento de exportación completo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(rename = "responsables", default)]
    pub responsibles: Vec<ResponsibleParty>,
    #[serde(rename = "vehiculos", default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(rename = "reparaciones", default)]
    pub repairs: Vec<Repair>,
    #[serde(rename = "mantenimientos", default)]
    pub maintenances: Vec<ScheduledMaintenance>,
    #[serde(rename = "tireChanges", default)]
    pub tire_changes: Vec<TireChange>,
    #[serde(rename = "pagosVehiculares", default)]
    pub payments: Vec<VehicularPayment>,
}

fn encode<T: Serialize>(items: &[T], pretty: bool) -> AppResult<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(items)?
    } else {
        serde_json::to_string(items)?
    })
}

fn load<T: DeserializeOwned>(backend: &dyn DurableStore, collection: Collection) -> AppResult<Vec<T>> {
    match backend.read(collection.key())? {
        Some(raw) if !raw.trim().is_empty() => {
            let items: Vec<T> = serde_json::from_str(&raw)?;
            debug!("📥 {} registros cargados de '{}'", items.len(), collection);
            Ok(items)
        }
        _ => Ok(Vec::new()),
    }
}

impl FleetSnapshot {
    /// Hidratar desde el almacén durable; las claves ausentes quedan vacías
    pub fn load(backend: &dyn DurableStore) -> AppResult<Self> {
        Ok(Self {
            responsibles: load(backend, Collection::ResponsibleParties)?,
            vehicles: load(backend, Collection::Vehicles)?,
            repairs: load(backend, Collection::Repairs)?,
            maintenances: load(backend, Collection::ScheduledMaintenance)?,
            tire_changes: load(backend, Collection::TireChanges)?,
            payments: load(backend, Collection::VehicularPayments)?,
        })
    }

    /// Serializar las seis colecciones para una escritura conjunta
    pub fn encode_entries(&self, pretty: bool) -> AppResult<Vec<(&'static str, String)>> {
        Ok(vec![
            (Collection::ResponsibleParties.key(), encode(&self.responsibles, pretty)?),
            (Collection::Vehicles.key(), encode(&self.vehicles, pretty)?),
            (Collection::Repairs.key(), encode(&self.repairs, pretty)?),
            (Collection::ScheduledMaintenance.key(), encode(&self.maintenances, pretty)?),
            (Collection::TireChanges.key(), encode(&self.tire_changes, pretty)?),
            (Collection::VehicularPayments.key(), encode(&self.payments, pretty)?),
        ])
    }

    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::ResponsibleParties => self.responsibles.len(),
            Collection::Vehicles => self.vehicles.len(),
            Collection::Repairs => self.repairs.len(),
            Collection::ScheduledMaintenance => self.maintenances.len(),
            Collection::TireChanges => self.tire_changes.len(),
            Collection::VehicularPayments => self.payments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Collection::ALL.iter().all(|c| self.len(*c) == 0)
    }

    /// Mayor id numérico almacenado (responsables y vehículos)
    pub fn max_numeric_id(&self) -> i64 {
        let responsibles = self.responsibles.iter().map(|r| r.id);
        let vehicles = self.vehicles.iter().map(|v| v.id);
        responsibles.chain(vehicles).max().unwrap_or(0)
    }
}
