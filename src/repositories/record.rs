//! Contrato común de los registros almacenados
//!
//! Cada tipo de registro sabe en qué colección vive, cómo se genera su id
//! y qué efectos tiene guardarlo o borrarlo sobre las demás colecciones.

use std::fmt;

use super::collection::{Collection, FleetSnapshot};
use crate::models::{
    Repair, ResponsibleParty, ScheduledMaintenance, TireChange, Vehicle, VehicularPayment,
};
use crate::services::relation_maintainer;
use crate::utils::errors::AppResult;
use crate::utils::ids::{
    IdGenerator, MAINTENANCE_PREFIX, PAYMENT_PREFIX, REPAIR_PREFIX, TIRE_CHANGE_PREFIX,
};

pub trait Record: Clone + fmt::Debug + Sized {
    type Id: Clone + PartialEq + fmt::Display + fmt::Debug;

    const COLLECTION: Collection;
    /// Nombre legible para mensajes de error
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
    fn set_id(&mut self, id: Self::Id);

    /// Id nuevo, único dentro de la colección
    fn next_id(ids: &mut IdGenerator, snapshot: &FleetSnapshot) -> Self::Id;

    fn items(snapshot: &FleetSnapshot) -> &Vec<Self>;
    fn items_mut(snapshot: &mut FleetSnapshot) -> &mut Vec<Self>;

    /// Efectos sobre otras colecciones tras guardar (sobre la instantánea en preparación)
    fn after_save(_snapshot: &mut FleetSnapshot, _saved: &Self) -> AppResult<usize> {
        Ok(0)
    }

    /// Efectos sobre otras colecciones tras borrar
    fn after_delete(_snapshot: &mut FleetSnapshot, _deleted: &Self) -> usize {
        0
    }
}

fn numeric_id(ids: &mut IdGenerator, snapshot: &FleetSnapshot) -> i64 {
    ids.observe_numeric(snapshot.max_numeric_id());
    ids.next_numeric()
}

impl Record for ResponsibleParty {
    type Id = i64;
    const COLLECTION: Collection = Collection::ResponsibleParties;
    const KIND: &'static str = "ResponsibleParty";

    fn id(&self) -> &i64 {
        &self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn next_id(ids: &mut IdGenerator, snapshot: &FleetSnapshot) -> i64 {
        numeric_id(ids, snapshot)
    }
    fn items(snapshot: &FleetSnapshot) -> &Vec<Self> {
        &snapshot.responsibles
    }
    fn items_mut(snapshot: &mut FleetSnapshot) -> &mut Vec<Self> {
        &mut snapshot.responsibles
    }
}

impl Record for Vehicle {
    type Id = i64;
    const COLLECTION: Collection = Collection::Vehicles;
    const KIND: &'static str = "Vehicle";

    fn id(&self) -> &i64 {
        &self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn next_id(ids: &mut IdGenerator, snapshot: &FleetSnapshot) -> i64 {
        numeric_id(ids, snapshot)
    }
    fn items(snapshot: &FleetSnapshot) -> &Vec<Self> {
        &snapshot.vehicles
    }
    fn items_mut(snapshot: &mut FleetSnapshot) -> &mut Vec<Self> {
        &mut snapshot.vehicles
    }
}

impl Record for Repair {
    type Id = String;
    const COLLECTION: Collection = Collection::Repairs;
    const KIND: &'static str = "Repair";

    fn id(&self) -> &String {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn next_id(ids: &mut IdGenerator, snapshot: &FleetSnapshot) -> String {
        ids.unique_token(REPAIR_PREFIX, |c| snapshot.repairs.iter().any(|r| r.id == c))
    }
    fn items(snapshot: &FleetSnapshot) -> &Vec<Self> {
        &snapshot.repairs
    }
    fn items_mut(snapshot: &mut FleetSnapshot) -> &mut Vec<Self> {
        &mut snapshot.repairs
    }
    fn after_save(snapshot: &mut FleetSnapshot, saved: &Self) -> AppResult<usize> {
        relation_maintainer::on_repair_saved(snapshot, saved)
    }
    fn after_delete(snapshot: &mut FleetSnapshot, deleted: &Self) -> usize {
        relation_maintainer::on_repair_deleted(snapshot, &deleted.id)
    }
}

impl Record for ScheduledMaintenance {
    type Id = String;
    const COLLECTION: Collection = Collection::ScheduledMaintenance;
    const KIND: &'static str = "ScheduledMaintenance";

    fn id(&self) -> &String {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn next_id(ids: &mut IdGenerator, snapshot: &FleetSnapshot) -> String {
        ids.unique_token(MAINTENANCE_PREFIX, |c| {
            snapshot.maintenances.iter().any(|m| m.id == c)
        })
    }
    fn items(snapshot: &FleetSnapshot) -> &Vec<Self> {
        &snapshot.maintenances
    }
    fn items_mut(snapshot: &mut FleetSnapshot) -> &mut Vec<Self> {
        &mut snapshot.maintenances
    }
    fn after_save(snapshot: &mut FleetSnapshot, saved: &Self) -> AppResult<usize> {
        relation_maintainer::on_maintenance_saved(snapshot, saved)
    }
    fn after_delete(snapshot: &mut FleetSnapshot, deleted: &Self) -> usize {
        relation_maintainer::on_maintenance_deleted(snapshot, &deleted.id)
    }
}

impl Record for TireChange {
    type Id = String;
    const COLLECTION: Collection = Collection::TireChanges;
    const KIND: &'static str = "TireChange";

    fn id(&self) -> &String {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn next_id(ids: &mut IdGenerator, snapshot: &FleetSnapshot) -> String {
        ids.unique_token(TIRE_CHANGE_PREFIX, |c| {
            snapshot.tire_changes.iter().any(|t| t.id == c)
        })
    }
    fn items(snapshot: &FleetSnapshot) -> &Vec<Self> {
        &snapshot.tire_changes
    }
    fn items_mut(snapshot: &mut FleetSnapshot) -> &mut Vec<Self> {
        &mut snapshot.tire_changes
    }
}

impl Record for VehicularPayment {
    type Id = String;
    const COLLECTION: Collection = Collection::VehicularPayments;
    const KIND: &'static str = "VehicularPayment";

    fn id(&self) -> &String {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn next_id(ids: &mut IdGenerator, snapshot: &FleetSnapshot) -> String {
        ids.unique_token(PAYMENT_PREFIX, |c| snapshot.payments.iter().any(|p| p.id == c))
    }
    fn items(snapshot: &FleetSnapshot) -> &Vec<Self> {
        &snapshot.payments
    }
    fn items_mut(snapshot: &mut FleetSnapshot) -> &mut Vec<Self> {
        &mut snapshot.payments
    }
}
