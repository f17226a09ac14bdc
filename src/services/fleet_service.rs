//! Servicio de registros de la flota
//!
//! Camino tipado de guardado: DTO validado → registro completo (política de
//! imágenes, campos de costo derivados) → mutación del store. Al editar se
//! parte del registro almacenado; si no existe el resultado es `NotFound`.

use tracing::{debug, info};

use crate::dto::{
    CostRequest, MaintenanceRequest, PaymentRequest, RepairRequest, ResponsibleRequest,
    TireChangeRequest, VehicleRequest,
};
use crate::models::{
    Cost, Repair, ResponsibleParty, ScheduledMaintenance, TireChange, Vehicle, VehicularPayment,
};
use crate::repositories::{Record, RecordStore};
use crate::utils::errors::{not_found_error, AppResult};

pub struct FleetService<'a> {
    store: &'a mut RecordStore,
}

impl<'a> FleetService<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    fn existing<R: Record>(&self, id: Option<&R::Id>) -> AppResult<Option<R>> {
        match id {
            Some(id) => self
                .store
                .get::<R>(id)
                .cloned()
                .map(Some)
                .ok_or_else(|| not_found_error(R::KIND, &id.to_string())),
            None => Ok(None),
        }
    }

    fn persist<R: Record>(&mut self, id: Option<&R::Id>, record: R) -> AppResult<R> {
        match id {
            Some(id) => self.store.update(id, record),
            None => self.store.create(record),
        }
    }

    pub fn save_responsible(
        &mut self,
        id: Option<&i64>,
        request: ResponsibleRequest,
    ) -> AppResult<ResponsibleParty> {
        let existing = self.existing::<ResponsibleParty>(id)?;
        let record = request.into_record(existing.as_ref())?;
        self.persist(id, record)
    }

    pub fn save_vehicle(&mut self, id: Option<&i64>, request: VehicleRequest) -> AppResult<Vehicle> {
        let existing = self.existing::<Vehicle>(id)?;
        let record = request.into_record(existing.as_ref())?;
        self.persist(id, record)
    }

    pub fn save_repair(&mut self, id: Option<&String>, request: RepairRequest) -> AppResult<Repair> {
        let existing = self.existing::<Repair>(id)?;
        let record = request.into_record(existing.as_ref())?;
        self.persist(id, record)
    }

    pub fn save_maintenance(
        &mut self,
        id: Option<&String>,
        request: MaintenanceRequest,
    ) -> AppResult<ScheduledMaintenance> {
        let existing = self.existing::<ScheduledMaintenance>(id)?;
        let record = request.into_record(existing.as_ref())?;
        self.persist(id, record)
    }

    pub fn save_tire_change(
        &mut self,
        id: Option<&String>,
        request: TireChangeRequest,
    ) -> AppResult<TireChange> {
        let existing = self.existing::<TireChange>(id)?;
        let record = request.into_record(existing.as_ref())?;
        self.persist(id, record)
    }

    pub fn save_payment(
        &mut self,
        id: Option<&String>,
        request: PaymentRequest,
    ) -> AppResult<VehicularPayment> {
        let existing = self.existing::<VehicularPayment>(id)?;
        let record = request.into_record(existing.as_ref())?;
        self.persist(id, record)
    }

    /// Agregar una línea de costo (`cost_id = None`) o reemplazarla en su lugar
    pub fn save_cost(
        &mut self,
        tire_change_id: &str,
        cost_id: Option<&str>,
        request: CostRequest,
    ) -> AppResult<Cost> {
        let tire_change_key = tire_change_id.to_string();
        let mut tire_change = self
            .store
            .get::<TireChange>(&tire_change_key)
            .cloned()
            .ok_or_else(|| not_found_error(TireChange::KIND, tire_change_id))?;

        let cost = match cost_id {
            Some(cost_id) => {
                let slot = tire_change
                    .costs
                    .iter_mut()
                    .find(|c| c.id == cost_id)
                    .ok_or_else(|| not_found_error("Cost", cost_id))?;
                *slot = request.into_cost(cost_id.to_string())?;
                slot.clone()
            }
            None => {
                let cost = request.into_cost(self.store.next_cost_id())?;
                tire_change.costs.push(cost.clone());
                cost
            }
        };

        self.store.update(&tire_change_key, tire_change)?;
        info!("💰 Costo {} guardado en cambio de llantas {}", cost.id, tire_change_id);
        Ok(cost)
    }

    /// Quitar una línea de costo; si no existe no hay escritura
    pub fn delete_cost(&mut self, tire_change_id: &str, cost_id: &str) -> AppResult<()> {
        let tire_change_key = tire_change_id.to_string();
        let mut tire_change = self
            .store
            .get::<TireChange>(&tire_change_key)
            .cloned()
            .ok_or_else(|| not_found_error(TireChange::KIND, tire_change_id))?;

        let before = tire_change.costs.len();
        tire_change.costs.retain(|c| c.id != cost_id);
        if tire_change.costs.len() == before {
            debug!("🔍 Costo {} no existe en {}, borrado ignorado", cost_id, tire_change_id);
            return Ok(());
        }

        self.store.update(&tire_change_key, tire_change)?;
        info!("🗑️ Costo {} eliminado de {}", cost_id, tire_change_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::{BlobRef, WarrantyUnit};
    use crate::repositories::StoreOptions;
    use crate::utils::errors::AppError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn store() -> RecordStore {
        RecordStore::open_with(
            MemoryStore::new(),
            StoreOptions {
                pretty_json: false,
                id_seed: Some(7),
            },
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tire_change_request(photos: Vec<BlobRef>) -> TireChangeRequest {
        TireChangeRequest {
            vehicle_id: 1,
            change_date: date(2024, 3, 1),
            odometer_km: 50_000,
            provider: "Llantera del Norte".into(),
            changed_tires: vec![1, 2, 2],
            tire_brand: "Michelin".into(),
            tire_model: "LTX".into(),
            tire_serial_numbers: String::new(),
            recommended_life_km: 60_000,
            next_change_km: 110_000,
            warranty_duration: 1,
            warranty_unit: WarrantyUnit::Years,
            notes: String::new(),
            photos,
        }
    }

    fn cost_request(unit_price: i64, quantity: i64, includes_tax: bool) -> CostRequest {
        CostRequest {
            unit_price: Decimal::new(unit_price, 0),
            quantity,
            includes_tax,
            payment_method: "Transferencia".into(),
            invoice_number: "F-001".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_edit_appends_tire_change_photos_and_keeps_costs() {
        let mut store = store();
        let mut service = FleetService::new(&mut store);
        let saved = service
            .save_tire_change(None, tire_change_request(vec![BlobRef::from("a")]))
            .unwrap();
        assert_eq!(saved.changed_tires, vec![1, 2]);
        service.save_cost(&saved.id, None, cost_request(1000, 4, true)).unwrap();

        let edited = service
            .save_tire_change(Some(&saved.id), tire_change_request(vec![BlobRef::from("b")]))
            .unwrap();
        assert_eq!(edited.photos, vec![BlobRef::from("a"), BlobRef::from("b")]);
        assert_eq!(edited.costs.len(), 1);
    }

    #[test]
    fn test_save_cost_appends_then_replaces_in_place() {
        let mut store = store();
        let mut service = FleetService::new(&mut store);
        let tc = service.save_tire_change(None, tire_change_request(vec![])).unwrap();

        let first = service.save_cost(&tc.id, None, cost_request(1000, 4, true)).unwrap();
        assert!(first.id.starts_with("COST-"));
        assert_eq!(first.subtotal, Decimal::new(4000, 0));
        assert_eq!(first.tax, Decimal::new(640, 0));
        assert_eq!(first.total, Decimal::new(4000, 0));

        let second = service.save_cost(&tc.id, None, cost_request(250, 2, false)).unwrap();
        let replaced = service
            .save_cost(&tc.id, Some(&first.id), cost_request(500, 1, false))
            .unwrap();
        assert_eq!(replaced.id, first.id);
        assert_eq!(replaced.tax, Decimal::ZERO);

        let stored = store.get::<TireChange>(&tc.id).unwrap();
        let ids: Vec<&str> = stored.costs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
        assert_eq!(stored.costs_total(), Some(Decimal::new(1000, 0)));
    }

    #[test]
    fn test_cost_errors() {
        let mut store = store();
        let mut service = FleetService::new(&mut store);
        let err = service.save_cost("TC-missing", None, cost_request(1, 1, false)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let tc = service.save_tire_change(None, tire_change_request(vec![])).unwrap();
        let err = service
            .save_cost(&tc.id, Some("COST-missing"), cost_request(1, 1, false))
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service.save_cost(&tc.id, None, cost_request(-5, 1, false)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_delete_cost() {
        let mut store = store();
        let mut service = FleetService::new(&mut store);
        let tc = service.save_tire_change(None, tire_change_request(vec![])).unwrap();
        let cost = service.save_cost(&tc.id, None, cost_request(100, 1, false)).unwrap();

        service.delete_cost(&tc.id, "COST-unknown").unwrap();
        service.delete_cost(&tc.id, &cost.id).unwrap();
        assert!(store.get::<TireChange>(&tc.id).unwrap().costs.is_empty());
    }

    #[test]
    fn test_edit_missing_record_is_not_found() {
        let mut store = store();
        let mut service = FleetService::new(&mut store);
        let err = service
            .save_tire_change(Some(&"TC-nope".to_string()), tire_change_request(vec![]))
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
