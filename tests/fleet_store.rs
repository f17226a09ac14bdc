use chrono::NaiveDate;
use rust_decimal::Decimal;

use fleet_records::database::{FileStore, MemoryStore};
use fleet_records::dto::{
    CostRequest, MaintenanceRequest, RepairRequest, ResponsibleRequest, VehicleRequest,
};
use fleet_records::models::{
    BlobRef, BlobResolver, DataUrlResolver, RecordStatus, Repair, ScheduledMaintenance, Vehicle,
    VehiclePhotos, WarrantyUnit,
};
use fleet_records::repositories::Collection;
use fleet_records::services::{FleetQueryService, FleetService, Resolved};
use fleet_records::{AppError, RecordStore, StoreOptions};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn memory_store(backend: &MemoryStore) -> RecordStore {
    RecordStore::open_with(
        backend.clone(),
        StoreOptions {
            pretty_json: false,
            id_seed: Some(42),
        },
    )
    .unwrap()
}

fn vehicle_request(photos: VehiclePhotos) -> VehicleRequest {
    VehicleRequest {
        brand: "Ford".into(),
        model: "Transit".into(),
        year: "2022".into(),
        color: "Blanco".into(),
        odometer_km: 15_000,
        vin: "1ftbr1c80nka00000".into(),
        plates: "abc-123".into(),
        circulation_card_number: "TC-998".into(),
        circulation_card_image: None,
        federal_permit_number: String::new(),
        photos,
    }
}

fn responsible_request(license_image: Option<BlobRef>) -> ResponsibleRequest {
    ResponsibleRequest {
        name: "Ana López".into(),
        federal_license: "LF-123".into(),
        license_issued_on: date(2022, 1, 1),
        license_expires_on: date(2026, 1, 1),
        id_number: "INE-555".into(),
        id_issued_on: date(2020, 1, 1),
        id_expires_on: date(2030, 1, 1),
        social_security_number: String::new(),
        direct_phone: String::new(),
        family_phone: String::new(),
        assigned_vehicle: None,
        license_image,
        id_image: None,
        insurance_image: None,
    }
}

fn repair_request(vehicle_id: i64, maintenance_id: Option<&str>, photos: Vec<BlobRef>) -> RepairRequest {
    RepairRequest {
        vehicle_id,
        responsible_id: 1,
        entry_date: date(2024, 5, 1),
        exit_date: date(2024, 5, 4),
        odometer_km: 40_000,
        provider: "Taller Centro".into(),
        categories: vec!["Sistema Mecánico".into()],
        description: "Cambio de balatas".into(),
        warranty_duration: 6,
        warranty_unit: WarrantyUnit::Months,
        invoice_id: "A-1".into(),
        payment_method: "Efectivo".into(),
        payment_notes: String::new(),
        amount: Decimal::new(3480, 0),
        includes_tax: true,
        photos,
        maintenance_id: maintenance_id.map(str::to_string),
        status: RecordStatus::Done,
    }
}

fn maintenance_request(vehicle_id: i64) -> MaintenanceRequest {
    MaintenanceRequest {
        vehicle_id,
        responsible_id: 1,
        scheduled_odometer_km: 50_000,
        due_date: date(2024, 9, 1),
        approximate_cost: Decimal::new(2000, 0),
        description: "Servicio mayor".into(),
        omission_consequence: String::new(),
        repair_id: None,
        status: RecordStatus::Scheduled,
    }
}

#[test]
fn test_linking_repair_mirrors_and_delete_cleans_up() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let mut service = FleetService::new(&mut store);

    let maintenance = service.save_maintenance(None, maintenance_request(1)).unwrap();
    let repair = service
        .save_repair(None, repair_request(1, Some(&maintenance.id), vec![]))
        .unwrap();

    let mirrored = store.get::<ScheduledMaintenance>(&maintenance.id).unwrap();
    assert_eq!(mirrored.repair_id.as_deref(), Some(repair.id.as_str()));

    store.delete::<Repair>(&repair.id).unwrap();
    let cleared = store.get::<ScheduledMaintenance>(&maintenance.id).unwrap();
    assert_eq!(cleared.repair_id, None);
}

#[test]
fn test_deleting_maintenance_clears_repair_link() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let mut service = FleetService::new(&mut store);

    let repair = service.save_repair(None, repair_request(1, None, vec![])).unwrap();
    let mut request = maintenance_request(1);
    request.repair_id = Some(repair.id.clone());
    let maintenance = service.save_maintenance(None, request).unwrap();
    assert_eq!(
        store.get::<Repair>(&repair.id).unwrap().maintenance_id.as_deref(),
        Some(maintenance.id.as_str())
    );

    store.delete::<ScheduledMaintenance>(&maintenance.id).unwrap();
    assert_eq!(store.get::<Repair>(&repair.id).unwrap().maintenance_id, None);
}

#[test]
fn test_repointing_repair_clears_stale_reverse_link() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let mut service = FleetService::new(&mut store);

    let first = service.save_maintenance(None, maintenance_request(1)).unwrap();
    let second = service.save_maintenance(None, maintenance_request(1)).unwrap();
    let repair = service.save_repair(None, repair_request(1, Some(&first.id), vec![])).unwrap();
    service
        .save_repair(Some(&repair.id), repair_request(1, Some(&second.id), vec![]))
        .unwrap();

    assert_eq!(store.get::<ScheduledMaintenance>(&first.id).unwrap().repair_id, None);
    assert_eq!(
        store.get::<ScheduledMaintenance>(&second.id).unwrap().repair_id.as_deref(),
        Some(repair.id.as_str())
    );
}

#[test]
fn test_none_link_is_normalized_and_unknown_link_rejected() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let mut service = FleetService::new(&mut store);

    let repair = service.save_repair(None, repair_request(1, Some("none"), vec![])).unwrap();
    assert_eq!(repair.maintenance_id, None);

    let writes = backend.write_count();
    let err = service
        .save_repair(None, repair_request(1, Some("MANT-doesnotexist"), vec![]))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(backend.write_count(), writes);
    assert_eq!(store.list::<Repair>().len(), 1);
}

#[test]
fn test_update_with_identical_record_is_idempotent() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let vehicle = FleetService::new(&mut store)
        .save_vehicle(None, vehicle_request(VehiclePhotos::default()))
        .unwrap();
    let before = backend.raw(Collection::Vehicles.key());

    store.update(&vehicle.id, vehicle.clone()).unwrap();
    assert_eq!(backend.raw(Collection::Vehicles.key()), before);
    assert_eq!(store.list::<Vehicle>(), &[vehicle][..]);
}

#[test]
fn test_vehicle_delete_leaves_repairs_dangling() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let mut service = FleetService::new(&mut store);
    let vehicle = service.save_vehicle(None, vehicle_request(VehiclePhotos::default())).unwrap();
    let repair = service.save_repair(None, repair_request(vehicle.id, None, vec![])).unwrap();

    store.delete::<Vehicle>(&vehicle.id).unwrap();
    assert!(store.get::<Repair>(&repair.id).is_some());

    let query = FleetQueryService::new(store.snapshot());
    assert_eq!(query.vehicle_for(vehicle.id), Resolved::NotFound);
}

#[test]
fn test_blob_policies_on_edit() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let mut service = FleetService::new(&mut store);
    let resolver = DataUrlResolver;

    let first_photo = resolver.resolve("image/jpeg", b"front-1");
    let vehicle = service
        .save_vehicle(
            None,
            vehicle_request(VehiclePhotos {
                front: vec![first_photo.clone()],
                ..Default::default()
            }),
        )
        .unwrap();
    assert_eq!(vehicle.plates, "ABC-123");

    let edited = service
        .save_vehicle(
            Some(&vehicle.id),
            vehicle_request(VehiclePhotos {
                rear: vec![BlobRef::from("rear")],
                ..Default::default()
            }),
        )
        .unwrap();
    assert_eq!(edited.photos.front, vec![first_photo]);
    assert_eq!(edited.photos.rear, vec![BlobRef::from("rear")]);

    let replaced = service
        .save_vehicle(
            Some(&vehicle.id),
            vehicle_request(VehiclePhotos {
                front: vec![BlobRef::from("front-2")],
                ..Default::default()
            }),
        )
        .unwrap();
    assert_eq!(replaced.photos.front, vec![BlobRef::from("front-2")]);

    let responsible = service
        .save_responsible(None, responsible_request(Some(BlobRef::from("lic-1"))))
        .unwrap();
    let kept = service
        .save_responsible(Some(&responsible.id), responsible_request(None))
        .unwrap();
    assert_eq!(kept.license_image, Some(BlobRef::from("lic-1")));

    let repair = service
        .save_repair(None, repair_request(1, None, vec![BlobRef::from("p1")]))
        .unwrap();
    let appended = service
        .save_repair(Some(&repair.id), repair_request(1, None, vec![BlobRef::from("p2")]))
        .unwrap();
    assert_eq!(appended.photos, vec![BlobRef::from("p1"), BlobRef::from("p2")]);
}

#[test]
fn test_file_store_hydration_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (vehicle_id, repair_id, maintenance_id) = {
        let mut store = RecordStore::open_path(dir.path()).unwrap();
        let mut service = FleetService::new(&mut store);
        let vehicle = service.save_vehicle(None, vehicle_request(VehiclePhotos::default())).unwrap();
        let maintenance = service.save_maintenance(None, maintenance_request(vehicle.id)).unwrap();
        let repair = service
            .save_repair(None, repair_request(vehicle.id, Some(&maintenance.id), vec![]))
            .unwrap();
        store.close().unwrap();
        (vehicle.id, repair.id, maintenance.id)
    };

    for key in Collection::keys() {
        assert!(dir.path().join(format!("{key}.json")).exists(), "missing {key}.json");
    }

    let mut reopened = RecordStore::open(FileStore::open(dir.path()).unwrap()).unwrap();
    assert!(reopened.get::<Vehicle>(&vehicle_id).is_some());
    assert_eq!(
        reopened.get::<Repair>(&repair_id).unwrap().maintenance_id.as_deref(),
        Some(maintenance_id.as_str())
    );

    let next = FleetService::new(&mut reopened)
        .save_vehicle(None, vehicle_request(VehiclePhotos::default()))
        .unwrap();
    assert!(next.id > vehicle_id);
}

#[test]
fn test_failed_persistence_keeps_previous_state() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let maintenance = FleetService::new(&mut store)
        .save_maintenance(None, maintenance_request(1))
        .unwrap();

    backend.set_fail_writes(true);
    let err = FleetService::new(&mut store)
        .save_repair(None, repair_request(1, Some(&maintenance.id), vec![]))
        .unwrap_err();
    assert!(err.is_persistence());
    assert!(store.list::<Repair>().is_empty());
    assert_eq!(store.get::<ScheduledMaintenance>(&maintenance.id).unwrap().repair_id, None);
}

#[test]
fn test_costs_export_and_clear_all() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let mut service = FleetService::new(&mut store);
    let tire_change = service
        .save_tire_change(
            None,
            fleet_records::dto::TireChangeRequest {
                vehicle_id: 1,
                change_date: date(2024, 2, 1),
                odometer_km: 30_000,
                provider: String::new(),
                changed_tires: vec![3, 4],
                tire_brand: String::new(),
                tire_model: String::new(),
                tire_serial_numbers: String::new(),
                recommended_life_km: 0,
                next_change_km: 0,
                warranty_duration: 0,
                warranty_unit: WarrantyUnit::Days,
                notes: String::new(),
                photos: vec![],
            },
        )
        .unwrap();
    let cost = service
        .save_cost(
            &tire_change.id,
            None,
            CostRequest {
                unit_price: Decimal::new(100, 0),
                quantity: 3,
                includes_tax: true,
                payment_method: String::new(),
                invoice_number: String::new(),
                notes: String::new(),
            },
        )
        .unwrap();
    assert_eq!(cost.subtotal, Decimal::new(300, 0));
    assert_eq!(cost.tax, Decimal::new(48, 0));
    assert_eq!(cost.total, Decimal::new(300, 0));

    let exported: serde_json::Value = serde_json::from_str(&store.export_json().unwrap()).unwrap();
    for key in Collection::keys() {
        assert!(exported.get(key).is_some(), "export misses {key}");
    }
    assert_eq!(exported["tireChanges"][0]["costs"][0]["vat"], serde_json::json!(48.0));

    store.clear_all().unwrap();
    assert!(store.snapshot().is_empty());
    assert!(backend.raw("tireChanges").is_none());
}

#[test]
fn test_out_of_range_inputs_are_rejected_without_writes() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let mut service = FleetService::new(&mut store);

    let mut long_warranty = repair_request(1, None, vec![]);
    long_warranty.warranty_duration = 1_000_000;
    long_warranty.warranty_unit = WarrantyUnit::Years;
    let err = service.save_repair(None, long_warranty).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let tire_change = service
        .save_tire_change(
            None,
            fleet_records::dto::TireChangeRequest {
                vehicle_id: 1,
                change_date: date(2024, 2, 1),
                odometer_km: 0,
                provider: String::new(),
                changed_tires: vec![1],
                tire_brand: String::new(),
                tire_model: String::new(),
                tire_serial_numbers: String::new(),
                recommended_life_km: 0,
                next_change_km: 0,
                warranty_duration: 1,
                warranty_unit: WarrantyUnit::Years,
                notes: String::new(),
                photos: vec![],
            },
        )
        .unwrap();
    let writes = backend.write_count();
    let err = service
        .save_cost(
            &tire_change.id,
            None,
            CostRequest {
                unit_price: Decimal::MAX,
                quantity: 4_000_000_000,
                includes_tax: true,
                payment_method: String::new(),
                invoice_number: String::new(),
                notes: String::new(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(backend.write_count(), writes);

    let overview = FleetQueryService::new(store.snapshot()).repair_overview(date(2024, 6, 1));
    assert!(overview.is_empty());
    assert!(store.get::<fleet_records::models::TireChange>(&tire_change.id).unwrap().costs.is_empty());
}
