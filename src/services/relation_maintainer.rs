//! Mantenimiento del vínculo Reparación ⇄ Mantenimiento programado
//!
//! `Repair::maintenance_id` y `ScheduledMaintenance::repair_id` deben estar
//! ambos vacíos o apuntarse mutuamente. Estas funciones son las únicas que
//! escriben el lado espejo, y siempre corren sobre la instantánea en
//! preparación del store, dentro de la misma mutación que las dispara.
//!
//! Además del reflejo directo se limpian los vínculos inversos que quedarían
//! obsoletos al reasignar o desvincular un registro.

use tracing::{debug, warn};

use crate::models::{Repair, ScheduledMaintenance};
use crate::repositories::collection::FleetSnapshot;
use crate::utils::errors::{validation_error, AppResult};

/// Tras guardar una reparación, reflejar su vínculo en los mantenimientos.
///
/// Devuelve cuántos registros del otro lado se modificaron.
pub fn on_repair_saved(snapshot: &mut FleetSnapshot, repair: &Repair) -> AppResult<usize> {
    let mut touched = 0;

    if let Some(maintenance_id) = &repair.maintenance_id {
        let target = snapshot
            .maintenances
            .iter_mut()
            .find(|m| &m.id == maintenance_id)
            .ok_or_else(|| validation_error("maintenance_id", "linked maintenance does not exist"))?;

        let displaced = target.repair_id.replace(repair.id.clone());
        if displaced.as_deref() != Some(repair.id.as_str()) {
            touched += 1;
        }

        // El mantenimiento estaba vinculado a otra reparación: romper ese par
        if let Some(previous_repair) = displaced.filter(|r| r != &repair.id) {
            for other in snapshot
                .repairs
                .iter_mut()
                .filter(|r| r.id == previous_repair && r.maintenance_id.as_ref() == Some(maintenance_id))
            {
                warn!(
                    "🔗 Mantenimiento {} reasignado: se desvincula la reparación {}",
                    maintenance_id, other.id
                );
                other.maintenance_id = None;
                touched += 1;
            }
        }
    }

    for stale in snapshot.maintenances.iter_mut().filter(|m| {
        m.repair_id.as_ref() == Some(&repair.id) && repair.maintenance_id.as_ref() != Some(&m.id)
    }) {
        debug!("🧹 Vínculo obsoleto {} -> {} eliminado", stale.id, repair.id);
        stale.repair_id = None;
        touched += 1;
    }

    Ok(touched)
}

/// Simétrico de [`on_repair_saved`]
pub fn on_maintenance_saved(
    snapshot: &mut FleetSnapshot,
    maintenance: &ScheduledMaintenance,
) -> AppResult<usize> {
    let mut touched = 0;

    if let Some(repair_id) = &maintenance.repair_id {
        let target = snapshot
            .repairs
            .iter_mut()
            .find(|r| &r.id == repair_id)
            .ok_or_else(|| validation_error("repair_id", "linked repair does not exist"))?;

        let displaced = target.maintenance_id.replace(maintenance.id.clone());
        if displaced.as_deref() != Some(maintenance.id.as_str()) {
            touched += 1;
        }

        if let Some(previous_maintenance) = displaced.filter(|m| m != &maintenance.id) {
            for other in snapshot.maintenances.iter_mut().filter(|m| {
                m.id == previous_maintenance && m.repair_id.as_ref() == Some(repair_id)
            }) {
                warn!(
                    "🔗 Reparación {} reasignada: se desvincula el mantenimiento {}",
                    repair_id, other.id
                );
                other.repair_id = None;
                touched += 1;
            }
        }
    }

    for stale in snapshot.repairs.iter_mut().filter(|r| {
        r.maintenance_id.as_ref() == Some(&maintenance.id)
            && maintenance.repair_id.as_ref() != Some(&r.id)
    }) {
        debug!("🧹 Vínculo obsoleto {} -> {} eliminado", stale.id, maintenance.id);
        stale.maintenance_id = None;
        touched += 1;
    }

    Ok(touched)
}

/// Tras borrar una reparación, limpiar los mantenimientos que la apuntaban
pub fn on_repair_deleted(snapshot: &mut FleetSnapshot, repair_id: &str) -> usize {
    let mut touched = 0;
    for m in snapshot
        .maintenances
        .iter_mut()
        .filter(|m| m.repair_id.as_deref() == Some(repair_id))
    {
        m.repair_id = None;
        touched += 1;
    }
    touched
}

/// Tras borrar un mantenimiento, limpiar las reparaciones que lo apuntaban
pub fn on_maintenance_deleted(snapshot: &mut FleetSnapshot, maintenance_id: &str) -> usize {
    let mut touched = 0;
    for r in snapshot
        .repairs
        .iter_mut()
        .filter(|r| r.maintenance_id.as_deref() == Some(maintenance_id))
    {
        r.maintenance_id = None;
        touched += 1;
    }
    touched
}

/// Par reparación/mantenimiento que no se apunta mutuamente
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkIssue {
    /// La reparación apunta a un mantenimiento que no existe
    RepairDangling { repair_id: String, maintenance_id: String },
    /// El mantenimiento apunta a una reparación que no existe
    MaintenanceDangling { maintenance_id: String, repair_id: String },
    /// La reparación apunta al mantenimiento, pero este no la apunta a ella
    RepairOneWay { repair_id: String, maintenance_id: String },
    /// El mantenimiento apunta a la reparación, pero esta no lo apunta a él
    MaintenanceOneWay { maintenance_id: String, repair_id: String },
}

/// Auditoría del invariante de simetría (datos heredados, importaciones)
pub fn find_link_issues(snapshot: &FleetSnapshot) -> Vec<LinkIssue> {
    let mut issues = Vec::new();

    for repair in &snapshot.repairs {
        let Some(maintenance_id) = &repair.maintenance_id else { continue };
        match snapshot.maintenances.iter().find(|m| &m.id == maintenance_id) {
            None => issues.push(LinkIssue::RepairDangling {
                repair_id: repair.id.clone(),
                maintenance_id: maintenance_id.clone(),
            }),
            Some(m) if m.repair_id.as_ref() != Some(&repair.id) => {
                issues.push(LinkIssue::RepairOneWay {
                    repair_id: repair.id.clone(),
                    maintenance_id: maintenance_id.clone(),
                })
            }
            Some(_) => {}
        }
    }

    for maintenance in &snapshot.maintenances {
        let Some(repair_id) = &maintenance.repair_id else { continue };
        match snapshot.repairs.iter().find(|r| &r.id == repair_id) {
            None => issues.push(LinkIssue::MaintenanceDangling {
                maintenance_id: maintenance.id.clone(),
                repair_id: repair_id.clone(),
            }),
            Some(r) if r.maintenance_id.as_ref() != Some(&maintenance.id) => {
                issues.push(LinkIssue::MaintenanceOneWay {
                    maintenance_id: maintenance.id.clone(),
                    repair_id: repair_id.clone(),
                })
            }
            Some(_) => {}
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordStatus, WarrantyUnit};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn repair(id: &str, maintenance_id: Option<&str>) -> Repair {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        Repair {
            id: id.to_string(),
            vehicle_id: 1,
            responsible_id: 2,
            entry_date: date,
            exit_date: date,
            odometer_km: 0,
            provider: String::new(),
            categories: Vec::new(),
            description: String::new(),
            warranty_duration: 0,
            warranty_unit: WarrantyUnit::Days,
            invoice_id: String::new(),
            payment_method: String::new(),
            payment_notes: String::new(),
            amount: Decimal::ZERO,
            includes_tax: false,
            photos: Vec::new(),
            maintenance_id: maintenance_id.map(str::to_string),
            status: RecordStatus::Scheduled,
        }
    }

    fn maintenance(id: &str, repair_id: Option<&str>) -> ScheduledMaintenance {
        ScheduledMaintenance {
            id: id.to_string(),
            vehicle_id: 1,
            responsible_id: 2,
            scheduled_odometer_km: 10_000,
            due_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            approximate_cost: Decimal::ZERO,
            description: String::new(),
            omission_consequence: String::new(),
            repair_id: repair_id.map(str::to_string),
            status: RecordStatus::Scheduled,
        }
    }

    #[test]
    fn test_repair_save_mirrors_link() {
        let mut snapshot = FleetSnapshot::default();
        snapshot.maintenances.push(maintenance("MANT-1", None));
        let r1 = repair("REP-1", Some("MANT-1"));
        snapshot.repairs.push(r1.clone());

        let touched = on_repair_saved(&mut snapshot, &r1).unwrap();
        assert_eq!(touched, 1);
        assert_eq!(snapshot.maintenances[0].repair_id.as_deref(), Some("REP-1"));
        assert!(find_link_issues(&snapshot).is_empty());
    }

    #[test]
    fn test_repair_save_rejects_missing_maintenance() {
        let mut snapshot = FleetSnapshot::default();
        let r1 = repair("REP-1", Some("MANT-missing"));
        snapshot.repairs.push(r1.clone());
        assert!(on_repair_saved(&mut snapshot, &r1).is_err());
    }

    #[test]
    fn test_repoint_clears_stale_reverse_link() {
        let mut snapshot = FleetSnapshot::default();
        snapshot.maintenances.push(maintenance("MANT-1", Some("REP-1")));
        snapshot.maintenances.push(maintenance("MANT-2", None));
        let r1 = repair("REP-1", Some("MANT-2"));
        snapshot.repairs.push(r1.clone());

        on_repair_saved(&mut snapshot, &r1).unwrap();
        assert_eq!(snapshot.maintenances[0].repair_id, None);
        assert_eq!(snapshot.maintenances[1].repair_id.as_deref(), Some("REP-1"));
        assert!(find_link_issues(&snapshot).is_empty());
    }

    #[test]
    fn test_taking_over_maintenance_unlinks_previous_repair() {
        let mut snapshot = FleetSnapshot::default();
        snapshot.maintenances.push(maintenance("MANT-1", Some("REP-1")));
        snapshot.repairs.push(repair("REP-1", Some("MANT-1")));
        let r2 = repair("REP-2", Some("MANT-1"));
        snapshot.repairs.push(r2.clone());

        on_repair_saved(&mut snapshot, &r2).unwrap();
        assert_eq!(snapshot.repairs[0].maintenance_id, None);
        assert_eq!(snapshot.maintenances[0].repair_id.as_deref(), Some("REP-2"));
        assert!(find_link_issues(&snapshot).is_empty());
    }

    #[test]
    fn test_taking_over_repair_unlinks_previous_maintenance() {
        let mut snapshot = FleetSnapshot::default();
        snapshot.repairs.push(repair("REP-1", Some("MANT-1")));
        snapshot.maintenances.push(maintenance("MANT-1", Some("REP-1")));
        let m2 = maintenance("MANT-2", Some("REP-1"));
        snapshot.maintenances.push(m2.clone());

        let touched = on_maintenance_saved(&mut snapshot, &m2).unwrap();
        assert_eq!(touched, 2);
        assert_eq!(snapshot.maintenances[0].repair_id, None);
        assert_eq!(snapshot.repairs[0].maintenance_id.as_deref(), Some("MANT-2"));
        assert!(find_link_issues(&snapshot).is_empty());
    }

    #[test]
    fn test_maintenance_save_rejects_missing_repair() {
        let mut snapshot = FleetSnapshot::default();
        let m1 = maintenance("MANT-1", Some("REP-missing"));
        snapshot.maintenances.push(m1.clone());
        assert!(on_maintenance_saved(&mut snapshot, &m1).is_err());
    }

    #[test]
    fn test_maintenance_save_mirrors_and_unlink() {
        let mut snapshot = FleetSnapshot::default();
        snapshot.repairs.push(repair("REP-1", None));
        let m1 = maintenance("MANT-1", Some("REP-1"));
        snapshot.maintenances.push(m1.clone());
        on_maintenance_saved(&mut snapshot, &m1).unwrap();
        assert_eq!(snapshot.repairs[0].maintenance_id.as_deref(), Some("MANT-1"));

        let unlinked = maintenance("MANT-1", None);
        snapshot.maintenances[0] = unlinked.clone();
        on_maintenance_saved(&mut snapshot, &unlinked).unwrap();
        assert_eq!(snapshot.repairs[0].maintenance_id, None);
    }

    #[test]
    fn test_deletes_clear_counterparts() {
        let mut snapshot = FleetSnapshot::default();
        snapshot.repairs.push(repair("REP-1", Some("MANT-1")));
        snapshot.maintenances.push(maintenance("MANT-1", Some("REP-1")));

        assert_eq!(on_repair_deleted(&mut snapshot, "REP-1"), 1);
        assert_eq!(snapshot.maintenances[0].repair_id, None);

        assert_eq!(on_maintenance_deleted(&mut snapshot, "MANT-1"), 1);
        assert_eq!(snapshot.repairs[0].maintenance_id, None);
        assert_eq!(on_maintenance_deleted(&mut snapshot, "MANT-1"), 0);
    }

    #[test]
    fn test_find_link_issues_reports_one_way_and_dangling() {
        let mut snapshot = FleetSnapshot::default();
        snapshot.repairs.push(repair("REP-1", Some("MANT-1")));
        snapshot.repairs.push(repair("REP-2", Some("MANT-gone")));
        snapshot.maintenances.push(maintenance("MANT-1", None));

        let issues = find_link_issues(&snapshot);
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&LinkIssue::RepairOneWay {
            repair_id: "REP-1".into(),
            maintenance_id: "MANT-1".into(),
        }));
        assert!(issues.contains(&LinkIssue::RepairDangling {
            repair_id: "REP-2".into(),
            maintenance_id: "MANT-gone".into(),
        }));
    }
}
