use anyhow::Result;
use dotenvy::dotenv;
use tracing::{error, info, warn};

use fleet_records::config::EnvironmentConfig;
use fleet_records::database::FileStore;
use fleet_records::models::PaymentCategory;
use fleet_records::services::date_metrics;
use fleet_records::services::{Countdown, FleetQueryService, Urgency};
use fleet_records::{RecordStore, StoreOptions};

fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚚 Flota - reporte de estado");
    info!("================================================");

    let backend = match FileStore::open(&config.data_dir) {
        Ok(backend) => backend,
        Err(e) => {
            error!("❌ Error abriendo {}: {}", config.data_dir.display(), e);
            return Err(anyhow::anyhow!("Error de almacenamiento: {}", e));
        }
    };
    info!("📂 Datos en {}", backend.dir().display());
    let store = RecordStore::open_with(
        backend,
        StoreOptions {
            pretty_json: config.pretty_json,
            id_seed: None,
        },
    )?;

    if store.snapshot().is_empty() {
        info!("📭 No hay registros de flota todavía");
        return Ok(());
    }

    let today = date_metrics::today();
    let query = FleetQueryService::new(store.snapshot());

    for responsible in query.responsible_overview(today) {
        info!(
            "👤 {} - licencia: {} días ({}), INE: {} días ({}), vehículo: {}",
            responsible.name,
            responsible.license.days,
            responsible.license.urgency,
            responsible.id_document.days,
            responsible.id_document.urgency,
            responsible.assigned_plates,
        );
    }

    for vehicle in &store.snapshot().vehicles {
        info!("🚐 {} - {} fotos registradas", vehicle.label(), vehicle.photos.total());
        let paid = query.most_recent_payment_per_category(vehicle.id);
        for category in PaymentCategory::ALL.iter().filter(|c| !paid.contains_key(*c)) {
            warn!("💳 {} - sin pago registrado de {}", vehicle.label(), category);
        }
        for deadline in query.payment_deadlines(vehicle.id, today) {
            let line = format!(
                "{} - {}: vence {} ({} días)",
                vehicle.label(),
                deadline.category,
                deadline.due_on,
                deadline.countdown.days
            );
            match deadline.countdown.urgency {
                Urgency::Critical => warn!("💳 {}", line),
                _ => info!("💳 {}", line),
            }
        }
    }

    for repair in query.repair_overview(today) {
        info!(
            "🔧 {} - {} ({}): {} días en taller, garantía {}",
            repair.repair_id,
            repair.vehicle,
            repair.responsible,
            repair.workshop_days,
            warranty_text(repair.warranty),
        );
    }

    for maintenance in query.maintenance_overview(today) {
        let line = format!(
            "{} - {}: {} días para el servicio",
            maintenance.maintenance_id, maintenance.vehicle, maintenance.due.days
        );
        match maintenance.due.urgency {
            Urgency::Critical => warn!("🛠️ {}", line),
            _ => info!("🛠️ {}", line),
        }
    }

    for tire_change in query.tire_change_overview(today) {
        let total = tire_change
            .costs_total
            .map(|t| format!("${}", t))
            .unwrap_or_else(|| "monto fuera de rango".to_string());
        info!(
            "🛞 {} - {}: garantía {}, {} costos por {}",
            tire_change.tire_change_id,
            tire_change.vehicle,
            warranty_text(tire_change.warranty),
            tire_change.cost_lines,
            total,
        );
    }

    info!("✅ Reporte completado");
    Ok(())
}

fn warranty_text(warranty: Option<Countdown>) -> String {
    match warranty {
        Some(countdown) => format!("{} días ({})", countdown.days, countdown.urgency),
        None => "fuera de rango".to_string(),
    }
}
