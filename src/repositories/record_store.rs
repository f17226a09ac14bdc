//! Record Store
//!
//! Mantiene las seis colecciones en memoria y las refleja en el almacén
//! durable en cada mutación. Toda mutación se prepara sobre una copia de
//! la instantánea: se aplican los efectos de vínculos, se escribe la
//! instantánea completa y solo entonces se confirma en memoria. Si la
//! escritura falla, la memoria conserva el último estado persistido.

use std::path::Path;

use tracing::{debug, error, info, warn};

use super::collection::{Collection, FleetSnapshot};
use super::record::Record;
use crate::database::{DurableStore, FileStore};
use crate::services::relation_maintainer;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::ids::{IdGenerator, COST_PREFIX};

/// Opciones de apertura del store
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Escribir JSON indentado
    pub pretty_json: bool,
    /// Semilla fija para los tokens opacos (tests)
    pub id_seed: Option<u64>,
}

pub struct RecordStore {
    snapshot: FleetSnapshot,
    backend: Box<dyn DurableStore>,
    ids: IdGenerator,
    options: StoreOptions,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("backend", &self.backend.describe())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Abrir el store sobre un backend, hidratando lo que exista
    pub fn open(backend: impl DurableStore + 'static) -> AppResult<Self> {
        Self::open_with(backend, StoreOptions::default())
    }

    /// Abrir un store respaldado por archivos en `dir`
    pub fn open_path(dir: impl AsRef<Path>) -> AppResult<Self> {
        Self::open(FileStore::open(dir)?)
    }

    pub fn open_with(backend: impl DurableStore + 'static, options: StoreOptions) -> AppResult<Self> {
        let backend: Box<dyn DurableStore> = Box::new(backend);
        let snapshot = FleetSnapshot::load(backend.as_ref()).map_err(|e| {
            error!("❌ Error hidratando colecciones desde {}: {}", backend.describe(), e);
            e
        })?;

        let mut ids = match options.id_seed {
            Some(seed) => IdGenerator::seeded(seed),
            None => IdGenerator::new(),
        };
        ids.observe_numeric(snapshot.max_numeric_id());

        info!(
            "🚚 Store abierto ({}): {} responsables, {} vehículos, {} reparaciones, {} mantenimientos, {} cambios de llantas, {} pagos",
            backend.describe(),
            snapshot.len(Collection::ResponsibleParties),
            snapshot.len(Collection::Vehicles),
            snapshot.len(Collection::Repairs),
            snapshot.len(Collection::ScheduledMaintenance),
            snapshot.len(Collection::TireChanges),
            snapshot.len(Collection::VehicularPayments),
        );

        for issue in relation_maintainer::find_link_issues(&snapshot) {
            warn!("⚠️ Vínculo reparación/mantenimiento inconsistente: {:?}", issue);
        }

        Ok(Self {
            snapshot,
            backend,
            ids,
            options,
        })
    }

    /// Cerrar el store con una última escritura completa
    pub fn close(mut self) -> AppResult<()> {
        let entries = self.snapshot.encode_entries(self.options.pretty_json)?;
        self.backend.write_all(&entries)?;
        info!("👋 Store cerrado ({})", self.backend.describe());
        Ok(())
    }

    pub fn snapshot(&self) -> &FleetSnapshot {
        &self.snapshot
    }

    /// Documento completo de exportación (JSON indentado)
    pub fn export_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot)?)
    }

    pub fn list<R: Record>(&self) -> &[R] {
        R::items(&self.snapshot)
    }

    pub fn get<R: Record>(&self, id: &R::Id) -> Option<&R> {
        R::items(&self.snapshot).iter().find(|r| r.id() == id)
    }

    pub fn contains<R: Record>(&self, id: &R::Id) -> bool {
        self.get::<R>(id).is_some()
    }

    /// Id `COST-…` que no colisiona con ningún costo de ningún cambio de llantas
    pub fn next_cost_id(&mut self) -> String {
        let tire_changes = &self.snapshot.tire_changes;
        self.ids.unique_token(COST_PREFIX, |candidate| {
            tire_changes
                .iter()
                .any(|tc| tc.costs.iter().any(|c| c.id == candidate))
        })
    }

    /// Crear un registro; el id recibido se ignora y se asigna uno nuevo
    pub fn create<R: Record>(&mut self, mut record: R) -> AppResult<R> {
        let mut staged = self.snapshot.clone();
        let id = R::next_id(&mut self.ids, &staged);
        record.set_id(id);
        R::items_mut(&mut staged).push(record.clone());
        let touched = R::after_save(&mut staged, &record)?;

        self.commit(staged, &format!("create {} {}", R::KIND, record.id()))?;
        info!("✅ {} {} creado en '{}' ({} vínculos ajustados)", R::KIND, record.id(), R::COLLECTION, touched);
        Ok(record)
    }

    /// Reemplazar el registro completo con id `id`
    pub fn update<R: Record>(&mut self, id: &R::Id, mut record: R) -> AppResult<R> {
        let mut staged = self.snapshot.clone();
        let slot = R::items_mut(&mut staged)
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found_error(R::KIND, &id.to_string()))?;
        record.set_id(id.clone());
        *slot = record.clone();
        let touched = R::after_save(&mut staged, &record)?;

        self.commit(staged, &format!("update {} {}", R::KIND, id))?;
        info!("✅ {} {} actualizado ({} vínculos ajustados)", R::KIND, id, touched);
        Ok(record)
    }

    /// Borrar un registro; si no existe no hace nada
    pub fn delete<R: Record>(&mut self, id: &R::Id) -> AppResult<()> {
        let mut staged = self.snapshot.clone();
        let items = R::items_mut(&mut staged);
        let Some(position) = items.iter().position(|r| r.id() == id) else {
            debug!("🔍 {} {} no existe, borrado ignorado", R::KIND, id);
            return Ok(());
        };
        let removed = items.remove(position);
        let touched = R::after_delete(&mut staged, &removed);

        self.commit(staged, &format!("delete {} {}", R::KIND, id))?;
        info!("🗑️ {} {} eliminado ({} vínculos limpiados)", R::KIND, id, touched);
        Ok(())
    }

    /// Borrar todas las colecciones, en memoria y en el almacén durable
    pub fn clear_all(&mut self) -> AppResult<()> {
        if let Err(e) = self.backend.remove_all(&Collection::keys()) {
            error!("❌ Error borrando datos de {}: {}", self.backend.describe(), e);
            self.restore_durable_copy();
            return Err(e);
        }
        self.snapshot = FleetSnapshot::default();
        warn!("🧹 Todos los datos de la flota fueron borrados");
        Ok(())
    }

    fn commit(&mut self, staged: FleetSnapshot, operation: &str) -> AppResult<()> {
        let entries = staged.encode_entries(self.options.pretty_json)?;
        if let Err(e) = self.backend.write_all(&entries) {
            error!("❌ Falló la persistencia de '{}': {}", operation, e);
            self.restore_durable_copy();
            return Err(match e {
                AppError::Persistence(_) => e,
                other => AppError::Persistence(other.to_string()),
            });
        }
        self.snapshot = staged;
        debug!("💾 Instantánea persistida tras '{}'", operation);
        Ok(())
    }

    /// Reescribe el último estado confirmado tras un fallo parcial
    fn restore_durable_copy(&mut self) {
        let restored = self
            .snapshot
            .encode_entries(self.options.pretty_json)
            .and_then(|entries| self.backend.write_all(&entries));
        if let Err(e) = restored {
            warn!("⚠️ No se pudo restaurar la copia durable: {}", e);
        }
    }
}
