//! Almacén durable en disco
//!
//! Un archivo `<clave>.json` por colección dentro de un directorio. Cada
//! escritura pasa primero por un archivo temporal y luego se renombra,
//! así un archivo nunca queda escrito a medias.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use super::durable::DurableStore;
use crate::utils::errors::{persistence_error, AppResult};

const EXTENSION: &str = "json";
const TEMP_SUFFIX: &str = "json.tmp";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Abrir (y crear si no existe) el directorio de datos
    pub fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            error!("❌ No se pudo crear el directorio de datos {}: {}", dir.display(), e);
            persistence_error("open data directory", &e.to_string())
        })?;
        info!("📂 Almacén en disco abierto: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, EXTENSION))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, TEMP_SUFFIX))
    }
}

impl DurableStore for FileStore {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => {
                debug!("📥 Leída clave '{}' ({} bytes)", key, contents.len());
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(persistence_error(&format!("read '{}'", key), &e.to_string())),
        }
    }

    fn write_all(&mut self, entries: &[(&str, String)]) -> AppResult<()> {
        // Primero todos los temporales, después los renombres
        for (key, value) in entries {
            fs::write(self.temp_path_for(key), value)
                .map_err(|e| persistence_error(&format!("write '{}'", key), &e.to_string()))?;
        }
        for (key, _) in entries {
            fs::rename(self.temp_path_for(key), self.path_for(key))
                .map_err(|e| persistence_error(&format!("commit '{}'", key), &e.to_string()))?;
        }
        debug!("💾 {} claves escritas en {}", entries.len(), self.dir.display());
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            match fs::remove_file(self.path_for(key)) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(persistence_error(&format!("remove '{}'", key), &e.to_string()))
                }
            }
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.dir.display())
    }
}
