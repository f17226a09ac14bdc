//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables son
//! opcionales; un valor presente pero inválido es un error de configuración.

use std::env;
use std::path::PathBuf;

use tracing::Level;

use crate::utils::errors::{config_error, AppResult};

pub const DATA_DIR_VAR: &str = "FLOTA_DATA_DIR";
pub const LOG_LEVEL_VAR: &str = "FLOTA_LOG_LEVEL";
pub const PRETTY_JSON_VAR: &str = "FLOTA_PRETTY_JSON";

const DEFAULT_DATA_DIR: &str = "./data";

/// Configuración del entorno
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    pub data_dir: PathBuf,
    pub log_level: Level,
    pub pretty_json: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_level: Level::INFO,
            pretty_json: false,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del proceso (llamar después de `dotenvy::dotenv()`)
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración con una fuente de variables arbitraria
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = Self::default();

        let data_dir = match lookup(DATA_DIR_VAR).map(|v| v.trim().to_string()) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            Some(dir) => return Err(config_error(DATA_DIR_VAR, &dir)),
            None => defaults.data_dir,
        };

        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(level) => level
                .trim()
                .parse::<Level>()
                .map_err(|_| config_error(LOG_LEVEL_VAR, &level))?,
            None => defaults.log_level,
        };

        let pretty_json = match lookup(PRETTY_JSON_VAR) {
            Some(flag) => parse_flag(&flag).ok_or_else(|| config_error(PRETTY_JSON_VAR, &flag))?,
            None => defaults.pretty_json,
        };

        Ok(Self {
            data_dir,
            log_level,
            pretty_json,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
