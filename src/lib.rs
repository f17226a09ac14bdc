//! Núcleo de registros de la flota
//!
//! Responsables, vehículos, reparaciones, mantenimientos programados,
//! cambios de llantas y pagos vehiculares, persistidos como seis
//! colecciones JSON con el vínculo reparación ⇄ mantenimiento siempre
//! simétrico.

pub mod config;
pub mod database;
pub mod dto;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

pub use repositories::{RecordStore, StoreOptions};
pub use utils::errors::{AppError, AppResult};
