//! Modelos del sistema
//!
//! Este módulo contiene los registros de la flota tal como se persisten:
//! las claves JSON siguen el formato de datos existente.

pub mod blob;
pub mod common;
pub mod maintenance;
pub mod payment;
pub mod repair;
pub mod responsible;
pub mod tire_change;
pub mod vehicle;

pub use blob::{BlobMerge, BlobRef, BlobResolver, DataUrlResolver};
pub use common::{RecordStatus, WarrantyUnit};
pub use maintenance::ScheduledMaintenance;
pub use payment::{PaymentCategory, VehicularPayment};
pub use repair::Repair;
pub use responsible::ResponsibleParty;
pub use tire_change::{Cost, TireChange};
pub use vehicle::{Vehicle, VehiclePhotos};
