//! Repositorios
//!
//! Colecciones de la flota, contrato común de registros y el store que
//! las refleja en el almacén durable.

pub mod collection;
pub mod record;
pub mod record_store;

pub use collection::{Collection, FleetSnapshot};
pub use record::Record;
pub use record_store::{RecordStore, StoreOptions};
