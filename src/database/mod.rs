//! Almacenamiento durable
//!
//! Backends clave-valor donde se reflejan las colecciones del store.

pub mod durable;
pub mod file_store;
pub mod memory_store;

pub use durable::DurableStore;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
