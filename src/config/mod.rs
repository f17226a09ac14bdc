//! Configuración del proyecto
//!
//! Variables de entorno que controlan dónde se guardan los datos, el nivel
//! de logging y el formato del JSON persistido.

pub mod environment;

pub use environment::*;
