//! Services module
//!
//! Lógica de negocio de la flota: métricas de fechas, cálculo de costos,
//! mantenimiento de vínculos, guardado tipado de registros y consultas
//! derivadas para la presentación.

pub mod cost_calculator;
pub mod date_metrics;
pub mod fleet_query_service;
pub mod fleet_service;
pub mod relation_maintainer;

pub use date_metrics::{Countdown, Urgency};
pub use fleet_query_service::{FleetQueryService, Resolved};
pub use fleet_service::FleetService;
