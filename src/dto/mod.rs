//! DTOs de entrada
//!
//! Constructores tipados por entidad: validan los datos capturados antes
//! de construir el registro completo que recibe el store.

pub mod maintenance_dto;
pub mod payment_dto;
pub mod repair_dto;
pub mod responsible_dto;
pub mod tire_change_dto;
pub mod vehicle_dto;

pub use maintenance_dto::MaintenanceRequest;
pub use payment_dto::PaymentRequest;
pub use repair_dto::RepairRequest;
pub use responsible_dto::ResponsibleRequest;
pub use tire_change_dto::{CostRequest, TireChangeRequest};
pub use vehicle_dto::VehicleRequest;
