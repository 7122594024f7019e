//! Controllers del sistema
//!
//! Validación de requests y orquestación entre el store de dominio
//! y el gateway AI, una clase por entidad.

pub mod agent_controller;
pub mod auth_controller;
pub mod client_controller;
pub mod company_controller;
pub mod contract_controller;
pub mod fleet_controller;
pub mod lead_controller;
