//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos del dominio:
//! flota, clientes, agentes, contratos, leads y los resultados AI.

pub mod agent;
pub mod ai;
pub mod car;
pub mod client;
pub mod company;
pub mod contract;
pub mod driver;
pub mod lead;
pub mod session;
