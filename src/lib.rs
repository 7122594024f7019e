//! RentSync AI - Backend de gestión para agencias de alquiler de coches
//!
//! Flota, clientes, agentes (mandatos), contratos y leads de marketing,
//! con un gateway hacia el servicio generativo de Gemini para copywriting,
//! análisis de riesgo y recomendación de vehículos.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;
