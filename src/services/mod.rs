//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan operaciones que involucran varios modelos o
//! integraciones externas (el gateway AI en particular).

pub mod auth_service;
pub mod gemini_service;
pub mod lead_import_service;

pub use gemini_service::GeminiService;
