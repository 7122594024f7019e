//! Store de dominio en memoria
//!
//! Única fuente de verdad de los datos de negocio durante la sesión.
//! No hay persistencia: un reinicio del proceso descarta todo.

pub mod domain_store;

pub use domain_store::*;
