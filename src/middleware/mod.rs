//! Middleware del sistema
//!
//! Por ahora solo CORS; el shim de sesión no impone middleware de
//! autenticación server-side (documentado como no-frontera de seguridad).

pub mod cors;

pub use cors::cors_layer;
