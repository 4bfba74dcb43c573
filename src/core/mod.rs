//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione, JWT e backend di autenticazione
//! - Configurazione
//! - Gestione errori
//! - Stato applicazione

pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{Claims, authentication_middleware, decode_jwt, encode_jwt, staff_middleware};
pub use backend::{AuthBackend, AuthChain, Credentials, EmailBackend};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
