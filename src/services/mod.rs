//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod admin;
pub mod auth;
pub mod destination;
pub mod invite;
pub mod trip;

// Re-exports per facilitare l'import
pub use admin::list_admin_destinations;
pub use auth::{get_me, login_user, register_user};
pub use destination::{
    create_destination, delete_destination, get_destination, list_destinations,
    replace_destination, update_destination,
};
pub use invite::{
    accept_invite, cancel_invite, create_invite, get_public_invite, list_invites,
    list_pending_invites, reject_invite,
};
pub use trip::{create_trip, get_trip, list_trips};

use crate::core::AppError;
use axum::{http::StatusCode, response::IntoResponse};
use tracing::warn;
use uuid::Uuid;

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}

/// Uid pubblico preso dal path. Un valore malformato non può esistere: NOT_FOUND come un uid sconosciuto.
pub(crate) fn parse_uid(raw: &str, not_found: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| {
        warn!("Malformed uid in path: {}", raw);
        AppError::not_found(not_found)
    })
}
