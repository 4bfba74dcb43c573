//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use self::core::{AppError, AppState, Config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/auth", configure_auth_routes())
        .nest("/users", configure_user_routes(state.clone()))
        .nest("/trips", configure_trip_routes(state.clone()))
        .nest("/invites", configure_invite_routes(state.clone()))
        .nest("/public", configure_public_routes())
        .nest("/destinations", configure_destination_routes(state.clone()))
        .nest("/admin", configure_admin_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Configura le routes di autenticazione (login, register)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
}

/// Configura le routes per l'utente corrente
fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/me", get(get_me))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per i viaggi
fn configure_trip_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/{trip_uid}", get(get_trip))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per la gestione degli inviti
fn configure_invite_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_invites).post(create_invite))
        .route("/pending", get(list_pending_invites))
        .route("/{invite_uid}/cancel", post(cancel_invite))
        .route("/{invite_uid}/accept", post(accept_invite))
        .route("/{invite_uid}/reject", post(reject_invite))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Rotte senza autenticazione: consultazione di un invito pending
fn configure_public_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new().route("/invites/{invite_uid}", get(get_public_invite))
}

/// Configura le routes per le destinazioni
fn configure_destination_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_destinations).post(create_destination))
        .route(
            "/{destination_uid}",
            get(get_destination)
                .put(replace_destination)
                .patch(update_destination)
                .delete(delete_destination),
        )
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes amministrative (autenticazione + staff)
fn configure_admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::{authentication_middleware, staff_middleware};
    use services::*;

    // L'ultimo layer aggiunto è il primo a essere eseguito
    Router::new()
        .route("/destinations", get(list_admin_destinations))
        .layer(middleware::from_fn(staff_middleware))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
