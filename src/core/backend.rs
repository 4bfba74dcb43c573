//! Authentication backends - Catena di strategie per risolvere credenziali in utenti
//!
//! Ogni backend restituisce `Ok(Some(user))` se riconosce le credenziali,
//! `Ok(None)` se non le riconosce (fallimento silenzioso, si passa al successivo)
//! e `Err` solo per errori infrastrutturali, che interrompono la catena.

use crate::entities::{User, normalize_email};
use crate::repositories::{Read, UserRepository};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Credenziali presentate al login; lo username è un'email
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Risolve le credenziali in un utente
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<User>, sqlx::Error>;

    /// Risolve un utente a partire dal suo id interno
    async fn get_user(&self, user_id: i64) -> Result<Option<User>, sqlx::Error>;
}

/// Backend email + password
pub struct EmailBackend {
    users: UserRepository,
}

impl EmailBackend {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }
}

#[async_trait]
impl AuthBackend for EmailBackend {
    #[instrument(skip(self, credentials))]
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<User>, sqlx::Error> {
        let email = normalize_email(&credentials.username);
        let Some(user) = self.users.find_by_email(&email).await? else {
            debug!("No user with this email");
            return Ok(None);
        };

        if user.verify_password(&credentials.password) {
            Ok(Some(user))
        } else {
            debug!("Password mismatch");
            Ok(None)
        }
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        self.users.read(&user_id).await
    }
}

/// Lista ordinata di backend: vince il primo che riconosce l'utente
#[derive(Clone, Default)]
pub struct AuthChain {
    backends: Vec<Arc<dyn AuthBackend>>,
}

impl AuthChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: impl AuthBackend + 'static) -> Self {
        self.backends.push(Arc::new(backend));
        self
    }

    #[instrument(skip(self, credentials), fields(backends = self.backends.len()))]
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Option<User>, sqlx::Error> {
        for backend in &self.backends {
            if let Some(user) = backend.authenticate(credentials).await? {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    #[instrument(skip(self), fields(backends = self.backends.len()))]
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        for backend in &self.backends {
            if let Some(user) = backend.get_user(user_id).await? {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }
}
