//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, la catena di autenticazione e le impostazioni
//! di paginazione condivise tra le route.

use crate::core::{AppError, Config};
use crate::core::backend::{AuthChain, EmailBackend};
use crate::dtos::Pagination;
use crate::repositories::{
    DestinationRepository, InviteRepository, TripRepository, UserRepository,
};
use sqlx::SqlitePool;

const DEFAULT_PAGE_SIZE: u32 = 20;
const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per viaggi e membri
    pub trip: TripRepository,

    /// Repository per la gestione degli inviti
    pub invite: InviteRepository,

    /// Repository per le destinazioni
    pub destination: DestinationRepository,

    /// Backend di autenticazione, in ordine di priorità
    pub auth: AuthChain,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Dimensione di pagina di default e massima per le liste
    pub page_size: u32,
    pub max_page_size: u32,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito e la JWT secret.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni SQLite condiviso
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    pub fn new(pool: SqlitePool, jwt_secret: String) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            trip: TripRepository::new(pool.clone()),
            invite: InviteRepository::new(pool.clone()),
            destination: DestinationRepository::new(pool.clone()),
            auth: AuthChain::new().with_backend(EmailBackend::new(pool)),
            jwt_secret,
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Come `new`, con secret e paginazione presi dalla configurazione
    pub fn from_config(pool: SqlitePool, config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            max_page_size: config.max_page_size,
            ..Self::new(pool, config.jwt_secret.clone())
        }
    }

    /// Risolve i parametri di paginazione della richiesta con i limiti configurati
    pub fn pagination(&self, page: Option<u32>, page_size: Option<u32>) -> Result<Pagination, AppError> {
        Pagination::resolve(page, page_size, self.page_size, self.max_page_size)
    }
}
