//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella nel database.

pub mod destination;
pub mod enums;
pub mod invite;
pub mod trip;
pub mod user;

// Re-exports per facilitare l'import
pub use destination::{AdminDestinationRow, Destination};
pub use enums::{InviteAction, InviteStatus};
pub use invite::Invite;
pub use trip::Trip;
pub use user::{User, normalize_email};
