//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SU SQLX ************************* //

/*
   Le query sono scritte con le funzioni runtime di sqlx (query, query_as, query_scalar)
   più QueryBuilder per i filtri dinamici, così la build non richiede un database
   raggiungibile. Le entity derivano FromRow e i nomi delle colonne nelle SELECT devono
   coincidere con i campi (da qui gli alias tipo `t.uid AS trip_uid`).

   Number of Rows   Method to Call              Returns
   None             .execute(...).await         QueryResult (rows_affected, last_insert_rowid)
   Zero or One      .fetch_optional(...).await  Option<T>
   Exactly One      .fetch_one(...).await       T, RowNotFound se vuoto
   Multiple         .fetch_all(...).await       Vec<T>

   Gli errori sqlx risalgono fino ai service con `?` e diventano AppError.
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod destination;
pub mod invite;
pub mod traits;
pub mod trip;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use destination::DestinationRepository;
pub use invite::{InviteFilter, InviteRepository, NewInvite};
pub use trip::TripRepository;
pub use user::UserRepository;
