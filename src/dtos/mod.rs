//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod destination;
pub mod invite;
pub mod page;
pub mod query;
pub mod trip;
pub mod user;

// Re-exports per facilitare l'import
pub use destination::{
    CreateDestinationDTO, DestinationDTO, DestinationFields, UpdateDestinationDTO,
};
pub use invite::{CreateInviteDTO, InviteDTO};
pub use page::{Page, Pagination};
pub use query::{PageQuery, TripFilterQuery};
pub use trip::{CreateTripDTO, TripDTO, TripDetailDTO};
pub use user::{CreateUserDTO, LoginDTO, UserDTO};
