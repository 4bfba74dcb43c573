//! Trip DTOs - Data Transfer Objects per viaggi

use crate::dtos::UserDTO;
use crate::entities::Trip;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Viaggio come visto dal client: l'id esposto è quello pubblico
#[derive(Serialize, Deserialize, Debug)]
pub struct TripDTO {
    pub id: Uuid,
    pub title: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Trip> for TripDTO {
    fn from(value: Trip) -> Self {
        Self {
            id: value.uid,
            title: value.title,
            owner_id: value.owner_id,
            created_at: value.created_at,
        }
    }
}

/// Dettaglio del viaggio con owner e membri
#[derive(Serialize, Deserialize, Debug)]
pub struct TripDetailDTO {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub owner: Option<UserDTO>,
    pub members: Vec<UserDTO>,
}

/// DTO per creare un nuovo viaggio
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateTripDTO {
    #[validate(length(min = 1, max = 255, message = "Trip title must be between 1 and 255 characters"))]
    pub title: String,
}
