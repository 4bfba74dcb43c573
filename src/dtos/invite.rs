//! Invite DTOs - Data Transfer Objects per inviti

use crate::entities::{Invite, InviteStatus, normalize_email};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Invito esposto al client: niente id interno, viaggio per uid
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InviteDTO {
    pub id: Uuid,
    pub trip: Uuid,
    pub email: String,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Invite> for InviteDTO {
    fn from(value: Invite) -> Self {
        Self {
            id: value.uid,
            trip: value.trip_uid,
            email: value.email,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// DTO per creare un nuovo invito (senza uid, status e timestamp)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateInviteDTO {
    pub trip: Uuid,

    #[validate(
        email(message = "Email is not valid"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
}

impl CreateInviteDTO {
    /// Restituisce il DTO con l'email normalizzata
    pub fn normalized(self) -> Self {
        Self {
            trip: self.trip,
            email: normalize_email(&self.email),
        }
    }
}
