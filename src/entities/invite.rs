//! Invite entity - Entità invito

use super::enums::InviteStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Invito letto dal database, con uid e owner del viaggio già in join
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Invite {
    pub id: i64,
    pub uid: Uuid,
    pub trip_id: i64,
    pub trip_uid: Uuid,
    pub trip_owner_id: i64,
    pub email: String,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invite {
    pub fn is_trip_owner(&self, user_id: i64) -> bool {
        self.trip_owner_id == user_id
    }

    pub fn is_addressed_to(&self, email: &str) -> bool {
        self.email == email
    }
}

impl fmt::Display for Invite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {}", self.email, self.trip_uid)
    }
}
