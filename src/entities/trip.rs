//! Trip entity - Entità viaggio

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Trip {
    pub id: i64,
    pub uid: Uuid, // identificativo pubblico
    pub owner_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
