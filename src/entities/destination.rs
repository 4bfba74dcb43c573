//! Destination entity - Entità destinazione di un viaggio

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Destination {
    pub id: i64,
    pub uid: Uuid,
    pub trip_id: i64,
    pub trip_uid: Uuid, // in join da trips
    pub title: String,
    pub description: Option<String>,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Riga della lista amministrativa: titolo, viaggio, id interno
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct AdminDestinationRow {
    pub id: i64,
    pub uid: Uuid,
    pub title: String,
    pub trip: String,
}
