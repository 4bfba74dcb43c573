//! Destination DTOs - Data Transfer Objects per destinazioni

use crate::core::AppError;
use crate::entities::Destination;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Destinazione esposta al client: viaggio per uid, id interno escluso
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DestinationDTO {
    pub id: Uuid,
    pub trip: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Destination> for DestinationDTO {
    fn from(value: Destination) -> Self {
        Self {
            id: value.uid,
            trip: value.trip_uid,
            title: value.title,
            description: value.description,
            arrival_date: value.arrival_date,
            departure_date: value.departure_date,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// DTO per creare (o sostituire con PUT) una destinazione
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateDestinationDTO {
    pub trip: Uuid,

    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
}

/// DTO per aggiornare parzialmente una destinazione (PATCH)
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateDestinationDTO {
    pub trip: Option<Uuid>,

    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
}

/// Dati già risolti che il repository scrive: trip_id interno al posto dell'uid
#[derive(Debug, Clone)]
pub struct DestinationFields {
    pub trip_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
}

impl DestinationFields {
    /// Applica una PATCH sopra i valori correnti
    pub fn merged(current: &Destination, trip_id: i64, patch: UpdateDestinationDTO) -> Self {
        Self {
            trip_id,
            title: patch.title.unwrap_or_else(|| current.title.clone()),
            description: patch.description.or_else(|| current.description.clone()),
            arrival_date: patch.arrival_date.or(current.arrival_date),
            departure_date: patch.departure_date.or(current.departure_date),
        }
    }

    pub fn check_dates(&self) -> Result<(), AppError> {
        check_date_order(self.arrival_date, self.departure_date)
    }
}

/// La partenza non può precedere l'arrivo
pub fn check_date_order(
    arrival: Option<NaiveDate>,
    departure: Option<NaiveDate>,
) -> Result<(), AppError> {
    match (arrival, departure) {
        (Some(arrival), Some(departure)) if departure < arrival => {
            Err(AppError::bad_request("Validation error")
                .with_details("departure_date must not be before arrival_date"))
        }
        _ => Ok(()),
    }
}
