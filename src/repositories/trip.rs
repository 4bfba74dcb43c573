//! TripRepository - Repository per viaggi e membership

use super::Read;
use crate::dtos::CreateTripDTO;
use crate::entities::Trip;
use chrono::Utc;
use sqlx::{Error, Executor, Sqlite, SqlitePool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Condizione di visibilità: l'utente è owner oppure membro del viaggio `t`.
/// Richiede due bind dello user id.
const VISIBLE_TO_USER: &str = "(t.owner_id = ? OR EXISTS (\
     SELECT 1 FROM trip_members m WHERE m.trip_id = t.id AND m.user_id = ?))";

const SELECT_TRIP: &str = "SELECT t.id, t.uid, t.owner_id, t.title, t.created_at FROM trips t";

// TRIP REPOSITORY
pub struct TripRepository {
    connection_pool: SqlitePool,
}

impl TripRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self, data), fields(owner_id = %owner_id))]
    pub async fn create_for_owner(&self, owner_id: i64, data: &CreateTripDTO) -> Result<Trip, Error> {
        debug!("Creating new trip");
        let uid = Uuid::new_v4();
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO trips (uid, owner_id, title, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(uid)
        .bind(owner_id)
        .bind(&data.title)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Trip created with id {}", new_id);

        Ok(Trip {
            id: new_id,
            uid,
            owner_id,
            title: data.title.clone(),
            created_at: now,
        })
    }

    /// Viaggio per uid, solo se l'utente ne è owner o membro
    #[instrument(skip(self), fields(trip_uid = %uid, user_id = %user_id))]
    pub async fn find_visible_by_uid(&self, uid: &Uuid, user_id: i64) -> Result<Option<Trip>, Error> {
        debug!("Finding visible trip by uid");
        sqlx::query_as::<_, Trip>(&format!(
            "{SELECT_TRIP} WHERE t.uid = ? AND {VISIBLE_TO_USER}"
        ))
        .bind(uid)
        .bind(user_id)
        .bind(user_id)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// Tutti i viaggi di cui l'utente è owner o membro
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_visible(&self, user_id: i64) -> Result<Vec<Trip>, Error> {
        debug!("Listing visible trips");
        let trips = sqlx::query_as::<_, Trip>(&format!(
            "{SELECT_TRIP} WHERE {VISIBLE_TO_USER} ORDER BY t.created_at DESC, t.id DESC"
        ))
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} trips", trips.len());
        Ok(trips)
    }

    #[instrument(skip(self), fields(trip_id = %trip_id))]
    pub async fn member_ids(&self, trip_id: i64) -> Result<Vec<i64>, Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM trip_members WHERE trip_id = ? ORDER BY joined_at, user_id",
        )
        .bind(trip_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    #[instrument(skip(self), fields(trip_id = %trip_id, user_id = %user_id))]
    pub async fn is_member(&self, trip_id: i64, user_id: i64) -> Result<bool, Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM trip_members WHERE trip_id = ? AND user_id = ?",
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(count > 0)
    }

    /// Aggiunge un membro al viaggio, idempotente. Accetta un executor qualsiasi (es. una transazione)
    pub(crate) async fn add_member_with<'e, E>(executor: E, trip_id: i64, user_id: i64) -> Result<(), Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT OR IGNORE INTO trip_members (trip_id, user_id, joined_at) VALUES (?, ?, ?)",
        )
        .bind(trip_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(executor)
        .await?;

        debug!("Member {} added to trip {}", user_id, trip_id);
        Ok(())
    }
}

impl Read<Trip, i64> for TripRepository {
    #[instrument(skip(self), fields(trip_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Trip>, Error> {
        debug!("Reading trip by id");
        sqlx::query_as::<_, Trip>(&format!("{SELECT_TRIP} WHERE t.id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}
