//! DestinationRepository - Repository per le destinazioni dei viaggi

use super::{Create, Delete, Read, Update};
use crate::dtos::{DestinationFields, Pagination};
use crate::entities::{AdminDestinationRow, Destination};
use chrono::Utc;
use sqlx::{Error, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const SELECT_DESTINATION: &str = "SELECT d.id, d.uid, d.trip_id, t.uid AS trip_uid, d.title, \
     d.description, d.arrival_date, d.departure_date, d.created_at, d.updated_at \
     FROM destinations d JOIN trips t ON t.id = d.trip_id";

// DESTINATION REPOSITORY
pub struct DestinationRepository {
    connection_pool: SqlitePool,
}

impl DestinationRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    fn push_visible(builder: &mut QueryBuilder<'_, Sqlite>, user_id: i64, trip_uid: Option<Uuid>) {
        builder
            .push(" WHERE (t.owner_id = ")
            .push_bind(user_id)
            .push(" OR EXISTS (SELECT 1 FROM trip_members m WHERE m.trip_id = t.id AND m.user_id = ")
            .push_bind(user_id)
            .push("))");
        if let Some(trip_uid) = trip_uid {
            builder.push(" AND t.uid = ").push_bind(trip_uid);
        }
    }

    /// Destinazione per uid, solo se il viaggio è visibile all'utente
    #[instrument(skip(self), fields(destination_uid = %uid, user_id = %user_id))]
    pub async fn find_visible_by_uid(&self, uid: &Uuid, user_id: i64) -> Result<Option<Destination>, Error> {
        debug!("Finding visible destination");
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_DESTINATION);
        Self::push_visible(&mut builder, user_id, None);
        builder.push(" AND d.uid = ").push_bind(*uid);

        builder
            .build_query_as::<Destination>()
            .fetch_optional(&self.connection_pool)
            .await
    }

    #[instrument(skip(self), fields(user_id = %user_id, page = %pagination.page))]
    pub async fn list_visible(
        &self,
        user_id: i64,
        trip_uid: Option<Uuid>,
        pagination: Pagination,
    ) -> Result<Vec<Destination>, Error> {
        debug!("Listing visible destinations");
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_DESTINATION);
        Self::push_visible(&mut builder, user_id, trip_uid);
        builder
            .push(" ORDER BY d.arrival_date IS NULL, d.arrival_date, d.id LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        builder
            .build_query_as::<Destination>()
            .fetch_all(&self.connection_pool)
            .await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn count_visible(&self, user_id: i64, trip_uid: Option<Uuid>) -> Result<i64, Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(*) FROM destinations d JOIN trips t ON t.id = d.trip_id",
        );
        Self::push_visible(&mut builder, user_id, trip_uid);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.connection_pool)
            .await
    }

    /// Vista tabellare per gli operatori: titolo, viaggio, id interno
    #[instrument(skip(self), fields(page = %pagination.page))]
    pub async fn list_admin(&self, pagination: Pagination) -> Result<Vec<AdminDestinationRow>, Error> {
        debug!("Listing destinations for admin");
        sqlx::query_as::<_, AdminDestinationRow>(
            r#"
            SELECT d.id, d.uid, d.title, t.title AS trip
            FROM destinations d JOIN trips t ON t.id = d.trip_id
            ORDER BY d.title, d.id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.connection_pool)
        .await
    }

    pub async fn count_all(&self) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM destinations")
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Create<Destination, DestinationFields> for DestinationRepository {
    #[instrument(skip(self, data), fields(trip_id = %data.trip_id))]
    async fn create(&self, data: &DestinationFields) -> Result<Destination, Error> {
        debug!("Creating new destination");
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO destinations
                (uid, trip_id, title, description, arrival_date, departure_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.trip_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.arrival_date)
        .bind(data.departure_date)
        .bind(now)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Destination created with id {}", new_id);

        self.read(&new_id).await?.ok_or(Error::RowNotFound)
    }
}

impl Read<Destination, i64> for DestinationRepository {
    #[instrument(skip(self), fields(destination_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Destination>, Error> {
        sqlx::query_as::<_, Destination>(&format!("{SELECT_DESTINATION} WHERE d.id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<Destination, DestinationFields, i64> for DestinationRepository {
    #[instrument(skip(self, data), fields(destination_id = %id))]
    async fn update(&self, id: &i64, data: &DestinationFields) -> Result<Destination, Error> {
        debug!("Updating destination");
        let result = sqlx::query(
            r#"
            UPDATE destinations
            SET trip_id = ?, title = ?, description = ?, arrival_date = ?, departure_date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(data.trip_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.arrival_date)
        .bind(data.departure_date)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        info!("Destination updated successfully");
        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for DestinationRepository {
    #[instrument(skip(self), fields(destination_id = %id))]
    async fn delete(&self, id: &i64) -> Result<(), Error> {
        debug!("Deleting destination");
        sqlx::query("DELETE FROM destinations WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        info!("Destination deleted successfully");
        Ok(())
    }
}
