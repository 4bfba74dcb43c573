//! InviteRepository - Repository per la gestione degli inviti
//!
//! Le letture fanno join con `trips` per avere uid e owner del viaggio.
//! Le transizioni di stato sono UPDATE condizionali su `status = 'pending'`:
//! se due richieste concorrenti provano a chiudere lo stesso invito, solo la
//! prima modifica la riga, la seconda vede zero righe e riceve `RowNotFound`.

use super::trip::TripRepository;
use super::{Create, Read};
use crate::dtos::Pagination;
use crate::entities::{Invite, InviteAction, InviteStatus};
use chrono::Utc;
use sqlx::{Error, Executor, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const SELECT_INVITE: &str = "SELECT i.id, i.uid, i.trip_id, t.uid AS trip_uid, \
     t.owner_id AS trip_owner_id, i.email, i.status, i.created_at, i.updated_at \
     FROM invites i JOIN trips t ON t.id = i.trip_id";

/// Dati per un nuovo invito; l'email deve essere già normalizzata
#[derive(Debug, Clone)]
pub struct NewInvite {
    pub trip_id: i64,
    pub email: String,
}

/// Ambito di visibilità di un utente sugli inviti, con filtri opzionali
#[derive(Debug, Clone, Copy)]
pub struct InviteFilter {
    pub user_id: i64,
    pub trip_uid: Option<Uuid>,
    pub status: Option<InviteStatus>,
}

impl InviteFilter {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id,
            trip_uid: None,
            status: None,
        }
    }

    pub fn trip(mut self, trip_uid: Option<Uuid>) -> Self {
        self.trip_uid = trip_uid;
        self
    }

    pub fn pending(mut self) -> Self {
        self.status = Some(InviteStatus::Pending);
        self
    }

    /// Aggiunge il WHERE con owner/membro e i filtri opzionali
    fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        builder
            .push(" WHERE (t.owner_id = ")
            .push_bind(self.user_id)
            .push(" OR EXISTS (SELECT 1 FROM trip_members m WHERE m.trip_id = t.id AND m.user_id = ")
            .push_bind(self.user_id)
            .push("))");

        if let Some(trip_uid) = self.trip_uid {
            builder.push(" AND t.uid = ").push_bind(trip_uid);
        }
        if let Some(status) = self.status {
            builder.push(" AND i.status = ").push_bind(status);
        }
    }
}

//INVITE REPOSITORY
pub struct InviteRepository {
    connection_pool: SqlitePool,
}

impl InviteRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Invito pending per uid, senza restrizioni di visibilità
    #[instrument(skip(self), fields(invite_uid = %uid))]
    pub async fn find_pending_by_uid(&self, uid: &Uuid) -> Result<Option<Invite>, Error> {
        debug!("Finding pending invite by uid");
        sqlx::query_as::<_, Invite>(&format!("{SELECT_INVITE} WHERE i.uid = ? AND i.status = ?"))
            .bind(uid)
            .bind(InviteStatus::Pending)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Invito per uid dentro l'ambito del filtro
    #[instrument(skip(self), fields(invite_uid = %uid, user_id = %filter.user_id))]
    pub async fn find_in_scope(&self, filter: &InviteFilter, uid: &Uuid) -> Result<Option<Invite>, Error> {
        debug!("Finding invite in user scope");
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_INVITE);
        filter.push_where(&mut builder);
        builder.push(" AND i.uid = ").push_bind(*uid);

        builder
            .build_query_as::<Invite>()
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Pagina di inviti visibili secondo il filtro, più recenti prima
    #[instrument(skip(self), fields(user_id = %filter.user_id, page = %pagination.page))]
    pub async fn list(&self, filter: &InviteFilter, pagination: Pagination) -> Result<Vec<Invite>, Error> {
        debug!("Listing invites");
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_INVITE);
        filter.push_where(&mut builder);
        builder
            .push(" ORDER BY i.created_at DESC, i.id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let invites = builder
            .build_query_as::<Invite>()
            .fetch_all(&self.connection_pool)
            .await?;

        debug!("Found {} invites", invites.len());
        Ok(invites)
    }

    #[instrument(skip(self), fields(user_id = %filter.user_id))]
    pub async fn count(&self, filter: &InviteFilter) -> Result<i64, Error> {
        let mut builder =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM invites i JOIN trips t ON t.id = i.trip_id");
        filter.push_where(&mut builder);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.connection_pool)
            .await
    }

    /// Esiste già un invito (in qualsiasi stato) per questa coppia viaggio/email?
    #[instrument(skip(self), fields(trip_id = %trip_id))]
    pub async fn exists_for(&self, trip_id: i64, email: &str) -> Result<bool, Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM invites WHERE trip_id = ? AND email = ?",
        )
        .bind(trip_id)
        .bind(email)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(count > 0)
    }

    /// Porta un invito pending nello stato finale dell'azione.
    /// `RowNotFound` se l'invito non esiste o non è più pending.
    #[instrument(skip(self), fields(invite_id = %invite_id, action = %action))]
    pub async fn transition(&self, invite_id: i64, action: InviteAction) -> Result<(), Error> {
        let status = Self::transition_with(&self.connection_pool, invite_id, action).await?;
        info!("Invite moved to {}", status);
        Ok(())
    }

    /// Accetta l'invito e aggiunge l'utente ai membri del viaggio, in un'unica transazione
    #[instrument(skip(self), fields(invite_id = %invite_id, trip_id = %trip_id, user_id = %user_id))]
    pub async fn accept(&self, invite_id: i64, trip_id: i64, user_id: i64) -> Result<(), Error> {
        let mut tx = self.connection_pool.begin().await?;

        Self::transition_with(&mut *tx, invite_id, InviteAction::Accept).await?;
        TripRepository::add_member_with(&mut *tx, trip_id, user_id).await?;

        tx.commit().await?;
        info!("Invite accepted, user added to trip");
        Ok(())
    }

    /// Scrive lo stato deciso da `InviteStatus::transition`, solo se la riga è ancora
    /// nello stato di partenza. Restituisce lo stato scritto.
    async fn transition_with<'e, E>(executor: E, invite_id: i64, action: InviteAction) -> Result<InviteStatus, Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let from = InviteStatus::Pending;
        let to = from.transition(action).ok_or(Error::RowNotFound)?;

        let result = sqlx::query(
            "UPDATE invites SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(to)
        .bind(Utc::now())
        .bind(invite_id)
        .bind(from)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            warn!("Invite {} is no longer {}, {} refused", invite_id, from, action);
            return Err(Error::RowNotFound);
        }
        Ok(to)
    }
}

impl Create<Invite, NewInvite> for InviteRepository {
    #[instrument(skip(self, data), fields(trip_id = %data.trip_id))]
    async fn create(&self, data: &NewInvite) -> Result<Invite, Error> {
        debug!("Creating new invite");
        // status parte sempre da pending
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO invites (uid, trip_id, email, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.trip_id)
        .bind(&data.email)
        .bind(InviteStatus::Pending)
        .bind(now)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Invite created with id {}", new_id);

        self.read(&new_id).await?.ok_or(Error::RowNotFound)
    }
}

impl Read<Invite, i64> for InviteRepository {
    #[instrument(skip(self), fields(invite_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Invite>, Error> {
        sqlx::query_as::<_, Invite>(&format!("{SELECT_INVITE} WHERE i.id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::TripRepository;
    use sqlx::SqlitePool;

    fn uid(s: &str) -> Uuid {
        Uuid::parse_str(s).unwrap()
    }

    const CAROL_TRIP1: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaa1";
    const ERIN_ACCEPTED: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaa2";
    const CAROL_TRIP2: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaa4";

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "trips", "invites")))]
    async fn test_find_pending_by_uid_ignores_resolved(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = InviteRepository::new(pool);

        let pending = repo.find_pending_by_uid(&uid(CAROL_TRIP1)).await?;
        assert_eq!(pending.map(|i| i.email), Some("carol@example.com".to_string()));

        assert!(repo.find_pending_by_uid(&uid(ERIN_ACCEPTED)).await?.is_none());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "trips", "invites")))]
    async fn test_list_and_count_scope(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = InviteRepository::new(pool);
        let page = Pagination { page: 1, page_size: 20 };

        // alice possiede il viaggio 1: 4 inviti, di cui 2 pending
        let alice = InviteFilter::for_user(1);
        assert_eq!(repo.count(&alice).await?, 4);
        assert_eq!(repo.count(&alice.pending()).await?, 2);

        // bob è membro del viaggio 1 e vede gli stessi inviti
        assert_eq!(repo.list(&InviteFilter::for_user(2), page).await?.len(), 4);

        // carol non è coinvolta in alcun viaggio
        assert_eq!(repo.count(&InviteFilter::for_user(3)).await?, 0);

        // dave vede solo il viaggio 2
        let dave = repo.list(&InviteFilter::for_user(4), page).await?;
        assert_eq!(dave.len(), 1);
        assert_eq!(dave[0].uid, uid(CAROL_TRIP2));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "trips", "invites")))]
    async fn test_trip_filter(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = InviteRepository::new(pool);
        let other_trip = uid("22222222-2222-4222-8222-222222222222");

        let filter = InviteFilter::for_user(1).trip(Some(other_trip));
        assert_eq!(repo.count(&filter).await?, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "trips", "invites")))]
    async fn test_pagination_window(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = InviteRepository::new(pool);
        let filter = InviteFilter::for_user(1);

        let first = repo.list(&filter, Pagination { page: 1, page_size: 3 }).await?;
        let second = repo.list(&filter, Pagination { page: 2, page_size: 3 }).await?;
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 1);
        assert!(first.iter().all(|i| i.id != second[0].id));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "trips", "invites")))]
    async fn test_duplicate_trip_email_rejected(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = InviteRepository::new(pool);

        assert!(repo.exists_for(1, "carol@example.com").await?);
        let result = repo
            .create(&NewInvite {
                trip_id: 1,
                email: "carol@example.com".to_string(),
            })
            .await;

        match result {
            Err(Error::Database(db_err)) => assert!(db_err.is_unique_violation()),
            other => panic!("expected unique violation, got {:?}", other.map(|i| i.id)),
        }
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "trips", "invites")))]
    async fn test_create_starts_pending(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = InviteRepository::new(pool);

        let invite = repo
            .create(&NewInvite {
                trip_id: 2,
                email: "alice@example.com".to_string(),
            })
            .await?;

        assert_eq!(invite.status, InviteStatus::Pending);
        assert_eq!(invite.trip_owner_id, 4);
        assert_eq!(invite.to_string(), format!("<alice@example.com> {}", invite.trip_uid));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "trips", "invites")))]
    async fn test_transition_only_from_pending(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = InviteRepository::new(pool);

        repo.transition(1, InviteAction::Cancel).await?;
        let cancelled = repo.read(&1).await?.expect("invite exists");
        assert_eq!(cancelled.status, InviteStatus::Cancelled);

        // secondo tentativo: nessuna riga pending da aggiornare
        let again = repo.transition(1, InviteAction::Accept).await;
        assert!(matches!(again, Err(Error::RowNotFound)));
        let unchanged = repo.read(&1).await?.expect("invite exists");
        assert_eq!(unchanged.status, InviteStatus::Cancelled);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "trips", "invites")))]
    async fn test_transition_writes_action_state(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = InviteRepository::new(pool);

        repo.transition(4, InviteAction::Reject).await?;
        assert_eq!(repo.read(&4).await?.map(|i| i.status), Some(InviteStatus::Rejected));

        repo.accept(5, 1, 2).await?;
        assert_eq!(repo.read(&5).await?.map(|i| i.status), Some(InviteStatus::Accepted));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "trips", "invites")))]
    async fn test_accept_adds_member_once(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = InviteRepository::new(pool.clone());
        let trips = TripRepository::new(pool);

        repo.accept(1, 1, 3).await?;
        assert!(trips.is_member(1, 3).await?);

        let second = repo.accept(1, 1, 3).await;
        assert!(matches!(second, Err(Error::RowNotFound)));
        assert_eq!(trips.member_ids(1).await?, vec![2, 3]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "trips", "invites")))]
    async fn test_failed_accept_rolls_back(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = InviteRepository::new(pool.clone());
        let trips = TripRepository::new(pool);

        // invito 2 è già accepted: la transazione non deve aggiungere membri
        let result = repo.accept(2, 1, 3).await;
        assert!(matches!(result, Err(Error::RowNotFound)));
        assert!(!trips.is_member(1, 3).await?);
        Ok(())
    }
}
