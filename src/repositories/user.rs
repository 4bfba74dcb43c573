//! UserRepository - Repository per la gestione degli utenti

use super::{Create, Read};
use crate::dtos::CreateUserDTO;
use crate::entities::User;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

// USER REPO
pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> UserRepository {
        Self { connection_pool }
    }

    /// L'email è univoca e va passata già normalizzata
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        debug!("Finding user by email");
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, is_staff, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    /// La password nel DTO deve essere già hashata
    #[instrument(skip(self, data), fields(email = %data.email))]
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        debug!("Creating new user");
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (email, password, is_staff, created_at) VALUES (?, ?, 0, ?)",
        )
        .bind(&data.email)
        .bind(&data.password)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        // Get the last inserted ID
        let new_id = result.last_insert_rowid();

        info!("User created with id {}", new_id);

        Ok(User {
            id: new_id,
            email: data.email.clone(),
            password: data.password.clone(),
            is_staff: false,
            created_at: now,
        })
    }
}

impl Read<User, i64> for UserRepository {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<User>, Error> {
        debug!("Reading user by id");
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, is_staff, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}
