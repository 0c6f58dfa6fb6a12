//! SQLite User Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::{map_db_error, DbPool};
use crate::application::ports::{RepositoryError, UserRecord, UserRepositoryPort};
use crate::domain::Role;

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    uid: String,
    role: String,
    restaurants: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            role: Role::from_str(&row.role).ok_or_else(|| {
                RepositoryError::SerializationError(format!("Unknown role: {}", row.role))
            })?,
            restaurants: serde_json::from_str(&row.restaurants)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            uid: row.uid,
        })
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn save(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        let restaurants = serde_json::to_string(&user.restaurants)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO users (uid, role, restaurants)
            VALUES (?, ?, ?)
            ON CONFLICT(uid) DO UPDATE SET
                role = excluded.role,
                restaurants = excluded.restaurants
            "#,
        )
        .bind(&user.uid)
        .bind(user.role.as_str())
        .bind(restaurants)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT uid, role, restaurants FROM users WHERE uid = ?")
                .bind(uid)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        row.map(UserRecord::try_from).transpose()
    }
}
