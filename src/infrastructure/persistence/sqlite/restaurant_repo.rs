//! SQLite Restaurant Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::{map_db_error, DbPool};
use crate::application::ports::{RepositoryError, RestaurantRecord, RestaurantRepositoryPort};

/// SQLite Restaurant Repository
pub struct SqliteRestaurantRepository {
    pool: DbPool,
}

impl SqliteRestaurantRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RestaurantRow {
    id: String,
    name: String,
    locale: String,
}

impl From<RestaurantRow> for RestaurantRecord {
    fn from(row: RestaurantRow) -> Self {
        RestaurantRecord {
            id: row.id,
            name: row.name,
            locale: row.locale,
        }
    }
}

#[async_trait]
impl RestaurantRepositoryPort for SqliteRestaurantRepository {
    async fn save(&self, restaurant: &RestaurantRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO restaurants (id, name, locale)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                locale = excluded.locale
            "#,
        )
        .bind(&restaurant.id)
        .bind(&restaurant.name)
        .bind(&restaurant.locale)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RestaurantRecord>, RepositoryError> {
        let row: Option<RestaurantRow> =
            sqlx::query_as("SELECT id, name, locale FROM restaurants WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.map(RestaurantRecord::from))
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
