//! `PostgreSQL` implementation of the `BasketRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use basket_core::basket::{Basket, BasketId, BasketLine, NewBasket, NewBasketLine};
use basket_core::error::RepositoryError;
use basket_core::repository::{AddedLine, BasketRepository};

use crate::schema;

/// PostgreSQL-backed basket repository.
#[derive(Debug, Clone)]
pub struct PgBasketRepository {
    pool: PgPool,
}

impl PgBasketRepository {
    /// Creates a new `PgBasketRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load(&self, basket_id: &BasketId) -> Result<Option<Basket>, RepositoryError> {
        let Some(row) = sqlx::query_as::<_, BasketRow>(schema::SELECT_BASKET)
            .bind(basket_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
        else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, LineRow>(schema::SELECT_BASKET_LINES)
            .bind(basket_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(Some(row.into_basket(lines)))
    }
}

#[derive(sqlx::FromRow)]
struct BasketRow {
    id: String,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BasketRow {
    fn into_basket(self, lines: Vec<LineRow>) -> Basket {
        Basket {
            id: BasketId::from(self.id),
            user_id: self.user_id.into(),
            lines: lines.into_iter().map(BasketLine::from).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LineRow {
    id: i64,
    basket_id: String,
    product_id: String,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LineRow> for BasketLine {
    fn from(row: LineRow) -> Self {
        Self {
            line_id: row.id,
            basket_id: row.basket_id.into(),
            product_id: row.product_id.into(),
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn storage_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => RepositoryError::NoRows,
        other => RepositoryError::Storage(other.to_string()),
    }
}

#[async_trait]
impl BasketRepository for PgBasketRepository {
    #[instrument(skip_all, fields(basket_id = %basket.id, user_id = %basket.user_id))]
    async fn create_basket(&self, basket: &NewBasket) -> Result<Basket, RepositoryError> {
        sqlx::query(schema::INSERT_BASKET)
            .bind(basket.id.as_str())
            .bind(basket.user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        let row = sqlx::query_as::<_, BasketRow>(schema::SELECT_BASKET)
            .bind(basket.id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        debug!("basket row inserted");
        Ok(row.into_basket(Vec::new()))
    }

    #[instrument(skip_all, fields(basket_id = %basket_id))]
    async fn get_basket_by_id(
        &self,
        basket_id: &BasketId,
    ) -> Result<Option<Basket>, RepositoryError> {
        self.load(basket_id).await
    }

    #[instrument(skip_all, fields(
        basket_id = %line.basket_id,
        product_id = %line.product_id,
        quantity = line.quantity,
    ))]
    async fn add_product_to_basket(
        &self,
        line: &NewBasketLine,
    ) -> Result<AddedLine, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let (line_id,): (i64,) = sqlx::query_as(schema::INSERT_BASKET_LINE)
            .bind(line.basket_id.as_str())
            .bind(line.product_id.as_str())
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await
            .map_err(storage_error)?;

        sqlx::query(schema::TOUCH_BASKET)
            .bind(line.basket_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)?;
        debug!(line_id, "basket line inserted");

        let basket = self
            .load(&line.basket_id)
            .await?
            .ok_or(RepositoryError::NoRows)?;
        Ok(AddedLine { line_id, basket })
    }

    #[instrument(skip_all, fields(basket_id = %basket_id, line_id = line_id))]
    async fn remove_line(&self, basket_id: &BasketId, line_id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(schema::DELETE_BASKET_LINE)
            .bind(basket_id.as_str())
            .bind(line_id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        debug!(removed = result.rows_affected(), "basket line removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_no_rows() {
        assert!(matches!(
            storage_error(sqlx::Error::RowNotFound),
            RepositoryError::NoRows
        ));
    }

    #[test]
    fn test_other_errors_map_to_storage() {
        let err = storage_error(sqlx::Error::PoolTimedOut);

        assert!(matches!(err, RepositoryError::Storage(msg) if !msg.is_empty()));
    }
}
