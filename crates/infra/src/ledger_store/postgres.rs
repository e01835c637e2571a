//! Postgres-backed ledger store.
//!
//! One row per stock line in `stock_items`, keyed by the exact item name.
//! `put` is an upsert, so create and replace share one statement.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};

use pantry_core::{ItemName, PantryError, PantryResult, PhotoRef};
use pantry_inventory::StockItem;

use super::r#trait::LedgerStore;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS stock_items (
    name TEXT PRIMARY KEY,
    quantity BIGINT NOT NULL CHECK (quantity >= 0),
    photo_ref TEXT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Postgres-backed ledger store.
///
/// ## Thread Safety
///
/// Uses the SQLx connection pool, which is `Send + Sync`. Concurrent callers
/// are safe; serializing read-modify-write per name is done by the service.
pub struct PostgresLedgerStore {
    pool: Arc<PgPool>,
}

impl PostgresLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect to `database_url` and make sure the table exists.
    pub async fn connect(database_url: &str) -> PantryResult<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the `stock_items` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> PantryResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> PantryError {
    match err {
        sqlx::Error::Database(db_err) => PantryError::store_unavailable(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            PantryError::store_unavailable(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            PantryError::store_unavailable(format!("connection pool timed out in {}", operation))
        }
        other => PantryError::store_unavailable(format!("{} failed: {}", operation, other)),
    }
}

fn row_to_item(row: &PgRow) -> PantryResult<StockItem> {
    let corrupt = |e: sqlx::Error| map_sqlx_error("decode_row", e);

    let name: String = row.try_get("name").map_err(corrupt)?;
    let quantity: i64 = row.try_get("quantity").map_err(corrupt)?;
    let photo_ref: Option<String> = row.try_get("photo_ref").map_err(corrupt)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(corrupt)?;

    let name = ItemName::parse(name)
        .map_err(|e| PantryError::store_unavailable(format!("corrupt row: {e}")))?;
    let quantity = u64::try_from(quantity)
        .map_err(|_| PantryError::store_unavailable(format!("corrupt row: negative quantity for {name}")))?;
    let photo_ref = photo_ref
        .map(PhotoRef::parse)
        .transpose()
        .map_err(|e| PantryError::store_unavailable(format!("corrupt row: {e}")))?;

    Ok(StockItem::restore(name, quantity, photo_ref, updated_at))
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    async fn get(&self, name: &ItemName) -> PantryResult<Option<StockItem>> {
        let row = sqlx::query(
            r#"
            SELECT name, quantity, photo_ref, updated_at
            FROM stock_items
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_stock_item", e))?;

        row.as_ref().map(row_to_item).transpose()
    }

    async fn put(&self, item: StockItem) -> PantryResult<()> {
        let quantity = i64::try_from(item.quantity())
            .map_err(|_| PantryError::invalid_argument("quantity exceeds storage range"))?;

        sqlx::query(
            r#"
            INSERT INTO stock_items (name, quantity, photo_ref, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name)
            DO UPDATE SET
                quantity = EXCLUDED.quantity,
                photo_ref = EXCLUDED.photo_ref,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(item.name().as_str())
        .bind(quantity)
        .bind(item.photo_ref().map(PhotoRef::as_str))
        .bind(item.updated_at())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("put_stock_item", e))?;

        Ok(())
    }

    async fn delete(&self, name: &ItemName) -> PantryResult<()> {
        sqlx::query("DELETE FROM stock_items WHERE name = $1")
            .bind(name.as_str())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_stock_item", e))?;
        Ok(())
    }

    async fn list(&self) -> PantryResult<Vec<StockItem>> {
        let rows = sqlx::query(
            r#"
            SELECT name, quantity, photo_ref, updated_at
            FROM stock_items
            WHERE quantity > 0
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_stock_items", e))?;

        rows.iter().map(row_to_item).collect()
    }
}
