//! Order repository.
//!
//! Orders persist a denormalized snapshot of the cart taken at checkout
//! time. The snapshot is stored as a versioned JSON envelope and parsed
//! back on every read; catalog edits never reach into it.

use std::str::FromStr;

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use goatique_core::snapshot::CartSnapshot;
use goatique_core::{OrderId, OrderStatus};

use super::{RepositoryError, map_unique_violation};
use crate::models::{NewOrder, Order};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    shipping_address: Option<String>,
    total_amount: f64,
    status: String,
    payment_method: Option<String>,
    items: String,
    idempotency_key: Option<String>,
    created_at: NaiveDateTime,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let status = OrderStatus::from_str(&self.status).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "unknown status '{}' for order {}",
                self.status, self.id
            ))
        })?;
        let items = CartSnapshot::parse(&self.items)
            .map_err(|e| {
                RepositoryError::DataCorruption(format!(
                    "invalid item snapshot for order {}: {e}",
                    self.id
                ))
            })?
            .into_items();

        Ok(Order {
            id: self.id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            shipping_address: self.shipping_address,
            total_amount: self.total_amount,
            status,
            payment_method: self.payment_method,
            items,
            idempotency_key: self.idempotency_key,
            created_at: self.created_at,
        })
    }
}

const SELECT_ORDER: &str = r"
    SELECT id, customer_name, customer_email, customer_phone, shipping_address,
           total_amount, status, payment_method, items, idempotency_key, created_at
    FROM orders
";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new order with status `pending`.
    ///
    /// The row id is assigned by `AUTOINCREMENT`, so ids are strictly
    /// increasing across the lifetime of the store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the idempotency key was
    /// already used. Returns `RepositoryError::Database` for other
    /// database errors.
    pub async fn create(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        let items = order.items.to_stored_json().map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to encode item snapshot: {e}"))
        })?;

        let result = sqlx::query(
            r"
            INSERT INTO orders (customer_name, customer_email, customer_phone,
                                shipping_address, total_amount, payment_method,
                                items, idempotency_key)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&order.customer_name)
        .bind(&order.customer_email)
        .bind(&order.customer_phone)
        .bind(&order.shipping_address)
        .bind(order.total_amount)
        .bind(&order.payment_method)
        .bind(&items)
        .bind(&order.idempotency_key)
        .execute(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "idempotency key already used"))?;

        Ok(OrderId::new(result.last_insert_rowid()))
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored snapshot
    /// or status cannot be parsed.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(r.into_order()?)),
            None => Ok(None),
        }
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "{SELECT_ORDER} ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Overwrite the status of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this id.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Look up an order previously created with this idempotency key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "{SELECT_ORDER} WHERE idempotency_key = ?"
        ))
        .bind(key)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.into_order()?)),
            None => Ok(None),
        }
    }
}
