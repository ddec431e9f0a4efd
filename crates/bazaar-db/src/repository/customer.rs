//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Key Operations
//! - Create (surrogate id assigned by the store)
//! - Active-customer listing
//! - Favorites maintenance (the join-table side of the relationship)
//!
//! The favorites write operations here are the persistence counterpart of
//! [`bazaar_core::Favorites`]: the customer side is the authoritative one,
//! the product side exists only as a consequence of these writes.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bazaar_core::{Customer, CustomerId, EntityId, ProductId};

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// let saved = repo.create(Customer::new("user1", "Ada", "Lovelace")).await?;
/// let active = repo.find_all_active().await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a new customer and assigns its surrogate id.
    ///
    /// ## Arguments
    /// * `customer` - A transient customer (id not yet assigned)
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The customer with `id` now `Persisted`
    /// * `Err(DbError::UniqueViolation)` - Username already exists
    ///
    /// No pre-validation happens here: a duplicate username is the store's
    /// verdict, surfaced at this moment and not before.
    pub async fn create(&self, customer: Customer) -> DbResult<Customer> {
        debug!(username = %customer.username, "Inserting customer");

        let result = sqlx::query(
            r#"
            INSERT INTO customer (username, first_name, last_name, active)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&customer.username)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.active)
        .execute(&self.pool)
        .await?;

        Ok(Customer {
            id: EntityId::Persisted(result.last_insert_rowid()),
            ..customer
        })
    }

    /// Gets a customer by its surrogate id.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn find_by_id(&self, id: CustomerId) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, username, first_name, last_name, active
            FROM customer
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Returns all active customers in creation order.
    ///
    /// Creation order is id order: surrogate ids are assigned by an
    /// AUTOINCREMENT column, so ascending id is a stable insertion ordering.
    pub async fn find_all_active(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, username, first_name, last_name, active
            FROM customer
            WHERE active = 1
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = customers.len(), "Loaded active customers");
        Ok(customers)
    }

    /// Records that a customer favorites a product.
    ///
    /// Appends one row to the join table. Calling twice for the same pair
    /// stores two rows; multiplicity is deliberate (see the schema notes).
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - Unknown customer or product id
    pub async fn add_favorite(&self, customer: CustomerId, product: ProductId) -> DbResult<()> {
        debug!(customer = %customer, product = %product, "Adding favorite");

        sqlx::query(
            r#"
            INSERT INTO customer_favorite_product (customer_id, product_id)
            VALUES (?1, ?2)
            "#,
        )
        .bind(customer)
        .bind(product)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes ONE occurrence of a favorite pair.
    ///
    /// The rowid subquery limits the delete to a single row so that a
    /// duplicated pair loses one entry, not all of them. Silent no-op if the
    /// pair is not present.
    pub async fn remove_favorite(&self, customer: CustomerId, product: ProductId) -> DbResult<()> {
        debug!(customer = %customer, product = %product, "Removing favorite");

        sqlx::query(
            r#"
            DELETE FROM customer_favorite_product
            WHERE rowid IN (
                SELECT rowid FROM customer_favorite_product
                WHERE customer_id = ?1 AND product_id = ?2
                LIMIT 1
            )
            "#,
        )
        .bind(customer)
        .bind(product)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn create_assigns_surrogate_id_in_creation_order() {
        let db = test_db().await;
        let repo = db.customers();

        let first = repo
            .create(Customer::new("user1", "Ada", "Lovelace"))
            .await
            .unwrap();
        let second = repo
            .create(Customer::new("user2", "Grace", "Hopper"))
            .await
            .unwrap();

        let first_id = first.id.value().unwrap();
        let second_id = second.id.value().unwrap();
        assert!(first.id.is_persisted());
        assert!(second_id > first_id);
    }

    #[tokio::test]
    async fn find_all_active_filters_and_preserves_creation_order() {
        let db = test_db().await;
        let repo = db.customers();

        repo.create(Customer::new("user1", "Ada", "Lovelace"))
            .await
            .unwrap();
        repo.create(Customer::new("user2", "Grace", "Hopper"))
            .await
            .unwrap();
        let mut inactive = Customer::new("user3", "Alan", "Turing");
        inactive.active = false;
        repo.create(inactive).await.unwrap();

        let result = repo.find_all_active().await.unwrap();

        assert!(result.iter().all(|c| c.active));
        let usernames: Vec<&str> = result.iter().map(|c| c.username.as_str()).collect();
        assert_eq!(usernames, ["user1", "user2"]);
    }

    #[tokio::test]
    async fn duplicate_username_surfaces_as_unique_violation() {
        let db = test_db().await;
        let repo = db.customers();

        repo.create(Customer::new("user1", "Ada", "Lovelace"))
            .await
            .unwrap();
        let err = repo
            .create(Customer::new("user1", "Imposter", "Lovelace"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_customer() {
        let db = test_db().await;

        let missing = db.customers().find_by_id(404).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn add_favorite_rejects_unknown_ids() {
        let db = test_db().await;
        let repo = db.customers();

        let customer = repo
            .create(Customer::new("user1", "Ada", "Lovelace"))
            .await
            .unwrap();
        let err = repo
            .add_favorite(customer.id.value().unwrap(), 999)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
