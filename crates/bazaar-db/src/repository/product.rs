//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Global search across code, name and category
//! - Category and stock filtering
//! - Bulk out-of-stock update
//!
//! ## Global Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Global Search Works                              │
//! │                                                                         │
//! │  Caller types: "com"                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  upper-cased substring match across: code, name, category name         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ product                                 │                           │
//! │  │                                         │                           │
//! │  │ product1     | Astra 5G  | PHONES      │                           │
//! │  │ product2     | Nova Mini | PHONES      │                           │
//! │  │ product3-com | Trackpad  | ACCESSORIES │ ← MATCH (code)            │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: [product3-com]                                               │
//! │                                                                         │
//! │  The empty term matches EVERY row: '' is a substring of everything.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use bazaar_core::{CustomerId, EntityId, Product, ProductCategory, ProductId};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Search products
/// let results = repo.find_by_global_search("com").await?;
///
/// // Bulk update
/// let affected = repo.set_out_of_stock(&[1, 2]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and assigns its surrogate id.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product with `id` now `Persisted`
    /// * `Err(DbError::UniqueViolation)` - Code already exists
    pub async fn create(&self, product: Product) -> DbResult<Product> {
        debug!(code = %product.code, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO product (code, name, price, in_stock, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&product.code)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.in_stock)
        .bind(product.category)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: EntityId::Persisted(result.last_insert_rowid()),
            ..product
        })
    }

    /// Gets a product by its surrogate id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn find_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, code, name, price, in_stock, category
            FROM product
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Returns all in-stock products in creation order.
    pub async fn find_in_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, code, name, price, in_stock, category
            FROM product
            WHERE in_stock = 1
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Searches products by case-insensitive substring across code, name and
    /// the category's textual name, combined with OR.
    ///
    /// ## Edge Case
    /// The empty term matches every product - `''` is a substring of
    /// everything, and callers rely on "empty search shows the full catalog".
    ///
    /// ## Ordering
    /// Creation order (id ascending).
    pub async fn find_by_global_search(&self, term: &str) -> DbResult<Vec<Product>> {
        debug!(term = %term, "Searching products");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, code, name, price, in_stock, category
            FROM product
            WHERE upper(code) LIKE '%' || upper(?1) || '%'
               OR upper(name) LIKE '%' || upper(?1) || '%'
               OR upper(category) LIKE '%' || upper(?1) || '%'
            ORDER BY id
            "#,
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Returns products of exactly the given category, in creation order.
    ///
    /// The category binds as its textual name; rows are matched on the TEXT
    /// column, so reordering the enum can never shift results.
    pub async fn find_by_category(&self, category: ProductCategory) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, code, name, price, in_stock, category
            FROM product
            WHERE category = ?1
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Returns the products a customer has favorited, through the join table.
    ///
    /// This is the explicit fetch of the relationship - nothing is loaded
    /// lazily behind a field access; callers ask for the data when they
    /// want it.
    ///
    /// ## Behavior
    /// - Empty result for a customer with no favorites OR an unknown customer
    ///   id (not an error either way)
    /// - A duplicated pair in the join table yields the product twice
    ///
    /// ## Ordering
    /// Ascending product id, regardless of the order favorites were added.
    pub async fn find_favorites_by_customer_id(
        &self,
        customer_id: CustomerId,
    ) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.code, p.name, p.price, p.in_stock, p.category
            FROM product p
            JOIN customer_favorite_product f ON f.product_id = p.id
            WHERE f.customer_id = ?1
            ORDER BY p.id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Marks all products with the given ids out of stock, in one statement.
    ///
    /// ## Bulk Semantics
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ❌ WRONG: N individual fetch-then-save cycles (N+1 pattern)       │
    /// │     for id in ids { load(id); p.in_stock = false; save(p); }       │
    /// │                                                                     │
    /// │  ✅ CORRECT: one statement-level update                            │
    /// │     UPDATE product SET in_stock = 0 WHERE id IN (?, ?, ...)        │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    /// No entities are loaded, so no entity-level side effects can fire, and
    /// the change is atomic at the statement level.
    ///
    /// ## Returns
    /// The number of rows affected. Ids with no matching row are silently
    /// skipped - partial matches are NOT an error.
    pub async fn set_out_of_stock(&self, ids: &[ProductId]) -> DbResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        debug!(count = ids.len(), "Bulk marking products out of stock");

        // sqlite has no array binds; build the placeholder list dynamically
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("UPDATE product SET in_stock = 0 WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let result = builder.build().execute(&self.pool).await?;

        debug!(affected = result.rows_affected(), "Bulk update complete");
        Ok(result.rows_affected())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
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
    use bazaar_core::Customer;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Seeds the three-product catalog most tests run against.
    ///
    /// product1 and product2 are PHONES; only product3's code contains "com",
    /// so a "COM" search must return product3 alone.
    async fn seed_products(db: &Database) -> (Product, Product, Product) {
        let repo = db.products();
        let p1 = repo
            .create(Product::new(
                "product1",
                "Astra 5G",
                Some(499.99),
                ProductCategory::Phones,
            ))
            .await
            .unwrap();
        let p2 = repo
            .create(Product::new(
                "product2",
                "Nova Mini",
                Some(349.0),
                ProductCategory::Phones,
            ))
            .await
            .unwrap();
        let p3 = repo
            .create(Product::new(
                "product3-com",
                "Trackpad",
                None,
                ProductCategory::Accessories,
            ))
            .await
            .unwrap();
        (p1, p2, p3)
    }

    fn codes(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.code.as_str()).collect()
    }

    #[tokio::test]
    async fn find_by_category_returns_exact_matches_in_creation_order() {
        let db = test_db().await;
        seed_products(&db).await;

        let result = db
            .products()
            .find_by_category(ProductCategory::Phones)
            .await
            .unwrap();

        assert_eq!(codes(&result), ["product1", "product2"]);
    }

    #[tokio::test]
    async fn global_search_with_empty_term_returns_all_records() {
        let db = test_db().await;
        seed_products(&db).await;

        let result = db.products().find_by_global_search("").await.unwrap();

        assert_eq!(result.len() as i64, db.products().count().await.unwrap());
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn global_search_is_case_insensitive() {
        let db = test_db().await;
        seed_products(&db).await;

        let upper = db.products().find_by_global_search("COM").await.unwrap();
        let lower = db.products().find_by_global_search("com").await.unwrap();

        assert_eq!(codes(&upper), ["product3-com"]);
        assert_eq!(codes(&lower), codes(&upper));
    }

    #[tokio::test]
    async fn global_search_matches_name_and_category_too() {
        let db = test_db().await;
        seed_products(&db).await;

        let by_name = db.products().find_by_global_search("nova").await.unwrap();
        assert_eq!(codes(&by_name), ["product2"]);

        let by_category = db.products().find_by_global_search("acces").await.unwrap();
        assert_eq!(codes(&by_category), ["product3-com"]);
    }

    #[tokio::test]
    async fn set_out_of_stock_updates_only_the_given_ids() {
        let db = test_db().await;
        let (p1, p2, _p3) = seed_products(&db).await;

        let affected = db
            .products()
            .set_out_of_stock(&[p1.id.value().unwrap(), p2.id.value().unwrap()])
            .await
            .unwrap();
        assert_eq!(affected, 2);

        let in_stock = db.products().find_in_stock().await.unwrap();
        assert_eq!(codes(&in_stock), ["product3-com"]);
    }

    #[tokio::test]
    async fn set_out_of_stock_silently_skips_unknown_ids() {
        let db = test_db().await;
        let (p1, _p2, _p3) = seed_products(&db).await;

        let affected = db
            .products()
            .set_out_of_stock(&[p1.id.value().unwrap(), 999])
            .await
            .unwrap();
        assert_eq!(affected, 1);

        assert_eq!(db.products().set_out_of_stock(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn favorites_come_back_ordered_by_product_id() {
        let db = test_db().await;
        let (p1, _p2, p3) = seed_products(&db).await;
        let customer = db
            .customers()
            .create(Customer::new("user1", "Ada", "Lovelace"))
            .await
            .unwrap();
        let customer_id = customer.id.value().unwrap();

        // Favorite product3 BEFORE product1; the query must still sort by id
        db.customers()
            .add_favorite(customer_id, p3.id.value().unwrap())
            .await
            .unwrap();
        db.customers()
            .add_favorite(customer_id, p1.id.value().unwrap())
            .await
            .unwrap();

        let result = db
            .products()
            .find_favorites_by_customer_id(customer_id)
            .await
            .unwrap();

        let ids: Vec<i64> = result.iter().map(|p| p.id.value().unwrap()).collect();
        assert_eq!(ids, [p1.id.value().unwrap(), p3.id.value().unwrap()]);
    }

    #[tokio::test]
    async fn favorites_for_unknown_customer_are_empty_not_an_error() {
        let db = test_db().await;
        seed_products(&db).await;

        let result = db
            .products()
            .find_favorites_by_customer_id(404)
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn duplicated_favorite_pair_keeps_its_multiplicity() {
        let db = test_db().await;
        let (p1, _p2, _p3) = seed_products(&db).await;
        let customer = db
            .customers()
            .create(Customer::new("user1", "Ada", "Lovelace"))
            .await
            .unwrap();
        let customer_id = customer.id.value().unwrap();
        let product_id = p1.id.value().unwrap();

        db.customers()
            .add_favorite(customer_id, product_id)
            .await
            .unwrap();
        db.customers()
            .add_favorite(customer_id, product_id)
            .await
            .unwrap();

        let twice = db
            .products()
            .find_favorites_by_customer_id(customer_id)
            .await
            .unwrap();
        assert_eq!(twice.len(), 2);

        // Removing takes out one occurrence, not both
        db.customers()
            .remove_favorite(customer_id, product_id)
            .await
            .unwrap();
        let once = db
            .products()
            .find_favorites_by_customer_id(customer_id)
            .await
            .unwrap();
        assert_eq!(once.len(), 1);

        // And removing the last one restores the prior (empty) state
        db.customers()
            .remove_favorite(customer_id, product_id)
            .await
            .unwrap();
        let none = db
            .products()
            .find_favorites_by_customer_id(customer_id)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn duplicate_code_surfaces_as_unique_violation() {
        let db = test_db().await;
        seed_products(&db).await;

        let err = db
            .products()
            .create(Product::new(
                "product1",
                "Shadow Copy",
                None,
                ProductCategory::Phones,
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn category_round_trips_by_textual_name() {
        let db = test_db().await;
        let (_p1, _p2, p3) = seed_products(&db).await;

        let loaded = db
            .products()
            .find_by_id(p3.id.value().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.category, ProductCategory::Accessories);
        assert_eq!(loaded.price, None);

        // The column really holds the name, not an ordinal
        let raw: String = sqlx::query_scalar("SELECT category FROM product WHERE id = ?1")
            .bind(p3.id.value().unwrap())
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(raw, "ACCESSORIES");
    }
}
