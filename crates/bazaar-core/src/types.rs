//! # Domain Types
//!
//! Core domain types for the Bazaar persistence layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Product     │   │ ProductCategory │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (EntityId)  │   │  id (EntityId)  │   │  Phones         │       │
//! │  │  username       │   │  code (unique)  │   │  Laptops        │       │
//! │  │  first_name     │   │  name           │   │  Tablets        │       │
//! │  │  last_name      │   │  price          │   │  Accessories    │       │
//! │  │  active         │   │  in_stock       │   └─────────────────┘       │
//! │  └─────────────────┘   │  category       │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! Every entity carries an [`EntityId`] that is either `Transient` (not yet
//! persisted) or `Persisted(i64)` (store-assigned surrogate key). Equality is
//! identifier-based once assigned; transient entities are never equal to
//! anything. The surrogate key has no business meaning - `username` and `code`
//! are the human-facing identifiers.

use std::any::TypeId;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

#[cfg(feature = "sqlx")]
use sqlx::sqlite::SqliteRow;
#[cfg(feature = "sqlx")]
use sqlx::{FromRow, Row};

/// Store-assigned customer identifier.
pub type CustomerId = i64;

/// Store-assigned product identifier.
pub type ProductId = i64;

// =============================================================================
// Entity Identity
// =============================================================================

/// The identity state of an entity.
///
/// ## Why a Variant Type?
/// A freshly constructed entity has no identifier yet - the store assigns one
/// when the create operation succeeds. Modeling that as `Transient` vs
/// `Persisted(i64)` makes the equality discontinuity explicit instead of
/// hiding it behind a nullable key.
///
/// ## Equality Contract
/// - `Persisted(a) == Persisted(b)` iff `a == b`
/// - `Transient` is never equal to anything, **including itself**
///
/// The second rule is deliberate: two unsaved entities are distinct objects
/// even if every field matches, so `PartialEq` is non-reflexive for transient
/// ids (the same shape as `f64::NAN`). `Eq` is intentionally not implemented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum EntityId {
    /// Not yet persisted; no identifier assigned.
    Transient,
    /// Persisted with a store-assigned surrogate key.
    Persisted(i64),
}

impl EntityId {
    /// Returns the assigned identifier, if any.
    #[inline]
    pub fn value(&self) -> Option<i64> {
        match self {
            EntityId::Transient => None,
            EntityId::Persisted(id) => Some(*id),
        }
    }

    /// Checks whether an identifier has been assigned.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        matches!(self, EntityId::Persisted(_))
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EntityId::Persisted(a), EntityId::Persisted(b)) => a == b,
            // Transient never equals anything, itself included
            _ => false,
        }
    }
}

// =============================================================================
// Product Category
// =============================================================================

/// The closed set of product categories known to the storefront domain.
///
/// ## Persistence
/// Stored as the textual name (`'PHONES'`), never the ordinal position:
/// reordering this enum must never corrupt rows already on disk. The sqlx
/// `Type` derive and serde both use the UPPERCASE name for that reason.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductCategory {
    Phones,
    Laptops,
    Tablets,
    Accessories,
}

impl ProductCategory {
    /// Returns the textual name used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Phones => "PHONES",
            ProductCategory::Laptops => "LAPTOPS",
            ProductCategory::Tablets => "TABLETS",
            ProductCategory::Accessories => "ACCESSORIES",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer of the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Surrogate identifier, assigned by the store on create. Immutable once
    /// assigned - only the repository layer should ever set this.
    pub id: EntityId,

    /// Unique login name - the business identifier.
    pub username: String,

    /// Display first name.
    pub first_name: String,

    /// Display last name.
    pub last_name: String,

    /// Whether the account is active (defaults to true).
    pub active: bool,
}

impl Customer {
    /// Creates a new, not-yet-persisted customer.
    ///
    /// All non-defaulted fields are required here; there is no partially
    /// constructed state. The id stays `Transient` until
    /// `CustomerRepository::create` succeeds.
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Customer {
            id: EntityId::Transient,
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            active: true,
        }
    }
}

/// Identifier-based equality: two customers are equal iff both have been
/// persisted and carry the same id. Field values never participate.
impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Type-only hash, stable across identifier assignment.
///
/// All customers hash to the same bucket so that an entity keeps its hash
/// when it transitions from transient to persisted. Collections holding a mix
/// of saved and unsaved entities rely on this weak-hash contract.
impl Hash for Customer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        TypeId::of::<Customer>().hash(state);
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Surrogate identifier, same semantics as [`Customer::id`].
    pub id: EntityId,

    /// Unique product code - the business identifier.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Unit price; may be unset for not-yet-priced products.
    pub price: Option<f64>,

    /// Whether the product is currently in stock (defaults to true).
    pub in_stock: bool,

    /// Category, persisted by textual name.
    pub category: ProductCategory,
}

impl Product {
    /// Creates a new, not-yet-persisted product.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        price: Option<f64>,
        category: ProductCategory,
    ) -> Self {
        Product {
            id: EntityId::Transient,
            code: code.into(),
            name: name.into(),
            price,
            in_stock: true,
            category,
        }
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        TypeId::of::<Product>().hash(state);
    }
}

// =============================================================================
// Row Mapping (sqlx feature)
// =============================================================================

/// Maps a database row to a customer.
///
/// Manual impl rather than the derive: the `id` column is a plain INTEGER
/// but the field is an [`EntityId`], and anything read from the store is by
/// definition persisted.
#[cfg(feature = "sqlx")]
impl FromRow<'_, SqliteRow> for Customer {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Customer {
            id: EntityId::Persisted(row.try_get("id")?),
            username: row.try_get("username")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            active: row.try_get("active")?,
        })
    }
}

#[cfg(feature = "sqlx")]
impl FromRow<'_, SqliteRow> for Product {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Product {
            id: EntityId::Persisted(row.try_get("id")?),
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            in_stock: row.try_get("in_stock")?,
            category: row.try_get("category")?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn persisted_entities_equal_iff_ids_match() {
        let mut a = Customer::new("user1", "Ada", "Lovelace");
        let mut b = Customer::new("user2", "Grace", "Hopper");
        a.id = EntityId::Persisted(7);
        b.id = EntityId::Persisted(7);

        // Same id wins even though every other field differs
        assert_eq!(a, b);

        b.id = EntityId::Persisted(8);
        assert_ne!(a, b);
    }

    #[test]
    fn transient_entities_never_equal_even_to_themselves() {
        let a = Customer::new("user1", "Ada", "Lovelace");
        let b = a.clone();

        assert_ne!(a, b);
        // Non-reflexive, like NaN
        assert_ne!(a, a);
    }

    #[test]
    fn hash_is_type_only_and_stable_across_id_assignment() {
        let mut customer = Customer::new("user1", "Ada", "Lovelace");
        let transient_hash = hash_of(&customer);

        customer.id = EntityId::Persisted(42);
        assert_eq!(hash_of(&customer), transient_hash);

        // Every customer hashes alike; products hash alike among themselves
        let other = Customer::new("user2", "Grace", "Hopper");
        assert_eq!(hash_of(&other), transient_hash);

        let p1 = Product::new("p1", "Phone", None, ProductCategory::Phones);
        let p2 = Product::new("p2", "Laptop", Some(999.0), ProductCategory::Laptops);
        assert_eq!(hash_of(&p1), hash_of(&p2));
    }

    #[test]
    fn new_entities_default_their_flags() {
        let customer = Customer::new("user1", "Ada", "Lovelace");
        assert!(customer.active);
        assert!(!customer.id.is_persisted());

        let product = Product::new("p1", "Phone", Some(499.99), ProductCategory::Phones);
        assert!(product.in_stock);
        assert_eq!(product.id.value(), None);
    }

    #[test]
    fn category_serializes_as_textual_name() {
        let json = serde_json::to_string(&ProductCategory::Phones).unwrap();
        assert_eq!(json, "\"PHONES\"");

        let back: ProductCategory = serde_json::from_str("\"ACCESSORIES\"").unwrap();
        assert_eq!(back, ProductCategory::Accessories);

        assert_eq!(ProductCategory::Laptops.to_string(), "LAPTOPS");
    }
}
