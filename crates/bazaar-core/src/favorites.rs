//! # Favorites Relationship
//!
//! The many-to-many "favorite products" association between customers and
//! products, maintained symmetrically from both sides.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Favorites (in-memory join table)                     │
//! │                                                                         │
//! │  products_by_customer          customers_by_product                     │
//! │  ┌───────────────────┐         ┌───────────────────┐                   │
//! │  │ 1 → [3, 1]        │         │ 3 → [1]           │                   │
//! │  │ 2 → [2]           │   ⇄     │ 1 → [1]           │                   │
//! │  └───────────────────┘         │ 2 → [2]           │                   │
//! │                                └───────────────────┘                   │
//! │                                                                         │
//! │  Invariant: customer C's list contains P  ⇔  product P's list          │
//! │  contains C. Every mutation updates both sides together.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Instead of live back-references embedded in the entities (an ownership
//! cycle Rust has no patience for), the relationship is owned by this one
//! component, keyed by identifier pairs. Entity views are computed on demand
//! and handed out as immutable slices - a caller cannot mutate a view, the
//! borrow checker rejects the attempt at compile time.

use std::collections::HashMap;

use crate::types::{CustomerId, ProductId};

/// In-memory view of the customer/product favorites relationship.
///
/// Both sides are insertion-ordered. Duplicates are permitted: favoriting the
/// same product twice records the pair twice, and removal takes out one
/// occurrence at a time. This mirrors the join-table semantics in the store,
/// which carries no unique constraint on the pair.
#[derive(Debug, Default, Clone)]
pub struct Favorites {
    products_by_customer: HashMap<CustomerId, Vec<ProductId>>,
    customers_by_product: HashMap<ProductId, Vec<CustomerId>>,
}

impl Favorites {
    /// Creates an empty relationship.
    pub fn new() -> Self {
        Favorites::default()
    }

    /// Records that `customer` favorites `product`.
    ///
    /// Appends to both sides so the symmetry invariant holds after every
    /// call. NOT idempotent: calling twice for the same pair appends a
    /// duplicate entry on each side.
    pub fn add(&mut self, customer: CustomerId, product: ProductId) {
        self.products_by_customer
            .entry(customer)
            .or_default()
            .push(product);
        self.customers_by_product
            .entry(product)
            .or_default()
            .push(customer);
    }

    /// Removes one occurrence of the pair from both sides.
    ///
    /// Silent no-op if the pair is not present.
    pub fn remove(&mut self, customer: CustomerId, product: ProductId) {
        remove_one(&mut self.products_by_customer, customer, product);
        remove_one(&mut self.customers_by_product, product, customer);
    }

    /// The products favorited by `customer`, in the order they were added.
    ///
    /// Read-only view; empty for an unknown customer.
    pub fn products_of(&self, customer: CustomerId) -> &[ProductId] {
        self.products_by_customer
            .get(&customer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The customers favoriting `product` - the inverse side.
    ///
    /// Maintained only as a consequence of customer-side mutation, never
    /// written to independently.
    pub fn customers_of(&self, product: ProductId) -> &[CustomerId] {
        self.customers_by_product
            .get(&product)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of recorded pairs (duplicates counted).
    pub fn len(&self) -> usize {
        self.products_by_customer.values().map(Vec::len).sum()
    }

    /// Checks whether no pairs are recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Removes the first occurrence of `value` from the list under `key`.
fn remove_one(map: &mut HashMap<i64, Vec<i64>>, key: i64, value: i64) {
    if let Some(list) = map.get_mut(&key) {
        if let Some(pos) = list.iter().position(|v| *v == value) {
            list.remove(pos);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
