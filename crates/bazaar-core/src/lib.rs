//! # bazaar-core: Pure Domain Model for Bazaar
//!
//! This crate is the **heart** of the Bazaar persistence layer. It contains
//! the domain model as pure types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Embedding Service                            │   │
//! │  │      (HTTP layer, transactions - not part of this repo)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐      ┌────────────────────┐           │   │
//! │  │   │       types        │      │     favorites      │           │   │
//! │  │   │ Customer, Product  │      │  Favorites (m:n)   │           │   │
//! │  │   │ EntityId, Category │      │  symmetric views   │           │   │
//! │  │   └────────────────────┘      └────────────────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE TYPES               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bazaar-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, ProductCategory, EntityId)
//! - [`favorites`] - The many-to-many favorites relationship
//!
//! ## Design Principles
//!
//! 1. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 2. **Explicit identity**: entities are `Transient` until the store assigns
//!    an id; equality and hashing follow the identifier, never field values
//! 3. **Symmetric relationships**: the favorites association is owned by one
//!    component that keeps both sides consistent on every mutation
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::favorites::Favorites;
//! use bazaar_core::types::{Product, ProductCategory};
//!
//! let phone = Product::new("PH-01", "Phone", Some(499.99), ProductCategory::Phones);
//! assert!(phone.in_stock);
//!
//! // Relationship lives outside the entities; views are read-only
//! let mut favorites = Favorites::new();
//! favorites.add(1, 3);
//! assert_eq!(favorites.products_of(1), &[3]);
//! assert_eq!(favorites.customers_of(3), &[1]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod favorites;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use favorites::Favorites;
pub use types::{Customer, CustomerId, EntityId, Product, ProductCategory, ProductId};
