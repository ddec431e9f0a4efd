//! # Repository Module
//!
//! Database repository implementations for Bazaar.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Embedding service                                                     │
//! │       │                                                                 │
//! │       │  db.products().find_by_global_search("com")                    │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── find_in_stock(&self)                                              │
//! │  ├── find_by_global_search(&self, term)                                │
//! │  ├── find_by_category(&self, category)                                 │
//! │  └── set_out_of_stock(&self, ids)                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • The query catalog is fixed and isolated in one place                │
//! │  • Each operation is one request-response unit of work                 │
//! │  • Can swap database implementations behind the same contracts        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`] - Customer persistence and favorites maintenance
//! - [`ProductRepository`] - Product queries and bulk stock updates
//!
//! [`CustomerRepository`]: customer::CustomerRepository
//! [`ProductRepository`]: product::ProductRepository

pub mod customer;
pub mod product;
