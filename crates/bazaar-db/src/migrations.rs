//! # Database Migrations
//!
//! Embedded SQL migrations for the Bazaar schema.
//!
//! ## Schema Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Schema                                    │
//! │                                                                         │
//! │  ┌──────────────┐      ┌──────────────────────────┐     ┌───────────┐  │
//! │  │   customer   │      │ customer_favorite_product│     │  product  │  │
//! │  │ ──────────── │      │ ──────────────────────── │     │ ───────── │  │
//! │  │ id (PK)      │◄─────│ customer_id (FK)         │     │ id (PK)   │  │
//! │  │ username (U) │      │ product_id  (FK)         │────►│ code (U)  │  │
//! │  │ first_name   │      └──────────────────────────┘     │ name      │  │
//! │  │ last_name    │        no extra columns, no unique    │ price     │  │
//! │  │ active       │        pair constraint (multiplicity  │ in_stock  │  │
//! │  └──────────────┘        is allowed)                    │ category  │  │
//! │                                                         └───────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql` (e.g., `002_add_customer_email.sql`)
//! 3. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 4. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds all SQL files from the specified
/// directory into the binary at compile time. No runtime file access needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// ## What This Does
/// - Creates `_sqlx_migrations` table if not exists
/// - Compares embedded migrations with applied migrations
/// - Runs any pending migrations in order
/// - Records each migration's checksum and timestamp
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Transactional: each migration runs in a transaction
/// - Ordered: migrations run in filename order (001, 002, ...)
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
///
/// ## Usage
/// For diagnostics and health checks.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
