//! # steel-db: Cart Persistence for Steel POS
//!
//! This crate provides local persistence for the storefront client's cart.
//! It uses SQLite for durable storage with sqlx for async operations, and
//! exposes persistence as an injected capability so the engine can run
//! against an in-memory store in tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Steel POS Cart Data Flow                           │
//! │                                                                         │
//! │  Caller (composition root)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     steel-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  CartSession  │    │ SnapshotStore │    │  Migrations  │  │   │
//! │  │   │ (session.rs)  │───►│  (store.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ hydrate/open  │    │ Memory  │ DB  │    │ 001_cart_…   │  │   │
//! │  │   │ mutate+persist│    │ Store   │ row │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (one row per snapshot key) - or a plain HashMap           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`store`] - The `SnapshotStore` capability + in-memory implementation
//! - [`repository`] - SQLite-backed snapshot repository
//! - [`session`] - The stateful cart engine
//!
//! ## Usage
//!
//! ```rust,ignore
//! use steel_db::{CartSession, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./steel.db")).await?;
//! let mut session = CartSession::open(db.cart_snapshots()).await;
//!
//! session.add_to_cart(&product).await?;
//! println!("{}", session.cart().grand_total());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use repository::cart::CartSnapshotRepository;
pub use session::{CartSession, CART_STORAGE_KEY};
pub use store::{MemoryStore, SnapshotStore};
