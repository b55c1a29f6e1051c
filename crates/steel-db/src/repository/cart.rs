//! # Cart Snapshot Repository
//!
//! SQLite implementation of the [`SnapshotStore`] capability.
//!
//! ## Storage Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart_snapshots                                                         │
//! │                                                                         │
//! │  key (PK)        │ payload (BLOB)                  │ updated_at        │
//! │  ────────────────┼─────────────────────────────────┼────────────────── │
//! │  steel-pos-cart  │ [{"product":{...},"quantity":2, │ 2026-08-06T…      │
//! │                  │   "addedAt":"…"}, …]            │                   │
//! │                                                                         │
//! │  One row per key. Every cart mutation rewrites the full payload        │
//! │  (upsert); clearing the cart deletes the row.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use crate::store::SnapshotStore;

/// Repository for cart snapshot rows.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.cart_snapshots();
/// let mut session = CartSession::open(repo).await;
/// ```
#[derive(Debug, Clone)]
pub struct CartSnapshotRepository {
    pool: SqlitePool,
}

impl CartSnapshotRepository {
    /// Creates a new CartSnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartSnapshotRepository { pool }
    }
}

impl SnapshotStore for CartSnapshotRepository {
    async fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let payload: Option<Vec<u8>> =
            sqlx::query_scalar("SELECT payload FROM cart_snapshots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = payload.is_some(), "Loaded cart snapshot");
        Ok(payload)
    }

    async fn save(&self, key: &str, payload: &[u8]) -> StoreResult<()> {
        debug!(key = %key, bytes = payload.len(), "Saving cart snapshot");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO cart_snapshots (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        debug!(key = %key, "Deleting cart snapshot");

        sqlx::query("DELETE FROM cart_snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> CartSnapshotRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.cart_snapshots()
    }

    #[tokio::test]
    async fn test_load_absent_key() {
        let repo = repo().await;
        assert_eq!(repo.load("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let repo = repo().await;

        repo.save("cart", b"[1,2,3]").await.unwrap();
        assert_eq!(repo.load("cart").await.unwrap(), Some(b"[1,2,3]".to_vec()));
    }

    #[tokio::test]
    async fn test_save_upserts() {
        let repo = repo().await;

        repo.save("cart", b"old").await.unwrap();
        repo.save("cart", b"new").await.unwrap();

        assert_eq!(repo.load("cart").await.unwrap(), Some(b"new".to_vec()));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_snapshots")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo = repo().await;

        repo.save("cart", b"payload").await.unwrap();
        repo.delete("cart").await.unwrap();
        assert_eq!(repo.load("cart").await.unwrap(), None);

        // Deleting an absent key is a success
        repo.delete("cart").await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let repo = repo().await;

        repo.save("a", b"aa").await.unwrap();
        repo.save("b", b"bb").await.unwrap();
        repo.delete("a").await.unwrap();

        assert_eq!(repo.load("a").await.unwrap(), None);
        assert_eq!(repo.load("b").await.unwrap(), Some(b"bb".to_vec()));
    }
}
