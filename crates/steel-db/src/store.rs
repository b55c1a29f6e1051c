//! # Snapshot Store Capability
//!
//! The injected key-value store the cart engine persists through.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Snapshot Store Implementations                      │
//! │                                                                         │
//! │                      ┌─────────────────┐                                │
//! │                      │  SnapshotStore  │  load / save / delete          │
//! │                      │     (trait)     │  one opaque byte payload       │
//! │                      └────────┬────────┘  per key                       │
//! │                               │                                         │
//! │               ┌───────────────┴───────────────┐                         │
//! │               ▼                               ▼                         │
//! │     ┌──────────────────┐          ┌─────────────────────────┐           │
//! │     │   MemoryStore    │          │ CartSnapshotRepository  │           │
//! │     │                  │          │   (repository/cart.rs)  │           │
//! │     │  HashMap behind  │          │                         │           │
//! │     │  a shared Mutex  │          │  SQLite row per key     │           │
//! │     │  (tests, demos)  │          │  (production)           │           │
//! │     └──────────────────┘          └─────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine neither knows nor cares what sits behind the trait; malformed
//! or missing payloads are its problem to tolerate, not the store's.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::StoreResult;

// =============================================================================
// SnapshotStore Trait
// =============================================================================

/// Key-value byte store for cart snapshots.
///
/// ## Contract
/// - `load` returns `None` for an absent key, never an empty payload
/// - `save` overwrites any existing payload for the key (upsert)
/// - `delete` on an absent key is a success
///
/// There are no timeouts at this layer; the store is local and assumed
/// available.
pub trait SnapshotStore: Send + Sync {
    /// Reads the payload stored under `key`, if any.
    fn load(&self, key: &str) -> impl Future<Output = StoreResult<Option<Vec<u8>>>> + Send;

    /// Writes `payload` under `key`, replacing any previous value.
    fn save(&self, key: &str, payload: &[u8]) -> impl Future<Output = StoreResult<()>> + Send;

    /// Removes the record under `key` entirely.
    fn delete(&self, key: &str) -> impl Future<Output = StoreResult<()>> + Send;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory snapshot store.
///
/// Clones share the same underlying map, so a test can hand one clone to a
/// session and inspect (or reopen from) the other - the same way two
/// sessions against one SQLite file would behave.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, e.g. to simulate an existing snapshot.
    pub fn seed(&self, key: &str, payload: Vec<u8>) {
        self.entries
            .lock()
            .expect("snapshot store mutex poisoned")
            .insert(key.to_string(), payload);
    }

    /// Returns the current payload for a key (test inspection).
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .expect("snapshot store mutex poisoned")
            .get(key)
            .cloned()
    }
}

impl SnapshotStore for MemoryStore {
    async fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.peek(key))
    }

    async fn save(&self, key: &str, payload: &[u8]) -> StoreResult<()> {
        self.entries
            .lock()
            .expect("snapshot store mutex poisoned")
            .insert(key.to_string(), payload.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .expect("snapshot store mutex poisoned")
            .remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
