//! # Cart Session
//!
//! The stateful cart engine: one hydrated cart, one snapshot store handle.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Session Lifecycle                             │
//! │                                                                         │
//! │  CartSession::open(store)                                              │
//! │       │                                                                 │
//! │       ├── store.load("steel-pos-cart")                                 │
//! │       │      ├── payload parses  → hydrated cart (order preserved)     │
//! │       │      ├── key absent      → empty cart                          │
//! │       │      └── corrupt/error   → empty cart (warn, never fatal)      │
//! │       ▼                                                                 │
//! │  mutation (add / remove / update / increment / decrement)              │
//! │       │                                                                 │
//! │       ├── pure op on the in-memory cart                                │
//! │       └── changed? → store.save(full item sequence)  ◄── before return │
//! │                                                                         │
//! │  clear_cart()                                                          │
//! │       └── empty items + store.delete(key)   ◄── row gone, not emptied  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The session holds no lock: mutations take `&mut self`, so interleaved
//! mutations cannot be expressed. Ownership of the session belongs to the
//! composition root, which hands out references as needed.

use steel_core::{Cart, CartItem, CartTotals, Product};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::store::SnapshotStore;

/// The fixed key the cart snapshot is persisted under.
pub const CART_STORAGE_KEY: &str = "steel-pos-cart";

/// Stateful cart engine bound to a snapshot store.
///
/// Every mutating operation that changes the item list persists the full
/// snapshot before returning, so a caller observing a successful mutation
/// is guaranteed the store reflects it. Persistence failures surface as
/// [`crate::StoreError`]; the in-memory mutation is applied either way.
#[derive(Debug)]
pub struct CartSession<S: SnapshotStore> {
    cart: Cart,
    store: S,
}

impl<S: SnapshotStore> CartSession<S> {
    /// Opens a session, hydrating the cart from the store.
    ///
    /// Hydration is best-effort: an absent key or a payload that fails to
    /// parse yields an empty cart, never an error.
    pub async fn open(store: S) -> Self {
        let cart = match store.load(CART_STORAGE_KEY).await {
            Ok(Some(payload)) => match serde_json::from_slice::<Vec<CartItem>>(&payload) {
                Ok(items) => {
                    debug!(items = items.len(), "Hydrated cart snapshot");
                    Cart::from_items(items)
                }
                Err(e) => {
                    warn!(error = %e, "Corrupt cart snapshot, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Cart snapshot unreadable, starting empty");
                Cart::new()
            }
        };

        CartSession { cart, store }
    }

    /// Serializes the full item sequence back under the fixed key.
    async fn persist(&self) -> StoreResult<()> {
        let payload = serde_json::to_vec(self.cart.items())?;
        self.store.save(CART_STORAGE_KEY, &payload).await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product: existing line gains quantity 1, otherwise a new line
    /// with quantity 1 is appended. Always persists.
    pub async fn add_to_cart(&mut self, product: &Product) -> StoreResult<()> {
        debug!(product_id = %product.id, "add_to_cart");
        self.cart.add_item(product);
        self.persist().await
    }

    /// Removes the matching line if present; a no-op (not an error) if
    /// absent. No-ops skip the persistence write.
    pub async fn remove_from_cart(&mut self, product_id: &str) -> StoreResult<()> {
        debug!(product_id = %product_id, "remove_from_cart");
        if self.cart.remove_item(product_id) {
            self.persist().await
        } else {
            Ok(())
        }
    }

    /// Sets a line's quantity.
    ///
    /// `quantity <= 0` behaves exactly like [`CartSession::remove_from_cart`];
    /// an absent id is a no-op (this never creates a line).
    pub async fn update_quantity(&mut self, product_id: &str, quantity: i64) -> StoreResult<()> {
        debug!(product_id = %product_id, quantity = %quantity, "update_quantity");
        if self.cart.set_quantity(product_id, quantity) {
            self.persist().await
        } else {
            Ok(())
        }
    }

    /// Raises the line's quantity by 1 (current quantity 0 if absent).
    pub async fn increment_quantity(&mut self, product_id: &str) -> StoreResult<()> {
        let next = self.cart.quantity_of(product_id) + 1;
        self.update_quantity(product_id, next).await
    }

    /// Lowers the line's quantity by 1; at quantity 1 this removes the line.
    pub async fn decrement_quantity(&mut self, product_id: &str) -> StoreResult<()> {
        let next = self.cart.quantity_of(product_id) - 1;
        self.update_quantity(product_id, next).await
    }

    /// Empties the cart AND deletes the persisted record.
    ///
    /// Distinct from the other mutations, which would write an empty-list
    /// snapshot: clearing erases the row entirely.
    pub async fn clear_cart(&mut self) -> StoreResult<()> {
        debug!("clear_cart");
        self.cart.clear();
        self.store.delete(CART_STORAGE_KEY).await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current quantity for a product id; 0 if absent. Pure read.
    pub fn get_quantity(&self, product_id: &str) -> i64 {
        self.cart.quantity_of(product_id)
    }

    /// The hydrated cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The item list, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Derived totals summary.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use steel_core::Product;

    fn test_product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {}", id),
            description: String::new(),
            price,
            discount_percentage: 0.0,
            rating: 0.0,
            stock: 100,
            brand: String::new(),
            category: String::new(),
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_open_with_empty_store() {
        let session = CartSession::open(MemoryStore::new()).await;
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_mutations_persist_immediately() {
        let store = MemoryStore::new();
        let mut session = CartSession::open(store.clone()).await;

        session.add_to_cart(&test_product("a", 9.99)).await.unwrap();

        // The store reflects the mutation before anything else happens
        let payload = store.peek(CART_STORAGE_KEY).expect("snapshot written");
        let items: Vec<CartItem> = serde_json::from_slice(&payload).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_reload_restores_cart() {
        let store = MemoryStore::new();

        let a = test_product("a", 100.0);
        let b = test_product("b", 50.0);

        {
            let mut session = CartSession::open(store.clone()).await;
            session.add_to_cart(&a).await.unwrap();
            session.add_to_cart(&a).await.unwrap();
            session.add_to_cart(&b).await.unwrap();
        }

        // Simulated process restart: a fresh session over the same store
        let session = CartSession::open(store).await;
        assert_eq!(session.get_quantity("a"), 2);
        assert_eq!(session.get_quantity("b"), 1);

        // Insertion order survived the reload
        let ids: Vec<&str> = session.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        // And so did the derived totals
        let totals = session.totals();
        assert_eq!(totals.subtotal.cents(), 25000);
        assert_eq!(totals.tax.cents(), 2750);
        assert_eq!(totals.grand_total.cents(), 27750);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_yields_empty_cart() {
        let store = MemoryStore::new();
        store.seed(CART_STORAGE_KEY, b"{ not json ]".to_vec());

        let session = CartSession::open(store).await;
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_remove_then_quantity_zero() {
        let mut session = CartSession::open(MemoryStore::new()).await;
        session.add_to_cart(&test_product("a", 1.0)).await.unwrap();

        session.remove_from_cart("a").await.unwrap();
        assert_eq!(session.get_quantity("a"), 0);

        // Absent id: clean no-op
        session.remove_from_cart("a").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_quantity_zero_removes_and_persists() {
        let store = MemoryStore::new();
        let mut session = CartSession::open(store.clone()).await;

        session.add_to_cart(&test_product("a", 1.0)).await.unwrap();
        session.update_quantity("a", 0).await.unwrap();

        assert_eq!(session.get_quantity("a"), 0);

        // The persisted snapshot is an empty list, not the stale one
        let payload = store.peek(CART_STORAGE_KEY).unwrap();
        let items: Vec<CartItem> = serde_json::from_slice(&payload).unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_update_quantity_absent_id_writes_nothing() {
        let store = MemoryStore::new();
        let mut session = CartSession::open(store.clone()).await;

        session.update_quantity("ghost", 5).await.unwrap();

        assert_eq!(session.get_quantity("ghost"), 0);
        assert!(store.peek(CART_STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_increment_decrement_round_trip() {
        let mut session = CartSession::open(MemoryStore::new()).await;
        let a = test_product("a", 2.5);

        session.add_to_cart(&a).await.unwrap();
        session.update_quantity("a", 4).await.unwrap();

        session.increment_quantity("a").await.unwrap();
        session.decrement_quantity("a").await.unwrap();
        assert_eq!(session.get_quantity("a"), 4);

        // From 0: decrement must not go negative, increment must not create
        session.remove_from_cart("a").await.unwrap();
        session.decrement_quantity("a").await.unwrap();
        session.increment_quantity("a").await.unwrap();
        assert_eq!(session.get_quantity("a"), 0);
    }

    #[tokio::test]
    async fn test_clear_cart_erases_persisted_record() {
        let store = MemoryStore::new();
        let mut session = CartSession::open(store.clone()).await;

        session.add_to_cart(&test_product("a", 1.0)).await.unwrap();
        assert!(store.peek(CART_STORAGE_KEY).is_some());

        session.clear_cart().await.unwrap();
        assert!(session.cart().is_empty());

        // The record is GONE, not an empty list
        assert!(store.peek(CART_STORAGE_KEY).is_none());

        // A reload (simulated restart) sees an empty cart, not a stale one
        let reloaded = CartSession::open(store).await;
        assert!(reloaded.cart().is_empty());
    }

    #[tokio::test]
    async fn test_session_against_sqlite_store() {
        use crate::pool::{Database, DbConfig};

        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        {
            let mut session = CartSession::open(db.cart_snapshots()).await;
            session.add_to_cart(&test_product("a", 100.0)).await.unwrap();
            session.add_to_cart(&test_product("a", 100.0)).await.unwrap();
        }

        let session = CartSession::open(db.cart_snapshots()).await;
        assert_eq!(session.get_quantity("a"), 2);
        assert_eq!(session.totals().subtotal.cents(), 20000);
    }
}
