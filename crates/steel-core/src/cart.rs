//! # Cart
//!
//! The cart aggregate: quantity aggregation and derived pricing.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Caller Action              Cart Operation          Items Change        │
//! │  ─────────────              ──────────────          ────────────        │
//! │                                                                         │
//! │  Pick product ─────────────► add_item() ──────────► qty += 1 or push   │
//! │                                                                         │
//! │  Change quantity ──────────► set_quantity() ──────► qty = n (n ≤ 0     │
//! │                                                     removes the item)   │
//! │                                                                         │
//! │  Remove line ──────────────► remove_item() ───────► retain others      │
//! │                                                                         │
//! │  Cancel sale ──────────────► clear() ─────────────► items.clear()      │
//! │                                                                         │
//! │  Read totals ──────────────► subtotal()/tax()/... ─► (read only)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by product id (adding the same product increments
//!   quantity)
//! - Quantity is always ≥ 1 (a mutation that would drive it to 0 or below
//!   removes the item instead)
//! - Insertion order is preserved, including across persistence reloads
//! - Totals are derived on every access, never stored

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, TaxRate};
use crate::CART_TAX_RATE_BPS;

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the shopping cart: a product snapshot paired with a quantity.
///
/// The embedded product is a frozen copy taken when the item was first
/// added. A later refetch of the catalog does not rewrite lines already in
/// the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product snapshot at time of adding.
    pub product: Product,

    /// Quantity in cart. Always ≥ 1.
    pub quantity: i64,

    /// When this item was first added.
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    fn new(product: &Product) -> Self {
        CartItem {
            product: product.clone(),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Line total: unit price × quantity, in cents.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart aggregate root.
///
/// The item list is private: all mutation goes through the operations below
/// so the invariants hold. Hydration from a persisted snapshot goes through
/// [`Cart::from_items`], which sanitizes whatever was on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from a persisted item sequence.
    ///
    /// Snapshots are trusted data we wrote ourselves, but a reload must
    /// never break the invariants, so the sequence is sanitized: lines with
    /// non-positive quantity are dropped, and duplicate product ids are
    /// merged into the first occurrence. Insertion order is preserved.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            if item.quantity <= 0 {
                continue;
            }
            match cart.find_mut(&item.product.id) {
                Some(existing) => existing.quantity += item.quantity,
                None => cart.items.push(item),
            }
        }
        cart
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.product.id == product_id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================
    // Each mutation reports whether it changed the item list, so the caller
    // (the session engine) knows whether a persistence write is due.

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by 1
    /// - Product not in cart: appended with quantity 1
    ///
    /// Always changes the cart; always returns `true`.
    pub fn add_item(&mut self, product: &Product) -> bool {
        match self.find_mut(&product.id) {
            Some(item) => item.quantity += 1,
            None => self.items.push(CartItem::new(product)),
        }
        true
    }

    /// Removes an item by product id.
    ///
    /// Removing an absent id is a no-op, not an error. Returns whether an
    /// item was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != before
    }

    /// Sets the quantity of an item.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: behaves exactly like [`Cart::remove_item`]
    /// - item present: quantity is set to the given value
    /// - item absent: no-op - this does NOT create an item (intentionally
    ///   asymmetric with [`Cart::add_item`])
    ///
    /// Returns whether the item list changed.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        match self.find_mut(product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Increments an item's quantity by 1 (via [`Cart::set_quantity`]).
    pub fn increment(&mut self, product_id: &str) -> bool {
        self.set_quantity(product_id, self.quantity_of(product_id) + 1)
    }

    /// Decrements an item's quantity by 1 (via [`Cart::set_quantity`]).
    ///
    /// Decrementing from quantity 1 removes the item; decrementing an
    /// absent item stays a no-op (0 − 1 takes the removal path).
    pub fn decrement(&mut self, product_id: &str) -> bool {
        self.set_quantity(product_id, self.quantity_of(product_id) - 1)
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current quantity for a product id; 0 if absent.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// The item list, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct items (lines).
    pub fn distinct_items(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Derived Totals
    // =========================================================================
    // Recomputed from `items` on every access. There is no cached copy to
    // invalidate, so the values can never diverge from the item list.

    /// Total quantity across all items.
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of price × quantity per item, in cents.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |sum, i| sum + i.line_total())
    }

    /// Tax on the subtotal at the fixed cart rate (11%).
    pub fn tax(&self) -> Money {
        self.subtotal()
            .calculate_tax(TaxRate::from_bps(CART_TAX_RATE_BPS))
    }

    /// Subtotal + tax.
    pub fn grand_total(&self) -> Money {
        self.subtotal() + self.tax()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary, e.g. for display or checkout payload assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub distinct_items: usize,
    pub total_items: i64,
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            distinct_items: cart.distinct_items(),
            total_items: cart.total_items(),
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            grand_total: cart.grand_total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_add_aggregates_by_product_id() {
        let mut cart = Cart::new();
        let a = test_product("a", 9.99);
        let b = test_product("b", 4.99);

        cart.add_item(&a);
        cart.add_item(&a);
        cart.add_item(&b);
        cart.add_item(&a);

        // Distinct items = distinct ids; per-id quantity = add count
        assert_eq!(cart.distinct_items(), 2);
        assert_eq!(cart.quantity_of("a"), 3);
        assert_eq!(cart.quantity_of("b"), 1);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("z", 1.0));
        cart.add_item(&test_product("a", 1.0));
        cart.add_item(&test_product("z", 1.0));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn test_remove_then_quantity_is_zero() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("a", 1.0));

        assert!(cart.remove_item("a"));
        assert_eq!(cart.quantity_of("a"), 0);

        // Removing an absent id is a no-op, not an error
        assert!(!cart.remove_item("a"));
        assert!(!cart.remove_item("never-added"));
    }

    #[test]
    fn test_set_quantity_nonpositive_equals_remove() {
        for q in [0, -1, -42] {
            let mut cart = Cart::new();
            cart.add_item(&test_product("a", 1.0));
            cart.set_quantity("a", q);
            assert_eq!(cart.quantity_of("a"), 0);
            assert!(cart.is_empty());

            // Same call against an absent id is also a clean no-op
            let mut empty = Cart::new();
            empty.set_quantity("a", q);
            assert!(empty.is_empty());
        }
    }

    #[test]
    fn test_set_quantity_absent_id_does_not_create() {
        let mut cart = Cart::new();
        assert!(!cart.set_quantity("ghost", 5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_decrement_round_trip() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("a", 1.0));
        cart.set_quantity("a", 3);

        cart.increment("a");
        cart.decrement("a");
        assert_eq!(cart.quantity_of("a"), 3);

        // From 0: item absent both before and after, never negative
        cart.remove_item("a");
        cart.increment("a"); // set_quantity(1) on absent id → no-op
        cart.decrement("a"); // set_quantity(-1) → removal path → no-op
        assert_eq!(cart.quantity_of("a"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_from_one_removes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("a", 1.0));
        cart.decrement("a");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_derived_totals_example() {
        // Product A (price 100, qty 2) and Product B (price 50, qty 1):
        // subtotal = 250, tax = 27.5, grandTotal = 277.5
        let mut cart = Cart::new();
        let a = test_product("a", 100.0);
        let b = test_product("b", 50.0);
        cart.add_item(&a);
        cart.add_item(&a);
        cart.add_item(&b);

        assert_eq!(cart.subtotal().cents(), 25000);
        assert_eq!(cart.tax().cents(), 2750);
        assert_eq!(cart.grand_total().cents(), 27750);
    }

    #[test]
    fn test_totals_recomputed_after_every_mutation() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(), Money::zero());

        cart.add_item(&test_product("a", 9.99));
        assert_eq!(cart.subtotal().cents(), 999);

        cart.set_quantity("a", 4);
        assert_eq!(cart.subtotal().cents(), 3996);

        cart.clear();
        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.grand_total(), Money::zero());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_from_items_sanitizes_snapshot() {
        let a = test_product("a", 1.0);
        let b = test_product("b", 2.0);
        let items = vec![
            CartItem {
                product: a.clone(),
                quantity: 2,
                added_at: Utc::now(),
            },
            CartItem {
                product: b.clone(),
                quantity: 0, // dropped
                added_at: Utc::now(),
            },
            CartItem {
                product: a.clone(),
                quantity: 3, // merged into first "a"
                added_at: Utc::now(),
            },
        ];

        let cart = Cart::from_items(items);
        assert_eq!(cart.distinct_items(), 1);
        assert_eq!(cart.quantity_of("a"), 5);
        assert_eq!(cart.quantity_of("b"), 0);
    }

    #[test]
    fn test_cart_totals_summary() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("a", 100.0));
        cart.add_item(&test_product("a", 100.0));
        cart.add_item(&test_product("b", 50.0));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.distinct_items, 2);
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.subtotal.cents(), 25000);
        assert_eq!(totals.tax.cents(), 2750);
        assert_eq!(totals.grand_total.cents(), 27750);
    }

    #[test]
    fn test_snapshot_serialization_round_trip() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("a", 9.99));
        cart.add_item(&test_product("b", 4.5));
        cart.set_quantity("a", 7);

        let json = serde_json::to_vec(cart.items()).unwrap();
        let items: Vec<CartItem> = serde_json::from_slice(&json).unwrap();
        let reloaded = Cart::from_items(items);

        assert_eq!(reloaded.quantity_of("a"), 7);
        assert_eq!(reloaded.quantity_of("b"), 1);
        assert_eq!(reloaded.subtotal(), cart.subtotal());
    }
}
