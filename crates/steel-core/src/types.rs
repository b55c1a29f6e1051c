//! # Domain Types
//!
//! Core domain types used throughout the Steel POS storefront client.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ CheckoutPayload │   │CheckoutResponse │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (String)    │   │  items          │   │  success        │       │
//! │  │  title, brand   │   │  customer info  │   │  message        │       │
//! │  │  price (f64)    │   │  total/tax/grand│   │  order_id?      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │    TaxRate      │                                                   │
//! │  │  ─────────────  │                                                   │
//! │  │  bps (u32)      │                                                   │
//! │  │  1100 = 11%     │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable from the client's perspective: never mutated
//! locally, only replaced by refetch.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_customer_name, validate_phone_number, validate_price, validate_quantity,
};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1100 bps = 11% (the fixed cart rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as delivered by the remote REST API.
///
/// ## Price Handling
/// The API delivers `price` as a decimal. That decimal is kept verbatim on
/// the struct (it round-trips through serialization untouched) and converted
/// to integer-cent [`Money`] exactly once, via [`Product::price`], before any
/// cart math happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the server.
    pub id: String,

    /// Display title shown in the catalog and on receipts.
    pub title: String,

    /// Longer description for product detail views.
    #[serde(default)]
    pub description: String,

    /// Unit price in major currency units, as delivered by the API.
    pub price: f64,

    /// Discount percentage (0-100). Not applied automatically.
    #[serde(default)]
    pub discount_percentage: f64,

    /// Customer rating.
    #[serde(default)]
    pub rating: f64,

    /// Units in stock.
    #[serde(default)]
    pub stock: i64,

    /// Brand name. Some catalog entries omit it.
    #[serde(default)]
    pub brand: String,

    /// Category slug.
    #[serde(default)]
    pub category: String,

    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: String,

    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Returns the unit price as integer-cent Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_major_units(self.price)
    }

    /// Returns the unit price with `discount_percentage` applied.
    ///
    /// The percentage is converted to basis points so the discount math
    /// stays in integer cents.
    pub fn discounted_price(&self) -> Money {
        let discount_bps = (self.discount_percentage * 100.0).round() as u32;
        self.price().apply_percentage_discount(discount_bps)
    }

    /// Checks whether the product has stock available.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// Optional customer details captured at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
}

/// One line of a checkout payload: a product reference with the quantity
/// and the unit price frozen at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_id: String,
    pub quantity: i64,
    /// Unit price in cents.
    pub price: Money,
}

/// The full order submission: a snapshot of cart lines, the computed
/// totals, and optional customer details.
///
/// Building the snapshot is the caller's responsibility; [`from_cart`] is
/// the convenience path that freezes the current cart state.
///
/// [`from_cart`]: CheckoutPayload::from_cart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub items: Vec<CheckoutLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Cart subtotal in cents.
    pub total: Money,
    /// Tax in cents.
    pub tax: Money,
    /// Subtotal + tax, in cents.
    pub grand_total: Money,
}

impl CheckoutPayload {
    /// Freezes the given cart into a checkout payload.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let payload = CheckoutPayload::from_cart(session.cart(), CustomerInfo::default());
    /// let response = checkout.create_order(&payload).await;
    /// ```
    pub fn from_cart(cart: &Cart, customer: CustomerInfo) -> Self {
        let items = cart
            .items()
            .iter()
            .map(|item| CheckoutLine {
                product_id: item.product.id.clone(),
                quantity: item.quantity,
                price: item.product.price(),
            })
            .collect();

        CheckoutPayload {
            items,
            customer_name: customer.customer_name,
            phone_number: customer.phone_number,
            total: cart.subtotal(),
            tax: cart.tax(),
            grand_total: cart.grand_total(),
        }
    }

    /// Validates the payload before submission.
    ///
    /// ## Rules
    /// - At least one line
    /// - Every line: positive quantity, non-negative price
    /// - Customer name and phone, when present, within bounds
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::Required {
                field: "items".to_string(),
            });
        }

        for line in &self.items {
            validate_quantity(line.quantity)?;
            validate_price(line.price)?;
        }

        if let Some(ref name) = self.customer_name {
            validate_customer_name(name)?;
        }
        if let Some(ref phone) = self.phone_number {
            validate_phone_number(phone)?;
        }

        Ok(())
    }
}

/// Result of a checkout submission.
///
/// Checkout failures are modeled as `success: false`, never as an error:
/// callers branch on the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl CheckoutResponse {
    /// Builds a failure response with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        CheckoutResponse {
            success: false,
            message: message.into(),
            order_id: None,
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
            stock: 10,
            brand: String::new(),
            category: String::new(),
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_tax_rate_conversions() {
        let rate = TaxRate::from_bps(1100);
        assert_eq!(rate.bps(), 1100);
        assert!((rate.percentage() - 11.0).abs() < 0.001);

        assert_eq!(TaxRate::from_percentage(11.0).bps(), 1100);
        assert!(TaxRate::default().is_zero());
    }

    #[test]
    fn test_product_price_to_money() {
        let product = test_product("p1", 549.99);
        assert_eq!(product.price().cents(), 54999);
    }

    #[test]
    fn test_product_discounted_price() {
        let mut product = test_product("p1", 100.0);
        product.discount_percentage = 12.5;
        assert_eq!(product.discounted_price().cents(), 8750);
    }

    #[test]
    fn test_product_deserializes_camel_case() {
        let json = r#"{
            "id": "42",
            "title": "Wrench",
            "description": "A wrench",
            "price": 9.99,
            "discountPercentage": 5.5,
            "rating": 4.2,
            "stock": 7,
            "brand": "Acme",
            "category": "tools",
            "thumbnail": "https://example.com/t.png",
            "images": ["https://example.com/1.png"]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "42");
        assert!((product.discount_percentage - 5.5).abs() < f64::EPSILON);
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn test_product_tolerates_missing_optional_fields() {
        let json = r#"{ "id": "1", "title": "Bare", "price": 1.0 }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.brand, "");
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_checkout_payload_from_cart() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("a", 100.0));
        cart.add_item(&test_product("a", 100.0));
        cart.add_item(&test_product("b", 50.0));

        let payload = CheckoutPayload::from_cart(&cart, CustomerInfo::default());

        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[0].quantity, 2);
        assert_eq!(payload.total.cents(), 25000);
        assert_eq!(payload.tax.cents(), 2750);
        assert_eq!(payload.grand_total.cents(), 27750);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_checkout_payload_validation_rejects_empty() {
        let payload = CheckoutPayload {
            items: Vec::new(),
            customer_name: None,
            phone_number: None,
            total: Money::zero(),
            tax: Money::zero(),
            grand_total: Money::zero(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_checkout_payload_serializes_camel_case() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("a", 2.5));
        let payload = CheckoutPayload::from_cart(
            &cart,
            CustomerInfo {
                customer_name: Some("Budi".to_string()),
                phone_number: None,
            },
        );
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"grandTotal\""));
        assert!(json.contains("\"productId\""));
        assert!(json.contains("\"customerName\""));
        assert!(!json.contains("phoneNumber"));
    }

    #[test]
    fn test_checkout_response_defaults() {
        let resp: CheckoutResponse =
            serde_json::from_str(r#"{ "success": true, "message": "ok" }"#).unwrap();
        assert!(resp.success);
        assert!(resp.order_id.is_none());

        let failure = CheckoutResponse::failure("nope");
        assert!(!failure.success);
        assert_eq!(failure.message, "nope");
    }
}
