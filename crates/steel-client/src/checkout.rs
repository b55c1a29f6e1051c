//! # Checkout Submission
//!
//! Submits an order snapshot and reports the outcome as data, not as an
//! error.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Contract                                   │
//! │                                                                         │
//! │  create_order(payload)                                                 │
//! │       │                                                                 │
//! │       ├── payload invalid ─────────► { success: false, message }       │
//! │       │                                                                 │
//! │       ├── POST orders fails ───────► { success: false, message }       │
//! │       │    (classified; notification suppressed - the structured       │
//! │       │     result is the surfacing)                                   │
//! │       │                                                                 │
//! │       └── POST orders succeeds ────► server's response body            │
//! │                                                                         │
//! │  Single attempt, no retry. Callers branch on `success`; this call      │
//! │  never fails them.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Building the payload snapshot is the caller's job (or
//! `CheckoutPayload::from_cart`); this component only submits it.

use steel_core::{CheckoutPayload, CheckoutResponse};
use tracing::{debug, warn};

use crate::transport::{HttpTransport, RequestOptions};

/// Resource path orders are submitted to.
const ORDERS_RESOURCE: &str = "orders";

/// Checkout submission client.
#[derive(Clone)]
pub struct CheckoutApi {
    transport: HttpTransport,
}

impl CheckoutApi {
    /// Creates the checkout API over the given transport.
    pub fn new(transport: HttpTransport) -> Self {
        CheckoutApi { transport }
    }

    /// Submits an order. Asynchronous, single attempt, no retry.
    ///
    /// Always returns a structured result: validation failures and
    /// classified transport errors fold into `success: false` with a
    /// user-facing message.
    pub async fn create_order(&self, payload: &CheckoutPayload) -> CheckoutResponse {
        if let Err(e) = payload.validate() {
            warn!(error = %e, "Rejecting checkout payload before submission");
            return CheckoutResponse::failure(e.to_string());
        }

        debug!(
            items = payload.items.len(),
            grand_total = %payload.grand_total,
            "Submitting order"
        );

        match self
            .transport
            .post::<CheckoutResponse, _>(ORDERS_RESOURCE, payload, RequestOptions::new().silent())
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "Order submission failed");
                CheckoutResponse::failure(err.user_message())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use steel_core::{Cart, CustomerInfo, Product};

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

    fn payload() -> CheckoutPayload {
        let mut cart = Cart::new();
        cart.add_item(&test_product("a", 100.0));
        cart.add_item(&test_product("a", 100.0));
        cart.add_item(&test_product("b", 50.0));
        CheckoutPayload::from_cart(&cart, CustomerInfo::default())
    }

    #[tokio::test]
    async fn test_successful_order() {
        let app = Router::new().route(
            "/orders",
            post(|Json(body): Json<Value>| async move {
                // The wire payload carries the snapshot and computed totals
                assert_eq!(body["items"].as_array().unwrap().len(), 2);
                assert_eq!(body["grandTotal"], 27750);
                Json(json!({
                    "success": true,
                    "message": "Order created successfully",
                    "orderId": "ORD-1001"
                }))
            }),
        );
        let base = testutil::spawn(app).await;
        let api = CheckoutApi::new(testutil::transport_to(&base));

        let response = api.create_order(&payload()).await;
        assert!(response.success);
        assert_eq!(response.order_id.as_deref(), Some("ORD-1001"));
    }

    #[tokio::test]
    async fn test_server_declines_order() {
        let app = Router::new().route(
            "/orders",
            post(|| async {
                Json(json!({"success": false, "message": "Gagal menambahkan data"}))
            }),
        );
        let base = testutil::spawn(app).await;
        let api = CheckoutApi::new(testutil::transport_to(&base));

        let response = api.create_order(&payload()).await;
        assert!(!response.success);
        assert_eq!(response.message, "Gagal menambahkan data");
        assert!(response.order_id.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_folds_into_result() {
        let app = Router::new().route(
            "/orders",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))) }),
        );
        let base = testutil::spawn(app).await;
        let api = CheckoutApi::new(testutil::transport_to(&base));

        let response = api.create_order(&payload()).await;
        assert!(!response.success);
        assert_eq!(response.message, "Server Error. Coba lagi nanti.");
    }

    #[tokio::test]
    async fn test_no_connection_folds_into_result() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let api = CheckoutApi::new(testutil::transport_to(&base));
        let response = api.create_order(&payload()).await;
        assert!(!response.success);
        assert_eq!(response.message, "Tidak ada koneksi internet");
    }

    #[tokio::test]
    async fn test_invalid_payload_never_hits_the_wire() {
        // Unbound port: any request would fail loudly, but validation
        // rejects the empty payload first
        let api = CheckoutApi::new(testutil::transport_to("http://127.0.0.1:9"));

        let empty = CheckoutPayload {
            items: Vec::new(),
            customer_name: None,
            phone_number: None,
            total: steel_core::Money::zero(),
            tax: steel_core::Money::zero(),
            grand_total: steel_core::Money::zero(),
        };

        let response = api.create_order(&empty).await;
        assert!(!response.success);
        assert_eq!(response.message, "items is required");
    }
}
