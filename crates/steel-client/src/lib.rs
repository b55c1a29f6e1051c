//! # steel-client: Remote REST Access for Steel POS
//!
//! Typed access to the remote storefront API: catalog reads, generic CRUD,
//! and checkout submission, with every failure normalized into one of six
//! user-facing categories.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     steel-client (THIS CRATE)                           │
//! │                                                                         │
//! │  ┌─────────────┐   ┌──────────────┐   ┌─────────────────────────────┐  │
//! │  │ ClientConfig│──►│HttpTransport │◄──│ Notifier (LogNotifier /     │  │
//! │  │ (config.rs) │   │(transport.rs)│   │ ChannelNotifier, notify.rs) │  │
//! │  └─────────────┘   └──────┬───────┘   └─────────────────────────────┘  │
//! │                           │                                             │
//! │            ┌──────────────┼──────────────────┐                          │
//! │            ▼              ▼                  ▼                          │
//! │   ┌────────────────┐ ┌───────────────┐ ┌──────────────┐                │
//! │   │ CrudClient<T>  │ │  ProductApi   │ │ CheckoutApi  │                │
//! │   │   (crud.rs)    │ │ + ProductPager│ │ (checkout.rs)│                │
//! │   │ list/get/      │ │ (products.rs) │ │ create_order │                │
//! │   │ create/update/ │ │ paging cursor │ │ → structured │                │
//! │   │ delete         │ │ + search      │ │   result     │                │
//! │   └────────────────┘ └───────────────┘ └──────────────┘                │
//! │                                                                         │
//! │  All failures flow through ONE classification point in the transport:  │
//! │  NoConnection │ ServerError │ NotFound │ Forbidden │ BadRequest │ Other│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use steel_client::{ClientConfig, HttpTransport, ProductApi, ProductPager};
//!
//! let config = ClientConfig::load_or_default(None);
//! let transport = HttpTransport::new(&config)?;
//!
//! let mut pager = ProductPager::new(ProductApi::new(transport));
//! pager.load_more().await?;
//! for product in pager.products() {
//!     println!("{} - {}", product.title, product.price());
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod crud;
pub mod error;
pub mod notify;
pub mod products;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::CheckoutApi;
pub use config::{ClientConfig, ConfigError};
pub use crud::CrudClient;
pub use error::{ApiError, ApiResult, ErrorCategory};
pub use notify::{ChannelNotifier, LogNotifier, Notification, Notifier};
pub use products::{ProductApi, ProductPage, ProductPager, DEFAULT_PAGE_SIZE};
pub use transport::{HttpTransport, RequestOptions};
