//! # Product Access Layer
//!
//! Catalog access: the generic CRUD surface bound to `products`, plus the
//! paged-listing and search endpoints and the paging cursor callers drive
//! incremental loading with.
//!
//! ## Paging Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ProductPager Flow                                 │
//! │                                                                         │
//! │  load_more()                                                           │
//! │     │                                                                   │
//! │     ├── has_more == false? ─────────► no-op (Ok(0))                    │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  GET products?skip={skip}&limit={limit}                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  append page.products to the buffer                                    │
//! │  skip += limit                                                         │
//! │  has_more = buffer.len() < page.total                                  │
//! │                                                                         │
//! │  reload(): skip = 0, buffer cleared, has_more = true, then load_more   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use steel_core::Product;
use tracing::debug;

use crate::crud::CrudClient;
use crate::error::ApiResult;
use crate::transport::{HttpTransport, RequestOptions};

/// Default page size for catalog listing.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// One page of the catalog listing: the slice plus the catalog-wide total.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
}

// =============================================================================
// ProductApi
// =============================================================================

/// Domain-specific extension of [`CrudClient`] bound to the `products`
/// resource.
#[derive(Clone)]
pub struct ProductApi {
    crud: CrudClient<Product>,
}

impl ProductApi {
    /// Creates the product API over the given transport.
    pub fn new(transport: HttpTransport) -> Self {
        ProductApi {
            crud: CrudClient::new(transport, "products"),
        }
    }

    /// Paged catalog listing. The caller supplies offset and limit
    /// explicitly; there is no server-side cursor token.
    pub async fn get_products(&self, skip: i64, limit: i64) -> ApiResult<ProductPage> {
        debug!(skip, limit, "get_products");
        self.crud
            .transport()
            .get(
                "products",
                RequestOptions::new().query("skip", skip).query("limit", limit),
            )
            .await
    }

    /// Full-text search against the server's search endpoint.
    ///
    /// Empty-query behavior is server-defined and deliberately not
    /// validated here.
    pub async fn search_products(&self, query: &str) -> ApiResult<ProductPage> {
        debug!(query = %query, "search_products");
        self.crud
            .transport()
            .get("products/search", RequestOptions::new().query("q", query))
            .await
    }

    // =========================================================================
    // CRUD pass-through
    // =========================================================================

    /// Lists products without paging metadata.
    pub async fn list(&self, options: RequestOptions) -> ApiResult<Vec<Product>> {
        self.crud.list(options).await
    }

    /// Fetches one product by id; NotFound when absent upstream.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<Product> {
        self.crud.get_by_id(id).await
    }

    /// Creates a product (server generates the id).
    pub async fn create<B: serde::Serialize + ?Sized>(&self, data: &B) -> ApiResult<Product> {
        self.crud.create(data).await
    }

    /// Updates a product by id.
    pub async fn update<B: serde::Serialize + ?Sized>(
        &self,
        id: &str,
        data: &B,
    ) -> ApiResult<Product> {
        self.crud.update(id, data).await
    }

    /// Deletes a product by id; true on success, classified error otherwise.
    pub async fn delete(&self, id: &str) -> ApiResult<bool> {
        self.crud.delete(id).await
    }
}

// =============================================================================
// ProductPager
// =============================================================================

/// Caller-held paging cursor accumulating catalog pages.
///
/// Session state only - never persisted. The `&mut self` receivers make a
/// second load while one is in flight unrepresentable, which is the
/// re-entrancy guard this cursor needs.
pub struct ProductPager {
    api: ProductApi,
    products: Vec<Product>,
    skip: i64,
    limit: i64,
    has_more: bool,
}

impl ProductPager {
    /// Creates a pager with the default page size.
    pub fn new(api: ProductApi) -> Self {
        Self::with_page_size(api, DEFAULT_PAGE_SIZE)
    }

    /// Creates a pager with a custom page size.
    pub fn with_page_size(api: ProductApi, limit: i64) -> Self {
        ProductPager {
            api,
            products: Vec::new(),
            skip: 0,
            limit,
            has_more: true,
        }
    }

    /// Loads the next page and appends it to the buffer.
    ///
    /// A call with nothing left to load is a no-op returning `Ok(0)`.
    /// Returns the number of products appended.
    pub async fn load_more(&mut self) -> ApiResult<usize> {
        if !self.has_more {
            return Ok(0);
        }

        let page = self.api.get_products(self.skip, self.limit).await?;

        let appended = page.products.len();
        self.products.extend(page.products);
        self.skip += self.limit;
        self.has_more = (self.products.len() as i64) < page.total;

        debug!(
            appended,
            loaded = self.products.len(),
            total = page.total,
            has_more = self.has_more,
            "Catalog page loaded"
        );

        Ok(appended)
    }

    /// Resets the cursor (skip 0, empty buffer, has_more true) and loads
    /// the first page.
    pub async fn reload(&mut self) -> ApiResult<usize> {
        self.skip = 0;
        self.products.clear();
        self.has_more = true;
        self.load_more().await
    }

    /// The accumulated products, in load order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Whether the catalog has pages left.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Number of products loaded so far.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when nothing has been loaded (or the catalog is empty).
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
