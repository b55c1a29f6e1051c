//! # Generic CRUD Client
//!
//! Typed REST access to one resource, parametrized over the entity shape.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CrudClient<T> Operations                             │
//! │                                                                         │
//! │  list(options)        GET    {resource}          → Vec<T>              │
//! │  get_by_id(id)        GET    {resource}/{id}     → T                   │
//! │  create(partial)      POST   {resource}          → T  (server owns id) │
//! │  update(id, partial)  PUT    {resource}/{id}     → T                   │
//! │  delete(id)           DELETE {resource}/{id}     → true                │
//! │                                                                         │
//! │  No local caching: every call round-trips. Failures arrive already    │
//! │  classified by the transport and pass through unchanged.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::transport::{HttpTransport, RequestOptions};

/// Generic CRUD client bound to a fixed resource path at construction.
#[derive(Clone)]
pub struct CrudClient<T> {
    transport: HttpTransport,
    resource: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> CrudClient<T> {
    /// Binds a client to a resource path, e.g. `products`.
    pub fn new(transport: HttpTransport, resource: impl Into<String>) -> Self {
        CrudClient {
            transport,
            resource: resource.into(),
            _entity: PhantomData,
        }
    }

    /// The bound resource path.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The underlying transport (for resource-specific extensions).
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Lists entities.
    ///
    /// The known backend wraps listings as `{ <resourceName>: [...], total }`;
    /// a bare JSON array is accepted too. Either way the caller gets the
    /// entity sequence.
    pub async fn list(&self, options: RequestOptions) -> ApiResult<Vec<T>> {
        let body: serde_json::Value = self.transport.get(&self.resource, options).await?;

        let entities = match body {
            serde_json::Value::Array(_) => body,
            serde_json::Value::Object(mut map) => map
                .remove(self.resource.as_str())
                .ok_or_else(|| {
                    ApiError::Other(format!(
                        "listing response has no '{}' field",
                        self.resource
                    ))
                })?,
            _ => {
                return Err(ApiError::Other(
                    "unexpected listing response shape".to_string(),
                ))
            }
        };

        serde_json::from_value(entities)
            .map_err(|e| ApiError::Other(format!("invalid listing body: {}", e)))
    }

    /// Fetches one entity by id. Fails with NotFound when absent upstream.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<T> {
        self.transport
            .get(&format!("{}/{}", self.resource, id), RequestOptions::new())
            .await
    }

    /// Creates an entity from a partial shape. The server is the source of
    /// truth for generated fields (e.g. the id).
    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> ApiResult<T> {
        self.transport
            .post(&self.resource, data, RequestOptions::new())
            .await
    }

    /// Updates an entity by id from a partial shape.
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, data: &B) -> ApiResult<T> {
        self.transport
            .put(&format!("{}/{}", self.resource, id), data, RequestOptions::new())
            .await
    }

    /// Deletes an entity by id.
    ///
    /// Returns `true` on success. There is no `false`: failures propagate
    /// as the classified error, never as a silent boolean.
    pub async fn delete(&self, id: &str) -> ApiResult<bool> {
        self.transport
            .delete(&format!("{}/{}", self.resource, id), RequestOptions::new())
            .await?;
        Ok(true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::testutil;

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Debug, Deserialize)]
    struct Widget {
        id: String,
        name: String,
    }

    fn widget_routes() -> Router {
        Router::new()
            .route(
                "/widgets",
                get(|| async {
                    Json(json!({
                        "widgets": [
                            {"id": "1", "name": "bolt"},
                            {"id": "2", "name": "nut"}
                        ],
                        "total": 2
                    }))
                })
                .post(|Json(body): Json<Value>| async move {
                    Json(json!({"id": "99", "name": body["name"]}))
                }),
            )
            .route(
                "/widgets/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "1" {
                        (StatusCode::OK, Json(json!({"id": "1", "name": "bolt"})))
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({})))
                    }
                })
                .put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                    Json(json!({"id": id, "name": body["name"]}))
                })
                .delete(|Path(id): Path<String>| async move {
                    if id == "1" {
                        (StatusCode::OK, Json(json!({"deleted": true})))
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({})))
                    }
                }),
            )
    }

    async fn client() -> CrudClient<Widget> {
        let base = testutil::spawn(widget_routes()).await;
        CrudClient::new(testutil::transport_to(&base), "widgets")
    }

    #[tokio::test]
    async fn test_list_unwraps_resource_field() {
        let client = client().await;
        let widgets = client.list(RequestOptions::new()).await.unwrap();
        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0].name, "bolt");
    }

    #[tokio::test]
    async fn test_list_accepts_bare_array() {
        let app = Router::new().route(
            "/gears",
            get(|| async { Json(json!([{"id": "1", "name": "gear"}])) }),
        );
        let base = testutil::spawn(app).await;
        let client: CrudClient<Widget> = CrudClient::new(testutil::transport_to(&base), "gears");

        let gears = client.list(RequestOptions::new()).await.unwrap();
        assert_eq!(gears.len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let client = client().await;
        let widget = client.get_by_id("1").await.unwrap();
        assert_eq!(widget.id, "1");
        assert_eq!(widget.name, "bolt");
    }

    #[tokio::test]
    async fn test_get_by_id_absent_is_not_found() {
        let client = client().await;
        let err = client.get_by_id("404").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[tokio::test]
    async fn test_create_returns_server_entity() {
        let client = client().await;
        let created = client.create(&json!({"name": "washer"})).await.unwrap();
        // Server-generated id wins
        assert_eq!(created.id, "99");
        assert_eq!(created.name, "washer");
    }

    #[tokio::test]
    async fn test_update() {
        let client = client().await;
        let updated = client.update("2", &json!({"name": "locknut"})).await.unwrap();
        assert_eq!(updated.id, "2");
        assert_eq!(updated.name, "locknut");
    }

    #[tokio::test]
    async fn test_delete_true_on_success_error_otherwise() {
        let client = client().await;
        assert!(client.delete("1").await.unwrap());

        // Failure propagates the classified error; it does NOT return false
        let err = client.delete("404").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
