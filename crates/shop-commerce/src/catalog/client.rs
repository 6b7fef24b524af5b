//! Remote catalog client.
//!
//! Each call performs exactly one request. There is no cache and no retry:
//! the caller shows a single error state on failure.

use serde::Deserialize;
use shop_data::FetchClient;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Public catalog the storefront reads from by default.
pub const DEFAULT_CATALOG_URL: &str = "https://v2.api.noroff.dev/online-shop";

/// Response bodies come either bare or wrapped in a `data` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum Body<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Body<T> {
    fn into_inner(self) -> T {
        match self {
            Body::Wrapped { data } => data,
            Body::Bare(value) => value,
        }
    }
}

/// Reads products from the remote catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: FetchClient,
}

impl CatalogClient {
    /// Client for the catalog rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(FetchClient::new().with_base_url(base_url))
    }

    /// Client using a preconfigured HTTP client. The client must carry the
    /// catalog base URL.
    pub fn with_http(http: FetchClient) -> Self {
        Self {
            http: http.with_default_header("Accept", "application/json"),
        }
    }

    /// Fetch the full catalog.
    ///
    /// Fails with [`CommerceError::Network`] when the request does not
    /// complete or the remote answers with a non-2xx status, and with
    /// [`CommerceError::Parse`] when the body is not a product list.
    pub async fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        let response = self
            .http
            .get("")
            .send()
            .await
            .map_err(|e| CommerceError::Network(e.to_string()))?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "catalog listing failed");
            return Err(CommerceError::Network(format!(
                "catalog returned HTTP {}",
                response.status
            )));
        }

        let body: Body<Vec<Product>> = response.json()?;
        let products = body.into_inner();
        tracing::debug!(count = products.len(), "catalog listed");
        Ok(products)
    }

    /// Fetch one product by id.
    ///
    /// Any non-2xx status is reported as [`CommerceError::NotFound`]. An
    /// empty id fails the same way without touching the network. The id is
    /// always sent as a single percent-encoded path segment.
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, CommerceError> {
        if id.is_empty() {
            return Err(CommerceError::NotFound("missing product id".to_string()));
        }

        let response = self
            .http
            .get(urlencoding::encode(id.as_str()))
            .send()
            .await
            .map_err(|e| CommerceError::Network(e.to_string()))?;

        if !response.is_success() {
            tracing::debug!(%id, status = response.status, "product lookup failed");
            return Err(CommerceError::NotFound(id.to_string()));
        }

        let body: Body<Product> = response.json()?;
        Ok(body.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shop_data::{FetchError, RequestBuilder, Response, Transport};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    const BASE: &str = "https://catalog.test/online-shop";

    /// Serves canned responses keyed by URL.
    #[derive(Default)]
    struct Canned {
        routes: HashMap<String, (u16, String)>,
        hits: Mutex<Vec<String>>,
    }

    impl Canned {
        fn route(mut self, path: &str, status: u16, body: &str) -> Self {
            let url = if path.is_empty() {
                BASE.to_string()
            } else {
                format!("{}/{}", BASE, path)
            };
            self.routes.insert(url, (status, body.to_string()));
            self
        }

        fn hits(&self) -> usize {
            self.hits.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.hits.lock().unwrap().push(request.url().to_string());
            match self.routes.get(request.url()) {
                Some((status, body)) => Ok(Response::new(
                    *status,
                    HashMap::new(),
                    body.clone().into_bytes(),
                )),
                None => Err(FetchError::RequestError("connection refused".into())),
            }
        }
    }

    fn client(canned: Arc<Canned>) -> CatalogClient {
        CatalogClient::with_http(FetchClient::with_transport(canned).with_base_url(BASE))
    }

    const EEVEE: &str = r#"{"id":"a","title":"Eevee","price":10,"discountedPrice":10,"image":{"url":"e.jpg"}}"#;

    #[tokio::test]
    async fn test_list_products_wrapped() {
        let body = format!(r#"{{"data":[{}],"meta":{{"isFirstPage":true}}}}"#, EEVEE);
        let canned = Arc::new(Canned::default().route("", 200, &body));

        let products = client(canned.clone()).list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "a");
        assert_eq!(canned.hits(), 1);
    }

    #[tokio::test]
    async fn test_list_products_bare_array() {
        let body = format!("[{}]", EEVEE);
        let canned = Arc::new(Canned::default().route("", 200, &body));

        let products = client(canned).list_products().await.unwrap();
        assert_eq!(products[0].title, "Eevee");
    }

    #[tokio::test]
    async fn test_list_products_bad_shape() {
        let canned = Arc::new(Canned::default().route("", 200, r#"{"data":"nope"}"#));
        let err = client(canned).list_products().await.unwrap_err();
        assert!(matches!(err, CommerceError::Parse(_)));
    }

    #[tokio::test]
    async fn test_list_products_non_success_ignores_body() {
        let body = format!("[{}]", EEVEE);
        let canned = Arc::new(Canned::default().route("", 500, &body));
        let err = client(canned).list_products().await.unwrap_err();
        assert!(matches!(err, CommerceError::Network(_)));
    }

    #[tokio::test]
    async fn test_list_products_transport_failure() {
        let canned = Arc::new(Canned::default());
        let err = client(canned).list_products().await.unwrap_err();
        assert!(matches!(err, CommerceError::Network(_)));
    }

    #[tokio::test]
    async fn test_get_product_unwraps_envelope() {
        let body = format!(r#"{{"data":{}}}"#, EEVEE);
        let canned = Arc::new(Canned::default().route("a", 200, &body));

        let product = client(canned).get_product(&ProductId::new("a")).await.unwrap();
        assert_eq!(product.title, "Eevee");
    }

    #[tokio::test]
    async fn test_get_product_non_success_is_not_found() {
        let canned = Arc::new(Canned::default().route("zzz", 400, r#"{"errors":[]}"#));
        let err = client(canned)
            .get_product(&ProductId::new("zzz"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_product_id_stays_one_path_segment() {
        let listing = format!("[{}]", EEVEE);
        let canned = Arc::new(
            Canned::default()
                .route("", 200, &listing)
                .route("%2F", 404, "{}")
                .route("b%3Fx%3D1", 404, "{}"),
        );
        let client = client(canned.clone());

        for raw in ["/", "b?x=1"] {
            let err = client.get_product(&ProductId::new(raw)).await.unwrap_err();
            assert!(matches!(err, CommerceError::NotFound(_)), "{raw}: {err:?}");
        }

        let seen = canned.hits.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![format!("{}/%2F", BASE), format!("{}/b%3Fx%3D1", BASE)]
        );
    }

    #[tokio::test]
    async fn test_get_product_empty_id_skips_network() {
        let canned = Arc::new(Canned::default());
        let err = client(canned.clone())
            .get_product(&ProductId::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::NotFound(_)));
        assert_eq!(canned.hits(), 0);
    }
}
