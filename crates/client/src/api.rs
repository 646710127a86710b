//! Typed client for the storefront `/api` routes.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use bazaar_core::{
    Branch, CreateProductRequest, Customer, Product, ProductFilter, RegisterCustomerRequest,
};

use crate::error::{ApiErrorBody, ClientError};

/// Default storefront location.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Liveness body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Health {
    pub status: String,
    pub message: String,
}

/// Storefront API client.
///
/// Cheaply cloneable; every clone shares one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the storefront at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if the URL cannot be parsed, or
    /// `ClientError::Network` if the HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        // Joining relative paths needs a trailing slash on the base path
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    /// The storefront base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// `GET /api/products`, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the body is not a product list.
    pub async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ClientError> {
        self.get_with_query("api/products", filter).await
    }

    /// `GET /api/products/filter`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the body is not a product list.
    pub async fn filter_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, ClientError> {
        self.get_with_query("api/products/filter", filter).await
    }

    /// `GET /api/categories`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        self.get("api/categories").await
    }

    /// `GET /api/cities`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    pub async fn cities(&self) -> Result<Vec<String>, ClientError> {
        self.get("api/cities").await
    }

    /// `GET /api/branches`, scoped to `city` when given.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    pub async fn branches(&self, city: Option<&str>) -> Result<Vec<Branch>, ClientError> {
        let query: Vec<(&str, &str)> = city.map(|c| ("city", c)).into_iter().collect();
        self.get_with_query("api/branches", &query).await
    }

    /// `POST /api/products`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with the server's message on rejection.
    pub async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<Product, ClientError> {
        self.post("api/products", request).await
    }

    /// `POST /api/register`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with the server's message on rejection
    /// (400 invalid fields, 409 duplicate email).
    pub async fn register_customer(
        &self,
        request: &RegisterCustomerRequest,
    ) -> Result<Customer, ClientError> {
        self.post("api/register", request).await
    }

    /// `GET /api/health`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the server is unreachable.
    pub async fn health(&self) -> Result<Health, ClientError> {
        self.get("api/health").await
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.inner.base_url.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "GET");
        let response = self.inner.client.get(url).send().await?;
        handle_response(response).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "GET");
        let response = self.inner.client.get(url).query(query).send().await?;
        handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "POST");
        let response = self.inner.client.post(url).json(body).send().await?;
        handle_response(response).await
    }
}

/// Decode a success body, or turn an error body into `ClientError::Status`.
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await?;
        return serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()));
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map_or(text, |body| body.error);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/");

        let client = ApiClient::new("http://localhost:3000/shop").unwrap();
        assert_eq!(
            client.url("api/products").unwrap().as_str(),
            "http://localhost:3000/shop/api/products"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.health().await.unwrap_err();
        assert!(err.is_network());
    }
}
