//! Catalog source backed by a JSON HTTP API.
//!
//! Expects three endpoints under one base URL, each answering with a JSON
//! array: `GET {base}/books`, `GET {base}/users`, `GET {base}/reviews`.

use crate::error::{Collection, FetchError};
use crate::traits::CatalogSource;
use async_trait::async_trait;
use data_loader::{Book, Review, User};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Use a preconfigured client (timeouts, headers, proxies)
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn endpoint(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.as_str())
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get<T: DeserializeOwned + Send>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, FetchError> {
        let url = self.endpoint(collection);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Http { collection, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                collection,
                status: status.as_u16(),
            });
        }

        let items: Vec<T> = response
            .json()
            .await
            .map_err(|source| FetchError::Http { collection, source })?;
        debug!("Received {} {}", items.len(), collection);
        Ok(items)
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch_books(&self) -> Result<Vec<Book>, FetchError> {
        self.get(Collection::Books).await
    }

    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        self.get(Collection::Users).await
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>, FetchError> {
        self.get(Collection::Reviews).await
    }
}
