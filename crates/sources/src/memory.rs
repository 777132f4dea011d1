//! Catalog source holding its collections in memory.

use crate::error::{Collection, FetchError};
use crate::traits::CatalogSource;
use async_trait::async_trait;
use data_loader::{Book, Catalog, Review, User};
use tokio::sync::RwLock;

/// Serves clones of a fixed catalog. One collection can be switched to
/// fail, which makes it handy for exercising refresh error paths.
#[derive(Debug, Default)]
pub struct InMemorySource {
    catalog: RwLock<Catalog>,
    failing: RwLock<Option<Collection>>,
}

impl InMemorySource {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            failing: RwLock::new(None),
        }
    }

    /// Make every fetch of `collection` fail (builder pattern)
    pub fn failing(self, collection: Collection) -> Self {
        Self {
            failing: RwLock::new(Some(collection)),
            ..self
        }
    }

    pub async fn set_catalog(&self, catalog: Catalog) {
        *self.catalog.write().await = catalog;
    }

    /// `None` restores normal operation
    pub async fn set_failing(&self, collection: Option<Collection>) {
        *self.failing.write().await = collection;
    }

    async fn check(&self, collection: Collection) -> Result<(), FetchError> {
        if *self.failing.read().await == Some(collection) {
            return Err(FetchError::Unavailable {
                collection,
                reason: "configured to fail".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for InMemorySource {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn fetch_books(&self) -> Result<Vec<Book>, FetchError> {
        self.check(Collection::Books).await?;
        Ok(self.catalog.read().await.books.clone())
    }

    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        self.check(Collection::Users).await?;
        Ok(self.catalog.read().await.users.clone())
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>, FetchError> {
        self.check(Collection::Reviews).await?;
        Ok(self.catalog.read().await.reviews.clone())
    }
}
