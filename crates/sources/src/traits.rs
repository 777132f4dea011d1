//! The seam between the application and wherever the catalog lives.

use crate::error::FetchError;
use async_trait::async_trait;
use data_loader::{Book, Review, User};

/// Asynchronous provider of the three catalog collections.
///
/// Each fetch may fail independently. Implementations must be
/// `Send + Sync` so one source can serve the three concurrent fetches of a
/// refresh.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    async fn fetch_books(&self) -> Result<Vec<Book>, FetchError>;

    async fn fetch_users(&self) -> Result<Vec<User>, FetchError>;

    async fn fetch_reviews(&self) -> Result<Vec<Review>, FetchError>;
}
