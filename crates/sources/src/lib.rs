//! # Sources Crate
//!
//! The asynchronous data sources a catalog is fetched from.
//!
//! ## Components
//!
//! ### CatalogSource
//! One trait with a fetch per collection (books, users, reviews). A refresh
//! runs all three concurrently against the same source.
//!
//! ### Implementations
//! - `FileSource`: a directory of JSON files
//! - `HttpSource`: a JSON API exposing `/books`, `/users`, `/reviews`
//! - `InMemorySource`: fixed collections, optionally failing one of them
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CatalogSource, FileSource};
//!
//! let source = FileSource::new("data");
//! let (books, users, reviews) = tokio::try_join!(
//!     source.fetch_books(),
//!     source.fetch_users(),
//!     source.fetch_reviews(),
//! )?;
//! ```

// Public modules
pub mod error;
pub mod file;
pub mod http;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use error::{Collection, FetchError};
pub use file::FileSource;
pub use http::HttpSource;
pub use memory::InMemorySource;
pub use traits::CatalogSource;
