//! Fetch failures, tagged with the collection that failed.

use data_loader::DataLoadError;
use std::fmt;
use thiserror::Error;

/// The three collections a catalog is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Books,
    Users,
    Reviews,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Books, Collection::Users, Collection::Reviews];

    /// Path segment / file stem for this collection
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Books => "books",
            Collection::Users => "users",
            Collection::Reviews => "reviews",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collection could not be fetched. Any one of these aborts a refresh.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to load {collection}: {source}")]
    Load {
        collection: Collection,
        #[source]
        source: DataLoadError,
    },

    #[error("request for {collection} failed: {source}")]
    Http {
        collection: Collection,
        #[source]
        source: reqwest::Error,
    },

    #[error("{collection} endpoint answered with status {status}")]
    Status { collection: Collection, status: u16 },

    #[error("{collection} unavailable: {reason}")]
    Unavailable {
        collection: Collection,
        reason: String,
    },

    /// The blocking task running the fetch panicked or was cancelled
    #[error("{collection} fetch task failed: {reason}")]
    Task {
        collection: Collection,
        reason: String,
    },
}

impl FetchError {
    pub fn collection(&self) -> Collection {
        match self {
            FetchError::Load { collection, .. }
            | FetchError::Http { collection, .. }
            | FetchError::Status { collection, .. }
            | FetchError::Unavailable { collection, .. }
            | FetchError::Task { collection, .. } => *collection,
        }
    }
}
