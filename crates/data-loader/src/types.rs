//! Core domain types for the book catalog.
//!
//! These are the raw entities as the data sources deliver them. Books only
//! reference their author and reviews by id; resolving those ids is the job
//! of the `view-model` crate.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================
// Ids are opaque strings (uuids upstream), the aliases keep signatures readable

/// Unique identifier for a user (book authors and reviewers alike)
pub type UserId = String;

/// Unique identifier for a review
pub type ReviewId = String;

/// Unique identifier for a book
pub type BookId = String;

// =============================================================================
// Entities
// =============================================================================

/// A person known to the catalog. Authors and reviewers are both users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// A single review. `user_id` may not match any known user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub text: String,
    pub user_id: UserId,
}

/// A book as delivered by the books source.
///
/// `author_id` and every entry of `review_ids` are references that can
/// dangle. `name` and `description` are genuinely optional upstream:
/// absence is kept as `None` instead of being folded into an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    #[serde(default)]
    pub name: Option<String>,
    pub author_id: UserId,
    /// Review references in display order
    #[serde(default)]
    pub review_ids: Vec<ReviewId>,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Catalog - one complete snapshot of the three collections
// =============================================================================

/// One complete snapshot of books, users and reviews.
///
/// Collections keep the order the sources delivered them in. That order
/// matters: when ids repeat, the first occurrence is the one a join sees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub books: Vec<Book>,
    pub users: Vec<User>,
    pub reviews: Vec<Review>,
}

impl Catalog {
    pub fn new(books: Vec<Book>, users: Vec<User>, reviews: Vec<Review>) -> Self {
        Self {
            books,
            users,
            reviews,
        }
    }

    /// Get counts for debugging/validation: (books, users, reviews)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.books.len(), self.users.len(), self.reviews.len())
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.users.is_empty() && self.reviews.is_empty()
    }
}
