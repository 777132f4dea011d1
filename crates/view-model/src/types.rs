//! Denormalized view types handed to the rendering layer.

use data_loader::{BookId, ReviewId, User, UserId};
use serde::Serialize;

/// A user reference after resolution: either the matched user or a
/// placeholder carrying the original id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedUser {
    pub id: UserId,
    pub name: String,
}

impl ResolvedUser {
    pub fn placeholder(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<&User> for ResolvedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewView {
    pub id: ReviewId,
    pub text: String,
    pub user: ResolvedUser,
}

/// Everything needed to render one book card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookView {
    pub id: BookId,
    /// Never empty
    pub name: String,
    pub author: ResolvedUser,
    /// One entry per `Book::review_ids`, same order
    pub reviews: Vec<ReviewView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
