//! The join: books + users + reviews -> one `BookView` per book.
//!
//! Resolution never fails. Every dangling reference turns into a
//! placeholder, so one missing user or review can't break the list.

use crate::placeholders::Placeholders;
use crate::types::{BookView, ResolvedUser, ReviewView};
use data_loader::{Book, Catalog, Review, User};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Resolves book references against one snapshot of users and reviews.
///
/// Lookup tables are built once in `new` so every reference resolves in
/// O(1). When an id repeats, the first occurrence in collection order is
/// kept, which is exactly what a front-to-back scan would find.
pub struct ViewModelBuilder<'a> {
    users: HashMap<&'a str, &'a User>,
    reviews: HashMap<&'a str, &'a Review>,
    placeholders: Placeholders,
}

impl<'a> ViewModelBuilder<'a> {
    pub fn new(users: &'a [User], reviews: &'a [Review]) -> Self {
        Self {
            users: first_by_id(users, |u| u.id.as_str()),
            reviews: first_by_id(reviews, |r| r.id.as_str()),
            placeholders: Placeholders::default(),
        }
    }

    /// Replace the placeholder texts (builder pattern).
    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    /// Build the view for a single book.
    ///
    /// ## Algorithm
    /// 1. Resolve the author, falling back to the author id with a
    ///    "not found" name
    /// 2. Resolve each review id in order; a found review also resolves its
    ///    reviewer, a missing one becomes a placeholder review
    /// 3. Fall back to the untitled name when the book has no name
    pub fn build(&self, book: &Book) -> BookView {
        let author = self.resolve_user(&book.author_id, &self.placeholders.author_not_found);

        let reviews = book
            .review_ids
            .iter()
            .map(|review_id| self.resolve_review(review_id))
            .collect();

        let name = match book.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.placeholders.untitled_book.clone(),
        };

        BookView {
            id: book.id.clone(),
            name,
            author,
            reviews,
            description: book.description.clone(),
        }
    }

    /// Build views for a list of books, one per book, in input order.
    pub fn build_all(&self, books: &[Book]) -> Vec<BookView> {
        let views: Vec<BookView> = books.par_iter().map(|book| self.build(book)).collect();
        debug!("Built {} book views", views.len());
        views
    }

    fn resolve_user(&self, user_id: &str, fallback: &str) -> ResolvedUser {
        match self.users.get(user_id) {
            Some(user) => ResolvedUser::from(*user),
            None => ResolvedUser::placeholder(user_id, fallback),
        }
    }

    fn resolve_review(&self, review_id: &str) -> ReviewView {
        match self.reviews.get(review_id) {
            Some(review) => ReviewView {
                id: review.id.clone(),
                text: review.text.clone(),
                user: self.resolve_user(&review.user_id, &self.placeholders.user_not_found),
            },
            None => ReviewView {
                id: review_id.to_string(),
                text: self.placeholders.review_not_found.clone(),
                user: ResolvedUser::placeholder("", self.placeholders.unknown_user.clone()),
            },
        }
    }
}

/// Index a collection by id, keeping the first entry for a repeated id.
fn first_by_id<'a, T>(items: &'a [T], id: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, &'a T> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        map.entry(id(item)).or_insert(item);
    }
    map
}

/// Build the view for one book against full user and review collections.
///
/// Convenience wrapper for one-off calls; to map over many books build a
/// `ViewModelBuilder` once instead.
pub fn build_book_view(book: &Book, users: &[User], reviews: &[Review]) -> BookView {
    ViewModelBuilder::new(users, reviews).build(book)
}

/// Build one view per book in the catalog, in catalog order.
pub fn build_book_views(catalog: &Catalog, placeholders: Placeholders) -> Vec<BookView> {
    ViewModelBuilder::new(&catalog.users, &catalog.reviews)
        .with_placeholders(placeholders)
        .build_all(&catalog.books)
}
