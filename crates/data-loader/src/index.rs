//! Catalog loading and reference checking.
//!
//! - Load the three collection files in parallel
//! - Cross-check references between collections (dangling ids, duplicate ids)

use crate::error::Result;
use crate::parser;
use crate::types::*;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Every reference in a catalog that a join will have to paper over.
///
/// None of these are errors: the view builder substitutes placeholders for
/// dangling ids and takes the first occurrence of a duplicated id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DanglingReport {
    /// (book id, author id) pairs where the author is unknown
    pub missing_authors: Vec<(BookId, UserId)>,
    /// (book id, review id) pairs where the review is unknown
    pub missing_reviews: Vec<(BookId, ReviewId)>,
    /// (review id, user id) pairs where the reviewer is unknown
    pub missing_reviewers: Vec<(ReviewId, UserId)>,
    pub duplicate_user_ids: Vec<UserId>,
    pub duplicate_review_ids: Vec<ReviewId>,
    pub duplicate_book_ids: Vec<BookId>,
}

impl DanglingReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_count() == 0 && self.duplicate_count() == 0
    }

    pub fn dangling_count(&self) -> usize {
        self.missing_authors.len() + self.missing_reviews.len() + self.missing_reviewers.len()
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicate_user_ids.len()
            + self.duplicate_review_ids.len()
            + self.duplicate_book_ids.len()
    }
}

impl Catalog {
    /// Load a catalog from a directory holding books.json, users.json and
    /// reviews.json.
    ///
    /// The three files are parsed in parallel; the first error wins.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", data_dir);

        let books_path = data_dir.join(parser::BOOKS_FILE);
        let users_path = data_dir.join(parser::USERS_FILE);
        let reviews_path = data_dir.join(parser::REVIEWS_FILE);

        // Nested joins give three-way parallelism
        let ((books, users), reviews) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_books(&books_path),
                    || parser::parse_users(&users_path),
                )
            },
            || parser::parse_reviews(&reviews_path),
        );

        let catalog = Catalog::new(books?, users?, reviews?);
        let (books, users, reviews) = catalog.counts();
        info!(
            "Loaded {} books, {} users, {} reviews",
            books, users, reviews
        );

        Ok(catalog)
    }

    /// Cross-check every reference in the snapshot.
    pub fn dangling_references(&self) -> DanglingReport {
        let (user_ids, duplicate_user_ids) = collect_ids(self.users.iter().map(|u| u.id.as_str()));
        let (review_ids, duplicate_review_ids) =
            collect_ids(self.reviews.iter().map(|r| r.id.as_str()));
        let (_, duplicate_book_ids) = collect_ids(self.books.iter().map(|b| b.id.as_str()));

        let mut report = DanglingReport {
            duplicate_user_ids,
            duplicate_review_ids,
            duplicate_book_ids,
            ..DanglingReport::default()
        };

        for book in &self.books {
            if !user_ids.contains(book.author_id.as_str()) {
                report
                    .missing_authors
                    .push((book.id.clone(), book.author_id.clone()));
            }
            for review_id in &book.review_ids {
                if !review_ids.contains(review_id.as_str()) {
                    report
                        .missing_reviews
                        .push((book.id.clone(), review_id.clone()));
                }
            }
        }

        for review in &self.reviews {
            if !user_ids.contains(review.user_id.as_str()) {
                report
                    .missing_reviewers
                    .push((review.id.clone(), review.user_id.clone()));
            }
        }

        debug!(
            "Reference check: {} dangling, {} duplicated",
            report.dangling_count(),
            report.duplicate_count()
        );
        report
    }
}

/// Gather the distinct ids and, separately, every id seen more than once
/// (listed once, in order of first repeat).
fn collect_ids<'a>(ids: impl Iterator<Item = &'a str>) -> (HashSet<&'a str>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id.to_string());
        }
    }
    (seen, duplicates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataLoadError;
    use std::fs;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn review(id: &str, user_id: &str) -> Review {
        Review {
            id: id.to_string(),
            text: "text".to_string(),
            user_id: user_id.to_string(),
        }
    }

    fn book(id: &str, author_id: &str, review_ids: &[&str]) -> Book {
        Book {
            id: id.to_string(),
            name: Some(format!("Book {id}")),
            author_id: author_id.to_string(),
            review_ids: review_ids.iter().map(|r| r.to_string()).collect(),
            description: None,
        }
    }

    #[test]
    fn test_clean_catalog() {
        let catalog = Catalog::new(
            vec![book("b1", "u1", &["r1"])],
            vec![user("u1", "Ann"), user("u2", "Bob")],
            vec![review("r1", "u2")],
        );

        let report = catalog.dangling_references();
        assert!(report.is_clean());
    }

    #[test]
    fn test_dangling_references_are_reported() {
        let catalog = Catalog::new(
            vec![book("b1", "ghost", &["r1", "r404"])],
            vec![user("u1", "Ann")],
            vec![review("r1", "nobody")],
        );

        let report = catalog.dangling_references();
        assert_eq!(
            report.missing_authors,
            vec![("b1".to_string(), "ghost".to_string())]
        );
        assert_eq!(
            report.missing_reviews,
            vec![("b1".to_string(), "r404".to_string())]
        );
        assert_eq!(
            report.missing_reviewers,
            vec![("r1".to_string(), "nobody".to_string())]
        );
        assert_eq!(report.dangling_count(), 3);
    }

    #[test]
    fn test_duplicates_listed_once() {
        let catalog = Catalog::new(
            vec![],
            vec![user("u1", "Ann"), user("u1", "Anna"), user("u1", "Annie")],
            vec![review("r1", "u1"), review("r1", "u1")],
        );

        let report = catalog.dangling_references();
        assert_eq!(report.duplicate_user_ids, vec!["u1"]);
        assert_eq!(report.duplicate_review_ids, vec!["r1"]);
        assert!(report.duplicate_book_ids.is_empty());
        assert!(!report.is_clean());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(parser::BOOKS_FILE),
            r#"[{"id": "b1", "name": "Dune", "authorId": "u1", "reviewIds": ["r1"]}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(parser::USERS_FILE),
            r#"[{"id": "u1", "name": "Frank"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(parser::REVIEWS_FILE),
            r#"[{"id": "r1", "text": "Spice", "userId": "u1"}]"#,
        )
        .unwrap();

        let catalog = Catalog::load_from_dir(dir.path()).unwrap();
        assert_eq!(catalog.counts(), (1, 1, 1));
        assert_eq!(catalog.books[0].name.as_deref(), Some("Dune"));
    }

    #[test]
    fn test_load_from_dir_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(parser::BOOKS_FILE), "[]").unwrap();
        fs::write(dir.path().join(parser::USERS_FILE), "[]").unwrap();

        let err = Catalog::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
