//! # Data Loader Crate
//!
//! Domain entities of the book catalog and the code that reads them.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Book, User, Review, Catalog)
//! - **parser**: Parse the JSON collection files into Rust structs
//! - **index**: Load a whole catalog and cross-check its references
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_dir(Path::new("data"))?;
//! let report = catalog.dangling_references();
//!
//! println!("{} dangling references", report.dangling_count());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::DanglingReport;
pub use types::{
    // Type aliases
    BookId,
    ReviewId,
    UserId,
    // Core types
    Book,
    Catalog,
    Review,
    User,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::default();
        let (books, users, reviews) = catalog.counts();

        assert_eq!(books, 0);
        assert_eq!(users, 0);
        assert_eq!(reviews, 0);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_book_serializes_camel_case() {
        let book = Book {
            id: "b1".to_string(),
            name: None,
            author_id: "u1".to_string(),
            review_ids: vec!["r1".to_string()],
            description: Some("About".to_string()),
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["authorId"], "u1");
        assert_eq!(json["reviewIds"][0], "r1");
        assert!(json["name"].is_null());
    }

    #[test]
    fn test_empty_catalog_is_clean() {
        assert!(Catalog::default().dangling_references().is_clean());
    }
}
