//! Parser for catalog JSON files.
//!
//! Each collection lives in its own file, holding a JSON array:
//! - books.json: `[{ "id", "name"?, "authorId", "reviewIds", "description"? }]`
//! - users.json: `[{ "id", "name" }]`
//! - reviews.json: `[{ "id", "text", "userId" }]`

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const BOOKS_FILE: &str = "books.json";
pub const USERS_FILE: &str = "users.json";
pub const REVIEWS_FILE: &str = "reviews.json";

/// Read a whole file, mapping a missing file to `FileNotFound`
fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse a JSON array of `T` from an in-memory string.
///
/// `file` only labels the error.
pub fn parse_str<T: DeserializeOwned>(file: &str, content: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|e| DataLoadError::parse(file, e))
}

fn parse_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = read_file(path)?;
    parse_str(&file_label(path), &content)
}

/// Parse the books.json file
pub fn parse_books(path: &Path) -> Result<Vec<Book>> {
    parse_collection(path)
}

/// Parse the users.json file
pub fn parse_users(path: &Path) -> Result<Vec<User>> {
    parse_collection(path)
}

/// Parse the reviews.json file
pub fn parse_reviews(path: &Path) -> Result<Vec<Review>> {
    parse_collection(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_book_with_optional_fields_missing() {
        let json = r#"[{"id": "b1", "authorId": "u1", "reviewIds": ["r1", "r2"]}]"#;
        let books: Vec<Book> = parse_str(BOOKS_FILE, json).unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "b1");
        assert_eq!(books[0].name, None);
        assert_eq!(books[0].author_id, "u1");
        assert_eq!(books[0].review_ids, vec!["r1", "r2"]);
        assert_eq!(books[0].description, None);
    }

    #[test]
    fn test_parse_book_keeps_empty_name_distinct_from_null() {
        let json = r#"[
            {"id": "b1", "name": "", "authorId": "u1", "reviewIds": []},
            {"id": "b2", "name": null, "authorId": "u1", "description": null}
        ]"#;
        let books: Vec<Book> = parse_str(BOOKS_FILE, json).unwrap();

        assert_eq!(books[0].name, Some(String::new()));
        assert_eq!(books[1].name, None);
        assert!(books[1].review_ids.is_empty());
    }

    #[test]
    fn test_parse_review_uses_camel_case() {
        let json = r#"[{"id": "r1", "text": "Great", "userId": "u7"}]"#;
        let reviews: Vec<Review> = parse_str(REVIEWS_FILE, json).unwrap();

        assert_eq!(reviews[0].user_id, "u7");
    }

    #[test]
    fn test_parse_error_reports_file() {
        let json = r#"[{"id": "u1"}]"#;
        let err = parse_str::<User>(USERS_FILE, json).unwrap_err();

        match err {
            DataLoadError::ParseError { file, line, .. } => {
                assert_eq!(file, USERS_FILE);
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_users(&dir.path().join(USERS_FILE)).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_users_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(USERS_FILE);
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"[{{"id": "u1", "name": "Ann"}}, {{"id": "u2", "name": "Bob"}}]"#).unwrap();

        let users = parse_users(&path).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "Bob");
    }
}
