//! Catalog source backed by a directory of JSON files.

use crate::error::{Collection, FetchError};
use crate::traits::CatalogSource;
use async_trait::async_trait;
use data_loader::{Book, Review, User, parser};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

type ParseFn<T> = fn(&Path) -> data_loader::Result<Vec<T>>;

/// Reads books.json, users.json and reviews.json from `dir`.
///
/// Parsing runs on the blocking pool so the three fetches of a refresh
/// don't stall the runtime.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let name = format!("file:{}", dir.display());
        Self { dir, name }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[instrument(skip(self, parse), fields(source = %self.name))]
    async fn load<T: Send + 'static>(
        &self,
        collection: Collection,
        file: &'static str,
        parse: ParseFn<T>,
    ) -> Result<Vec<T>, FetchError> {
        let path = self.dir.join(file);
        let parsed = tokio::task::spawn_blocking(move || parse(&path))
            .await
            .map_err(|e| FetchError::Task {
                collection,
                reason: e.to_string(),
            })?
            .map_err(|source| FetchError::Load { collection, source })?;
        debug!("Read {} {} from {}", parsed.len(), collection, file);
        Ok(parsed)
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_books(&self) -> Result<Vec<Book>, FetchError> {
        self.load(Collection::Books, parser::BOOKS_FILE, parser::parse_books)
            .await
    }

    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        self.load(Collection::Users, parser::USERS_FILE, parser::parse_users)
            .await
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>, FetchError> {
        self.load(Collection::Reviews, parser::REVIEWS_FILE, parser::parse_reviews)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::DataLoadError;
    use std::fs;

    fn write_catalog(dir: &Path) {
        fs::write(
            dir.join(parser::BOOKS_FILE),
            r#"[{"id": "b1", "authorId": "u1", "reviewIds": ["r1"]}]"#,
        )
        .unwrap();
        fs::write(
            dir.join(parser::USERS_FILE),
            r#"[{"id": "u1", "name": "Ann"}]"#,
        )
        .unwrap();
        fs::write(
            dir.join(parser::REVIEWS_FILE),
            r#"[{"id": "r1", "text": "Great", "userId": "u1"}]"#,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_fetches_all_collections() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path());
        let source = FileSource::new(dir.path());

        let books = source.fetch_books().await.unwrap();
        let users = source.fetch_users().await.unwrap();
        let reviews = source.fetch_reviews().await.unwrap();

        assert_eq!(books[0].review_ids, vec!["r1"]);
        assert_eq!(users[0].name, "Ann");
        assert_eq!(reviews[0].user_id, "u1");
    }

    #[tokio::test]
    async fn test_missing_file_is_tagged_with_collection() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path());

        let err = source.fetch_reviews().await.unwrap_err();

        assert_eq!(err.collection(), Collection::Reviews);
        assert!(matches!(
            err,
            FetchError::Load {
                source: DataLoadError::FileNotFound { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(parser::USERS_FILE), "{not json").unwrap();
        let source = FileSource::new(dir.path());

        let err = source.fetch_users().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Load {
                collection: Collection::Users,
                source: DataLoadError::ParseError { .. },
            }
        ));
    }

    #[test]
    fn test_name_includes_dir() {
        let source = FileSource::new("data");
        assert_eq!(source.name(), "file:data");
        assert_eq!(source.dir(), Path::new("data"));
    }
}
