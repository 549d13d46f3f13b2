//! Document retrieval.

use std::future::Future;
use std::path::PathBuf;

use super::document::FileKey;
use super::error::FetchError;

/// Retrieves the collection index and documents by key.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch_index(&self) -> impl Future<Output = Result<String, FetchError>> + Send;

    fn fetch_document(
        &self,
        key: &FileKey,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Fetcher backed by a collection directory.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    dir: PathBuf,
    index: String,
}

impl DirFetcher {
    pub fn new(dir: impl Into<PathBuf>, index: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            index: index.into(),
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(&self.index)
    }

    /// Filesystem path of a document. Keys are already confined to the
    /// collection by [`FileKey::parse`].
    pub fn document_path(&self, key: &FileKey) -> PathBuf {
        self.dir.join(key.as_str())
    }
}

impl Fetcher for DirFetcher {
    async fn fetch_index(&self) -> Result<String, FetchError> {
        let path = self.index_path();
        crate::debug!("fetch"; "index {}", path.display());
        Ok(tokio::fs::read_to_string(path).await?)
    }

    async fn fetch_document(&self, key: &FileKey) -> Result<String, FetchError> {
        let path = self.document_path(key);
        crate::debug!("fetch"; "document {}", path.display());
        if tokio::fs::metadata(&path).await?.is_dir() {
            return Err(FetchError::NotFound);
        }
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn collection() -> (TempDir, DirFetcher) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("hooks")).unwrap();
        fs::write(temp.path().join("index.yml"), "- demo.tsx\n").unwrap();
        fs::write(temp.path().join("demo.tsx"), "let a = <b />;").unwrap();
        fs::write(temp.path().join("hooks/timer.tsx"), "useInterval();").unwrap();
        let fetcher = DirFetcher::new(temp.path(), "index.yml");
        (temp, fetcher)
    }

    #[tokio::test]
    async fn test_fetch_index_and_documents() {
        let (_temp, fetcher) = collection();

        assert_eq!(fetcher.fetch_index().await.unwrap(), "- demo.tsx\n");

        let key = FileKey::parse("hooks/timer.tsx").unwrap();
        assert_eq!(fetcher.fetch_document(&key).await.unwrap(), "useInterval();");
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let (_temp, fetcher) = collection();
        let key = FileKey::parse("missing.js").unwrap();
        let err = fetcher.fetch_document(&key).await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound));
    }

    #[tokio::test]
    async fn test_directory_key_is_not_found() {
        let (_temp, fetcher) = collection();
        let key = FileKey::parse("hooks").unwrap();
        let err = fetcher.fetch_document(&key).await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound));
    }

    #[tokio::test]
    async fn test_missing_index() {
        let temp = TempDir::new().unwrap();
        let fetcher = DirFetcher::new(temp.path(), "index.yml");
        assert!(matches!(
            fetcher.fetch_index().await,
            Err(FetchError::NotFound)
        ));
    }
}
