//! Knowledge document loading and caching.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::chatbot::language::Language;

/// Errors that can occur when loading the knowledge document.
#[derive(Debug)]
pub enum KnowledgeError {
    /// The file does not exist.
    NotFound { path: PathBuf },
    /// Any other I/O failure while reading.
    Read { path: PathBuf, source: std::io::Error },
    /// Content is not valid JSON.
    Format { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for KnowledgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "knowledge file '{}' does not exist", path.display())
            }
            Self::Read { path, source } => {
                write!(f, "failed to read knowledge file '{}': {}", path.display(), source)
            }
            Self::Format { path, source } => {
                write!(f, "knowledge file '{}' is not valid JSON: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for KnowledgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Read { source, .. } => Some(source),
            Self::Format { source, .. } => Some(source),
        }
    }
}

/// Parsed knowledge document, keyed by language tag at the top level.
#[derive(Debug)]
pub struct KnowledgeDocument {
    root: Value,
}

impl KnowledgeDocument {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// The section for `language`, or the Uzbek section when it is missing.
    pub fn slice(&self, language: Language) -> Option<&Value> {
        self.root
            .get(language.as_str())
            .or_else(|| self.root.get(Language::Uzbek.as_str()))
    }
}

/// Reads the knowledge file on first use and caches it for the process lifetime.
pub struct KnowledgeStore {
    path: PathBuf,
    cache: OnceCell<Arc<KnowledgeDocument>>,
}

impl KnowledgeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceCell::new(),
        }
    }

    /// Load the document. Only the first successful call touches the file.
    pub async fn load(&self) -> Result<Arc<KnowledgeDocument>, KnowledgeError> {
        self.cache
            .get_or_try_init(|| read_document(&self.path))
            .await
            .cloned()
    }
}

async fn read_document(path: &Path) -> Result<Arc<KnowledgeDocument>, KnowledgeError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            KnowledgeError::NotFound { path: path.to_path_buf() }
        } else {
            KnowledgeError::Read { path: path.to_path_buf(), source: e }
        }
    });
    let content = match content {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return Err(e);
        }
    };

    let root: Value = serde_json::from_str(&content).map_err(|e| {
        let err = KnowledgeError::Format { path: path.to_path_buf(), source: e };
        error!("{err}");
        err
    })?;

    info!("📚 Loaded knowledge base from {} ({} bytes)", path.display(), content.len());
    Ok(Arc::new(KnowledgeDocument::from_value(root)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_knowledge(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_valid_document() {
        let file = write_knowledge(r#"{"uzbek": {"narx": "5 000 000"}}"#);
        let store = KnowledgeStore::new(file.path());
        let doc = store.load().await.unwrap();
        assert_eq!(doc.slice(Language::Uzbek), Some(&json!({"narx": "5 000 000"})));
    }

    #[tokio::test]
    async fn test_load_is_cached() {
        let file = write_knowledge(r#"{"english": {"a": "first"}}"#);
        let store = KnowledgeStore::new(file.path());
        let first = store.load().await.unwrap();

        // Rewrite and then remove the file; the cache must not notice
        std::fs::write(file.path(), r#"{"english": {"a": "second"}}"#).unwrap();
        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());

        let second = store.load().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.slice(Language::English), Some(&json!({"a": "first"})));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let store = KnowledgeStore::new("/nonexistent/path/usat.json");
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, KnowledgeError::NotFound { .. }));
        assert!(err.to_string().contains("usat.json"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let file = write_knowledge("{ not json }");
        let store = KnowledgeStore::new(file.path());
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, KnowledgeError::Format { .. }));
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usat.json");
        let store = KnowledgeStore::new(&path);
        assert!(store.load().await.is_err());

        std::fs::write(&path, r#"{"uzbek": {}}"#).unwrap();
        assert!(store.load().await.is_ok());
    }

    #[test]
    fn test_slice_falls_back_to_uzbek() {
        let doc = KnowledgeDocument::from_value(json!({"uzbek": {"x": 1}, "english": {"y": 2}}));
        assert_eq!(doc.slice(Language::English), Some(&json!({"y": 2})));
        assert_eq!(doc.slice(Language::Russian), Some(&json!({"x": 1})));

        let empty = KnowledgeDocument::from_value(json!({"english": {}}));
        assert_eq!(empty.slice(Language::Russian), None);
    }
}
