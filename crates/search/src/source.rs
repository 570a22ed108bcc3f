//! Document discovery and reading.

use mdsite_core::DocsError;
use std::path::{Path, PathBuf};

/// Enumerates and reads the documents that make up the index.
pub trait DocumentSource {
    /// Lists candidate documents in scan order.
    fn discover(&self) -> Result<Vec<PathBuf>, DocsError>;

    /// Reads one document.
    fn read(&self, path: &Path) -> Result<String, DocsError>;
}

/// Finds documents on disk with a glob pattern.
#[derive(Debug, Clone)]
pub struct GlobSource {
    pattern: String,
}

impl GlobSource {
    /// Uses an explicit glob pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Matches `<root>/*/docs/*.md`.
    pub fn component_docs(root: &Path) -> Self {
        Self::new(root.join("*").join("docs").join("*.md").to_string_lossy())
    }

    /// The glob pattern in use.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl DocumentSource for GlobSource {
    fn discover(&self) -> Result<Vec<PathBuf>, DocsError> {
        let entries = glob::glob(&self.pattern)
            .map_err(|err| DocsError::Discovery(format!("{}: {}", self.pattern, err)))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|err| DocsError::IoError(err.into()))?;
            if path.is_file() {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    fn read(&self, path: &Path) -> Result<String, DocsError> {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// In-memory documents, for hosts that already hold sources.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<(PathBuf, String)>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, builder style.
    pub fn with_document(mut self, path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    /// Adds or replaces a document, keeping its original position.
    pub fn insert(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) {
        let path = path.into();
        let source = source.into();
        match self.documents.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = source,
            None => self.documents.push((path, source)),
        }
    }
}

impl DocumentSource for MemorySource {
    fn discover(&self) -> Result<Vec<PathBuf>, DocsError> {
        Ok(self.documents.iter().map(|(path, _)| path.clone()).collect())
    }

    fn read(&self, path: &Path) -> Result<String, DocsError> {
        self.documents
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, source)| source.clone())
            .ok_or_else(|| {
                DocsError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} is not in the memory source", path.display()),
                ))
            })
    }
}
