//! Load/save contract for page documents and its JSON file implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use canvas::catalog::Catalog;
use canvas::codec::{self, CodecError};
use canvas::doc::PageDocument;
use canvas::error::ErrorCode;
use tracing::debug;

const EXTENSION: &str = "json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no page named {0}")]
    NotFound(String),
    #[error("invalid page name {0:?}: use letters, digits, '-' and '_'")]
    InvalidName(String),
    #[error("page {name} is unreadable: {source}")]
    Corrupt { name: String, source: CodecError },
    #[error("storage I/O on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Encode(#[from] CodecError),
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_PAGE_NOT_FOUND",
            Self::InvalidName(_) => "E_PAGE_NAME",
            Self::Corrupt { source, .. } => source.error_code(),
            Self::Io { .. } => "E_STORAGE_IO",
            Self::Encode(e) => e.error_code(),
        }
    }
}

/// Where page documents live between edits.
pub trait DocumentStore {
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown page and `Corrupt` when the stored
    /// document fails validation.
    fn load(&self, name: &str) -> Result<PageDocument, StoreError>;

    /// Create or replace a page.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName`, `Encode`, or `Io`.
    fn save(&self, name: &str, doc: &PageDocument) -> Result<(), StoreError>;

    /// Stored page names, sorted.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the listing fails.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// # Errors
    ///
    /// Returns `InvalidName` for a malformed name.
    fn exists(&self, name: &str) -> Result<bool, StoreError>;
}

/// One pretty-printed JSON file per page in a directory.
pub struct FileStore {
    dir: PathBuf,
    catalog: &'static Catalog,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), catalog: Catalog::builtin() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }
}

impl DocumentStore for FileStore {
    fn load(&self, name: &str) -> Result<PageDocument, StoreError> {
        let path = self.path_for(name)?;
        let blob = match fs::read_to_string(&path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound(name.to_owned())),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let doc = codec::deserialize(&blob, self.catalog)
            .map_err(|source| StoreError::Corrupt { name: name.to_owned(), source })?;
        debug!(name, components = doc.len(), "page loaded");
        Ok(doc)
    }

    fn save(&self, name: &str, doc: &PageDocument) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        let record = codec::to_record(doc)?;
        let blob = serde_json::to_string_pretty(&record).map_err(CodecError::from)?;

        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
        // Write beside the target and rename so a crash never leaves half a page.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob).map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path: path.clone(), source })?;
        debug!(name, path = %path.display(), "page saved");
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path: self.dir.clone(), source }),
        };
        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == EXTENSION))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .filter(|name| validate_name(name).is_ok())
            .collect();
        names.sort();
        Ok(names)
    }

    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(name)?.is_file())
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid { Ok(()) } else { Err(StoreError::InvalidName(name.to_owned())) }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
