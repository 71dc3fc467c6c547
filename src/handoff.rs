//! File-backed preview handoff: the CLI's stand-in for browser session storage.

use std::fs;
use std::io;
use std::path::PathBuf;

use canvas::preview::{HandoffError, HandoffStore};

/// Stores each key as `<dir>/<key>.json`.
pub struct FileHandoff {
    dir: PathBuf,
}

impl FileHandoff {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key.chars().map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' }).collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl HandoffStore for FileHandoff {
    fn put(&mut self, key: &str, value: String) -> Result<(), HandoffError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
