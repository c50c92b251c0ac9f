/// File-backed session token persistence
///
/// The shell keeps the raw token string in a single file between
/// invocations, standing in for browser local storage. Loading tolerates a
/// missing file; clearing tolerates a missing file and a missing token.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Persists one session token in a file
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store over the given file path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Reads the stored token, if any
    pub fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes the token, replacing any previous one
    pub fn save(&self, token: &str) -> io::Result<()> {
        fs::write(&self.path, token)
    }

    /// Removes the stored token
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
