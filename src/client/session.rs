// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Durable storage for the session token.
//!
//! The client keeps exactly one credential between runs: the bearer token
//! from the last successful login. [`SessionStore`] abstracts where that
//! single value lives; the file-backed implementation survives restarts,
//! the in-memory one backs tests.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Error type for session storage operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Single-slot persistence for the session token.
///
/// `load` after `save` returns the saved token until `clear` or a
/// replacing `save`; `clear` on an empty store is a no-op.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, SessionError>;
    fn save(&self, token: &str) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token storage in a single file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let mut token = String::new();
        file.read_to_string(&mut token)?;
        let token = token.trim();
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(token.as_bytes())?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Token storage in process memory, for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        let token = self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(token.clone())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        let mut slot = self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_store() -> (TempDir, FileSessionStore) {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session").join("token"));
        (dir, store)
    }

    #[test]
    fn load_before_any_save_is_empty() {
        let (_dir, store) = file_store();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let (_dir, store) = file_store();
        store.save("first.token.value").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("first.token.value"));

        // A later save replaces the stored token.
        store.save("second.token.value").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("second.token.value"));
    }

    #[test]
    fn clear_removes_and_is_idempotent() {
        let (_dir, store) = file_store();
        store.save("some.token").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        // Clearing an already-empty store succeeds.
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn memory_store_roundtrips() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save("mem.token").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("mem.token"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
