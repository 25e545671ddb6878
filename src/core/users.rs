//! User-level operations over the store.
//!
//! Each mutation is one transaction: load, check, mutate, persist. A failed
//! precondition returns an [`Outcome`] without touching the file.

use crate::core::file_lock::FileLock;
use crate::core::hasher::PasswordHasher;
use crate::core::paths::StorePaths;
use crate::core::store;
use crate::models::entry::Entry;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    AlreadyExists,
    NotFound,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// Store handle shared by all user commands.
pub struct UserStore {
    paths: StorePaths,
    hasher: PasswordHasher,
    locking: bool,
}

impl UserStore {
    pub fn new(paths: StorePaths, hasher: PasswordHasher, locking: bool) -> Self {
        Self {
            paths,
            hasher,
            locking,
        }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    fn lock(&self) -> Result<Option<FileLock>> {
        FileLock::for_store(self.locking, &self.paths.lock, &self.paths.store)
    }

    /// All entries in file order.
    pub fn list(&self) -> Result<Vec<Entry>> {
        store::read_entries(&self.paths.store)
    }

    /// Append a new user. Existing usernames are compared on the field
    /// before the first colon.
    pub fn add(&self, username: &str, password: &str) -> Result<Outcome> {
        let _lock = self.lock()?;
        let entries = store::read_entries(&self.paths.store)?;
        if entries.iter().any(|e| e.username == username) {
            debug!(username, "add rejected: user exists");
            return Ok(Outcome::AlreadyExists);
        }

        let hash = self.hasher.hash(password)?;
        store::append_entry(&self.paths.store, &Entry::new(username, hash))?;
        info!(username, store = %self.paths, "user added");
        Ok(Outcome::Applied)
    }

    /// Remove every entry matching `username:`.
    pub fn delete(&self, username: &str) -> Result<Outcome> {
        let _lock = self.lock()?;
        let entries = store::read_entries(&self.paths.store)?;
        let before = entries.len();
        let remaining: Vec<Entry> = entries.into_iter().filter(|e| !e.matches(username)).collect();
        let removed = before - remaining.len();
        if removed == 0 {
            debug!(username, "delete rejected: user missing");
            return Ok(Outcome::NotFound);
        }

        store::write_entries(&self.paths.store, &remaining)?;
        info!(username, removed, store = %self.paths, "user deleted");
        Ok(Outcome::Applied)
    }

    /// Replace the hash of every entry matching `username:`, in place.
    pub fn change_password(&self, username: &str, password: &str) -> Result<Outcome> {
        let _lock = self.lock()?;
        let mut entries = store::read_entries(&self.paths.store)?;
        if !entries.iter().any(|e| e.matches(username)) {
            debug!(username, "editpass rejected: user missing");
            return Ok(Outcome::NotFound);
        }

        let hash = self.hasher.hash(password)?;
        for entry in entries.iter_mut().filter(|e| e.matches(username)) {
            entry.hash = Some(hash.clone());
        }
        store::write_entries(&self.paths.store, &entries)?;
        info!(username, store = %self.paths, "password updated");
        Ok(Outcome::Applied)
    }
}
