//! A single `username:hash` record of the store.

use crate::constants::FIELD_DELIMITER;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub username: String,
    /// Everything after the first delimiter. `None` when the line had no
    /// delimiter at all, so malformed lines round-trip unchanged.
    pub hash: Option<String>,
}

impl Entry {
    pub fn new(username: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            hash: Some(hash.into()),
        }
    }

    /// Split a raw line on the first delimiter only.
    pub fn parse(line: &str) -> Self {
        match line.split_once(FIELD_DELIMITER) {
            Some((username, hash)) => Self {
                username: username.to_string(),
                hash: Some(hash.to_string()),
            },
            None => Self {
                username: line.to_string(),
                hash: None,
            },
        }
    }

    pub fn to_line(&self) -> String {
        self.to_string()
    }

    /// Whether the raw line starts with `username:`.
    pub fn matches(&self, username: &str) -> bool {
        self.hash.is_some() && self.username == username
    }

    /// Leading `$id$cost` part of a modular-crypt hash, if recognizable.
    pub fn hash_scheme(&self) -> Option<&str> {
        let hash = self.hash.as_deref()?;
        let rest = hash.strip_prefix('$')?;
        let mut parts = rest.splitn(3, '$');
        let id = parts.next()?;
        let cost = parts.next()?;
        parts.next()?;
        Some(&hash[..id.len() + cost.len() + 2])
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hash {
            Some(hash) => write!(f, "{}{}{}", self.username, FIELD_DELIMITER, hash),
            None => write!(f, "{}", self.username),
        }
    }
}
