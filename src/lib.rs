//! htpasswd credential file manager.
//!
//! Lists, adds, deletes, and re-hashes users in a flat `username:hash` file
//! using bcrypt.
//!
//! ## Modules
//! - `cli` — Command-line handlers
//! - `core` — Store I/O, hashing, locking, user operations
//! - `models` — Entry and configuration types
//! - `util` — Filesystem and logging helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
