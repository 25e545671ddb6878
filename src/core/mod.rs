//! Core logic: store I/O, hashing, locking, and user operations.

pub mod config;
pub mod file_lock;
pub mod hasher;
pub mod paths;
pub mod store;
pub mod users;
