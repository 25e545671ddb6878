//! Centralized constants for file names, permissions, and hashing limits.

/// Default credential store, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "user.htpasswd";

/// Suffix appended to the store path to form the advisory lock file.
pub const LOCK_SUFFIX: &str = ".lock";

/// Permission mode for newly created store files.
pub const STORE_FILE_MODE: u32 = 0o644;

/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Lowest bcrypt cost accepted in configuration.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest bcrypt cost accepted in configuration.
pub const MAX_BCRYPT_COST: u32 = 31;

/// bcrypt only consumes the first 72 bytes of a password.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Field delimiter between username and hash.
pub const FIELD_DELIMITER: char = ':';

/// Exit code for business-rule failures under `--strict`.
pub const EXIT_RULE_VIOLATION: i32 = 3;
