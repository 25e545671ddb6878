//! Tool configuration file model.

use crate::constants;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub hash: HashSection,
    #[serde(default)]
    pub lock: LockSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    /// Store file used when `--file` is not given.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashSection {
    #[serde(default = "default_cost")]
    pub cost: u32,
}

impl Default for HashSection {
    fn default() -> Self {
        Self {
            cost: default_cost(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockSection {
    /// Hold an advisory lock around read-modify-write cycles.
    #[serde(default = "default_lock_enabled")]
    pub enabled: bool,
}

impl Default for LockSection {
    fn default() -> Self {
        Self {
            enabled: default_lock_enabled(),
        }
    }
}

fn default_cost() -> u32 {
    constants::DEFAULT_BCRYPT_COST
}

fn default_lock_enabled() -> bool {
    true
}
