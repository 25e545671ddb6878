use crate::models::config::ToolConfig;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Load the configuration named by `--config`, or defaults when none was given.
pub fn load(path: Option<&Path>) -> Result<ToolConfig> {
    let Some(path) = path else {
        return Ok(ToolConfig::default());
    };
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ToolConfig =
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
    validate(&config)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn validate(config: &ToolConfig) -> Result<()> {
    if let Some(store) = &config.store.path {
        if store.as_os_str().is_empty() {
            bail!("[store] path cannot be empty");
        }
    }
    Ok(())
}
