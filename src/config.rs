use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::TrackerError;

pub const TOKEN_VAR: &str = "PIVOTAL_TOKEN";
pub const DEFAULT_BASE_URL: &str = "https://www.pivotaltracker.com/services/v3";

/// Everything the tracker client needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    base_url: Option<String>,
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pivotal-tools")
        .join("config.toml")
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: FileConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// Resolve the token first so a missing credential fails before anything else.
pub fn resolve(
    token: Option<String>,
    path: &Path,
    base_url_override: Option<String>,
) -> Result<Config> {
    let token = token
        .filter(|t| !t.trim().is_empty())
        .ok_or(TrackerError::MissingCredential)?;
    let file = read_file_config(path)?;
    let base_url = base_url_override
        .or(file.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();
    Ok(Config { token, base_url })
}

pub fn load_config(base_url_override: Option<String>) -> Result<Config> {
    resolve(
        std::env::var(TOKEN_VAR).ok(),
        &config_path(),
        base_url_override,
    )
}

pub fn missing_token_help() -> String {
    format!(
        "You need to have your Pivotal Tracker API token set in the '{TOKEN_VAR}' env variable.\n\n\
         Add it to your shell profile:\n  export {TOKEN_VAR}='your token'\n\n\
         If you do not have one, log in to Pivotal Tracker, open your profile page and scroll to the bottom."
    )
}
