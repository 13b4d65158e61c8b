use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::layout::ProfileKind;

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Profile used when a request does not pick one.
    pub render_profile: ProfileKind,
    /// Enables the archive endpoint when set.
    pub archive_dir: Option<PathBuf>,
    /// Where exports are staged before saving; the system temp dir when unset.
    pub staging_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            render_profile: ProfileKind::Compact,
            archive_dir: None,
            staging_dir: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: match var("PORT") {
                Some(v) => v
                    .trim()
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: var("RUST_LOG").unwrap_or(defaults.rust_log),
            render_profile: match var("RENDER_PROFILE") {
                Some(v) => v.parse().context("RENDER_PROFILE is invalid")?,
                None => defaults.render_profile,
            },
            archive_dir: var("ARCHIVE_DIR").map(PathBuf::from),
            staging_dir: var("STAGING_DIR").map(PathBuf::from),
            max_body_bytes: match var("MAX_BODY_BYTES") {
                Some(v) => v
                    .trim()
                    .parse::<usize>()
                    .context("MAX_BODY_BYTES must be a byte count")?,
                None => defaults.max_body_bytes,
            },
        })
    }
}
