// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. github-backup.toml (cwd, optional)
//! 3. --config FILE
//! 4. GHBACKUP_* env vars
//! 5. CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GHBACKUP_API__URL=https://ghe.example.com/api/v3  → api.url
//! GHBACKUP_BACKUP__ARCHIVE=true                     → backup.archive = true
//! GHBACKUP_BACKUP__SKIP_PRIVATE=false               → backup.skip_private = false
//! GHBACKUP_TOOLS__GIT=/usr/local/bin/git            → tools.git
//! ```
//!
//! Credentials are never read from configuration; see [`crate::auth`].

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::backup::BackupOptions;
use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
pub use types::{ApiConfig, BackupConfig, LogSettings, ToolsConfig};

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "github-backup.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "GHBACKUP";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    pub backup: BackupConfig,
    pub tools: ToolsConfig,
    pub log: LogSettings,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use github_backup::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("github-backup.toml")
    ///     .with_env_prefix("GHBACKUP")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the API URL is not http(s) or a
    /// tool name is empty.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let url = self.api.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid("api", "url", format!("expected an http(s) URL, got '{url}'")));
        }
        if self.api.user_agent.as_deref().is_some_and(|ua| ua.trim().is_empty()) {
            return Err(invalid("api", "user_agent", "must not be empty".to_string()));
        }
        for (key, value) in [("git", &self.tools.git), ("tar", &self.tools.tar)] {
            if value.trim().is_empty() {
                return Err(invalid("tools", key, "must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// Pipeline options derived from `[backup]`.
    #[must_use]
    pub fn backup_options(&self) -> BackupOptions {
        self.backup.into()
    }

    /// Effective settings as aligned `key = value` lines, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("api.url", self.api.url.clone());
        if let Some(user_agent) = &self.api.user_agent {
            options.insert("api.user_agent", user_agent.clone());
        }
        options.insert("backup.archive", self.backup.archive.to_string());
        options.insert("backup.issues", self.backup.issues.to_string());
        options.insert("backup.skip_private", self.backup.skip_private.to_string());
        options.insert("tools.git", self.tools.git.clone());
        options.insert("tools.tar", self.tools.tar.clone());
        if let Some(level) = self.log.level {
            options.insert("log.level", level.as_u8().to_string());
        }
        if let Some(file) = &self.log.file {
            options.insert("log.file", file.clone());
        }

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn invalid(section: &str, key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message,
    }
}
