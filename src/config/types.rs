// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! [api]     url, user_agent
//! [backup]  archive, issues, skip_private
//! [tools]   git, tar
//! [log]     level, file
//! ```

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_URL;
use crate::backup::BackupOptions;
use crate::logging::LogLevel;

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL; GitHub Enterprise installs use `https://<host>/api/v3`.
    pub url: String,
    /// `User-Agent` override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            user_agent: None,
        }
    }
}

/// What each repository backup produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackupConfig {
    /// Replace the mirror with `repository.tar.xz`.
    pub archive: bool,
    /// Export issues and comments.
    pub issues: bool,
    /// Leave private repositories out.
    pub skip_private: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            archive: false,
            issues: false,
            skip_private: true,
        }
    }
}

impl From<BackupConfig> for BackupOptions {
    fn from(config: BackupConfig) -> Self {
        Self {
            compress: config.archive,
            include_issues: config.issues,
        }
    }
}

/// External executables, looked up on `PATH` unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub git: String,
    pub tar: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            tar: "tar".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Console level (0-5); `None` falls back to info.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}
