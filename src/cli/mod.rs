// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Option Precedence
//!
//! ```text
//! github-backup [options] <DEST>
//!
//! --archive / --backup-issues / --include-private / --api-url / --log-file
//!     → config overrides (beat file and env)
//! -l/--log-level N  → console verbosity (beats DEBUG and log.level)
//! -c/--config FILE  → extra TOML layer above github-backup.toml
//! --dry-run         → list what would be backed up
//! ```


use clap::Parser;
use std::path::PathBuf;

/// Back up every repository of a GitHub account.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "github-backup",
    author,
    version,
    about = "Back up every repository of a GitHub account",
    long_about = "github-backup Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Mirrors every repository visible to the given credentials into\n\
                  DEST/<owner>/<name>/, together with its metadata and, on request,\n\
                  an xz archive of the mirror and all issues with their comments.",
    after_help = "ENVIRONMENT:\n\n\
                  GITHUB_USERNAME and GITHUB_TOKEN are required. Set DEBUG to any\n\
                  non-empty value for debug logging. GHBACKUP_<SECTION>__<KEY>\n\
                  variables override github-backup.toml, e.g.\n\
                  GHBACKUP_BACKUP__ARCHIVE=true."
)]
pub struct Cli {
    /// Destination directory; must not exist yet.
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Replace each mirror with a repository.tar.xz archive.
    #[arg(long)]
    pub archive: bool,

    /// Export issues and their comments as JSON.
    #[arg(long = "backup-issues")]
    pub backup_issues: bool,

    /// Back up private repositories too.
    #[arg(long = "include-private")]
    pub include_private: bool,

    /// API base URL (GitHub Enterprise: https://<host>/api/v3).
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Additional TOML configuration file.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// List the repositories that would be backed up without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl Cli {
    /// Converts command-line flags to configuration overrides.
    ///
    /// Only flags that were given produce an override, so an absent
    /// `--archive` does not reset `backup.archive = true` from a file.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = Vec::new();

        if self.archive {
            overrides.push(("backup.archive", config::Value::from(true)));
        }
        if self.backup_issues {
            overrides.push(("backup.issues", config::Value::from(true)));
        }
        if self.include_private {
            overrides.push(("backup.skip_private", config::Value::from(false)));
        }
        if let Some(url) = &self.api_url {
            overrides.push(("api.url", config::Value::from(url.as_str())));
        }
        if let Some(path) = &self.log_file {
            overrides.push((
                "log.file",
                config::Value::from(path.display().to_string()),
            ));
        }

        overrides
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments from an iterator.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
