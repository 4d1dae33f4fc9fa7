// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backup command implementation.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::auth::Credentials;
use crate::backup::{BackupSummary, GitMirror, Orchestrator, TarXzArchiver};
use crate::cli::Cli;
use crate::config::loader::ConfigLoader;
use crate::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;
use crate::logging::{LogConfig, LogLevel};

/// Stacks every configuration layer in precedence order.
///
/// # Errors
///
/// Returns an error if a CLI override cannot be applied.
pub fn build_config_loader(cli: &Cli) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    if let Some(path) = &cli.config {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    for (key, value) in cli.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    Ok(loader)
}

/// Loads and validates the effective configuration.
///
/// Also returns the `(kind, path)` of every file layer that was read.
///
/// # Errors
///
/// Returns an error if any layer is unreadable or the result is invalid.
pub fn load_config(cli: &Cli) -> Result<(Config, Vec<(String, PathBuf)>)> {
    let loader = build_config_loader(cli)?;
    let files = loader.loaded_files();
    Ok((loader.build()?, files))
}

/// Logs the config layers once logging is up.
pub fn log_loaded_files(files: &[(String, PathBuf)]) {
    for (kind, path) in files {
        debug!(kind = %kind, path = %path.display(), "config layer");
    }
}

/// Logging setup from CLI, the `DEBUG` variable and `[log]`.
#[must_use]
pub fn build_log_config(cli: &Cli, config: &Config, debug_env: Option<&str>) -> LogConfig {
    let console_level = LogLevel::resolve(cli.log_level, debug_env, config.log.level);
    let file_level = LogLevel::from_u8(console_level.as_u8().max(LogLevel::DEBUG.as_u8()))
        .unwrap_or(LogLevel::DEBUG);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(config.log.file.clone())
        .build()
}

/// Wires the client and the external tools into an orchestrator.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built for `api.url`.
pub fn build_orchestrator(
    config: &Config,
    credentials: Credentials,
    dry_run: bool,
) -> Result<Orchestrator> {
    let client = ApiClient::new(
        &config.api.url,
        credentials,
        config.api.user_agent.as_deref(),
    )?;

    Ok(Orchestrator::builder()
        .client(client)
        .mirror(Box::new(GitMirror::new(&config.tools.git)))
        .archiver(Box::new(TarXzArchiver::new(&config.tools.tar)))
        .options(config.backup_options())
        .skip_private(config.backup.skip_private)
        .dry_run(dry_run)
        .build())
}

/// Main handler for the backup run.
///
/// # Errors
///
/// Returns the first failure of the run; see [`Orchestrator::run`].
pub async fn run_backup_command(
    cli: &Cli,
    config: &Config,
    credentials: Credentials,
) -> Result<BackupSummary> {
    for line in config.format_options() {
        debug!("{line}");
    }
    info!(
        dest = %cli.dest.display(),
        user = credentials.username(),
        api = %config.api.url,
        "Starting backup"
    );

    let orchestrator = build_orchestrator(config, credentials, cli.dry_run)?;
    orchestrator.run(&cli.dest).await
}
