// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing and configuration layering.

use std::io::Write;

use clap::Parser;
use github_backup::cli::Cli;
use github_backup::cmd::backup::{build_config_loader, build_log_config, load_config};
use github_backup::config::Config;
use github_backup::logging::LogLevel;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    write!(file, "{content}").expect("failed to write temp file");
    file
}

// =============================================================================
// Config layering
// =============================================================================

#[test]
fn cli_flags_override_config_file() {
    let file = config_file(
        "[backup]\narchive = false\nskip_private = true\n[api]\nurl = \"https://a.example\"\n",
    );
    let path = file.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "github-backup",
        "-c",
        path.as_str(),
        "--archive",
        "--include-private",
        "--api-url",
        "http://localhost:9999",
        "dest",
    ])
    .unwrap();

    let config = build_config_loader(&cli).unwrap().build().unwrap();
    assert!(config.backup.archive);
    assert!(!config.backup.skip_private);
    assert_eq!(config.api.url, "http://localhost:9999");
}

#[test]
fn absent_flags_keep_config_file_values() {
    let file = config_file("[backup]\nissues = true\n[log]\nfile = \"from-file.log\"\n");
    let path = file.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from(["github-backup", "--config", path.as_str(), "dest"]).unwrap();

    let config = build_config_loader(&cli).unwrap().build().unwrap();
    assert!(config.backup.issues);
    assert!(!config.backup.archive);
    assert_eq!(config.log.file.as_deref(), Some("from-file.log"));
}

#[test]
fn load_config_reports_file_layers() {
    let file = config_file("[backup]\narchive = true\n");
    let path = file.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from(["github-backup", "-c", path.as_str(), "dest"]).unwrap();

    let (config, files) = load_config(&cli).unwrap();
    assert!(config.backup.archive);
    assert!(
        files
            .iter()
            .any(|(kind, loaded)| kind == "file" && loaded == file.path())
    );
}

#[test]
fn missing_explicit_config_file_fails() {
    let cli = Cli::try_parse_from([
        "github-backup",
        "--config",
        "/nonexistent/github-backup.toml",
        "dest",
    ])
    .unwrap();
    assert!(build_config_loader(&cli).unwrap().build().is_err());
}

#[test]
fn invalid_api_url_flag_fails_validation() {
    let cli = Cli::try_parse_from(["github-backup", "--api-url", "not-a-url", "dest"]).unwrap();
    let err = build_config_loader(&cli).unwrap().build().unwrap_err();
    assert!(format!("{err:#}").contains("'url'"));
}

// =============================================================================
// Log level resolution
// =============================================================================

#[test]
fn log_level_precedence() {
    let mut config = Config::default();
    config.log.level = Some(LogLevel::WARN);

    let plain = Cli::try_parse_from(["github-backup", "dest"]).unwrap();
    assert_eq!(
        build_log_config(&plain, &config, None).console_level(),
        LogLevel::WARN
    );
    assert_eq!(
        build_log_config(&plain, &config, Some("1")).console_level(),
        LogLevel::DEBUG
    );

    let explicit = Cli::try_parse_from(["github-backup", "-l", "1", "dest"]).unwrap();
    let log_config = build_log_config(&explicit, &config, Some("1"));
    assert_eq!(log_config.console_level(), LogLevel::ERROR);
    assert_eq!(log_config.file_level(), LogLevel::DEBUG);

    let trace = Cli::try_parse_from(["github-backup", "-l", "5", "dest"]).unwrap();
    assert_eq!(
        build_log_config(&trace, &Config::default(), None).file_level(),
        LogLevel::TRACE
    );
}

#[test]
fn log_file_flag_reaches_log_config() {
    let cli = Cli::try_parse_from(["github-backup", "--log-file", "run.log", "dest"]).unwrap();
    let config = build_config_loader(&cli).unwrap().build().unwrap();
    let log_config = build_log_config(&cli, &config, None);
    assert_eq!(log_config.log_file(), Some("run.log"));
}
