// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             BackupError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+------+----+
//!   v      v      v       v      v      v    v
//! Auth    Api  Record  Process  Fs   Config  Io
//!  Box    Box    Box     Box    Box    Box   Box
//!
//! Sub-errors (unboxed internally):
//!   Auth     MissingVariable
//!   Api      Status, Request, Decode, InvalidUrl
//!   Record   MissingField, InvalidFullName
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Fs       AlreadyExists, IoError
//!   Config   ParseError, InvalidValue
//!
//! All variants boxed => BackupError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`BackupError`].
pub type BackupResult<T> = std::result::Result<T, BackupError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Credentials are missing.
    #[error("auth error: {0}")]
    Auth(#[from] Box<AuthError>),

    /// Remote API call failed.
    #[error("api error: {0}")]
    Api(#[from] Box<ApiError>),

    /// An API record lacks a field the backup relies on.
    #[error("record error: {0}")]
    Record(#[from] Box<RecordError>),

    /// External tool (git, tar) failed.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for BackupError {
                fn from(err: $error) -> Self {
                    BackupError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    AuthError => Auth,
    ApiError => Api,
    RecordError => Record,
    ProcessError => Process,
    FsError => Fs,
    ConfigError => Config,
    std::io::Error => Io,
}

impl From<reqwest::Error> for BackupError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Request(err).into()
    }
}

// --- Auth Errors ---

/// Credential errors, checked once at startup.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is unset or empty.
    #[error("environment variable {name} is required")]
    MissingVariable { name: String },
}

// --- Api Errors ---

/// Remote API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status.
    #[error("http error {status}: {url}")]
    Status { status: u16, url: String },

    /// Error from reqwest library.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body is not the expected JSON array.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

// --- Record Errors ---

/// Errors about the shape of API records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Required field absent or of the wrong type.
    #[error("{kind} record is missing field '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// `full_name` is not a safe `owner/name` pair.
    #[error("invalid repository full_name: '{0}'")]
    InvalidFullName(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Destination already exists; backups never merge into existing trees.
    #[error("path already exists: {0}")]
    AlreadyExists(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse config: {message}")]
    ParseError { message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
