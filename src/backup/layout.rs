// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! On-disk layout of one repository backup.
//!
//! ```text
//! <dest_root>/<owner>/<name>/
//!     repository-info.json
//!     repository/              bare mirror (removed once archived)
//!     repository.tar.xz        only with --archive
//!     issues/                  only with --backup-issues
//!         <number>.json
//!         <number>.comments.json
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{BackupResult, FsError, RecordError};
use crate::model::Repository;

pub const INFO_FILE: &str = "repository-info.json";
pub const MIRROR_DIR: &str = "repository";
pub const ARCHIVE_FILE: &str = "repository.tar.xz";
pub const ISSUES_DIR: &str = "issues";

const PARTIAL_SUFFIX: &str = ".partial";

/// Paths belonging to one repository under the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    root: PathBuf,
}

impl RepositoryLayout {
    /// Derives `dest_root/owner/name` from the record's `full_name`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if `full_name` is missing or not a safe `owner/name` pair.
    pub fn for_repository(dest_root: &Path, repo: &Repository) -> Result<Self, RecordError> {
        let (owner, name) = repo.owner_and_name()?;
        Ok(Self {
            root: dest_root.join(owner).join(name),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn info_file(&self) -> PathBuf {
        self.root.join(INFO_FILE)
    }

    #[must_use]
    pub fn mirror_dir(&self) -> PathBuf {
        self.root.join(MIRROR_DIR)
    }

    #[must_use]
    pub fn archive_file(&self) -> PathBuf {
        self.root.join(ARCHIVE_FILE)
    }

    #[must_use]
    pub fn issues_dir(&self) -> PathBuf {
        self.root.join(ISSUES_DIR)
    }
}

/// `<number>.json` inside an issues directory.
#[must_use]
pub fn issue_file(issues_dir: &Path, number: u64) -> PathBuf {
    issues_dir.join(format!("{number}.json"))
}

/// `<number>.comments.json` inside an issues directory.
#[must_use]
pub fn comments_file(issues_dir: &Path, number: u64) -> PathBuf {
    issues_dir.join(format!("{number}.comments.json"))
}

/// Sibling path an archive is written to before being renamed into place.
#[must_use]
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// Creates `path` (and missing parents); the leaf itself must not exist.
///
/// # Errors
///
/// Returns `FsError::AlreadyExists` if `path` exists, `FsError::IoError` otherwise.
pub async fn create_fresh_dir(path: &Path) -> BackupResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FsError::io(parent, e))?;
    }

    tokio::fs::create_dir(path).await.map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            FsError::AlreadyExists(path.display().to_string())
        } else {
            FsError::io(path, e)
        }
    })?;
    Ok(())
}

/// Writes `value` as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns `FsError::IoError` if serialization or the write fails.
pub async fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> BackupResult<()> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| FsError::io(path, std::io::Error::other(e)))?;
    bytes.push(b'\n');
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| FsError::io(path, e))?;
    Ok(())
}
