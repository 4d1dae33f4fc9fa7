// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Archiving capability.
//!
//! ```text
//! archiver --> <archive>.partial --rename--> <archive>
//!                   |
//!              removed on any failure
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::{debug, info};

use super::layout::partial_path;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BackupError, FsError, Result};

/// Packs one directory entry into a compressed archive.
pub trait Archiver: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Writes `base_dir/entry` to `archive`, with `entry/` as the path prefix
    /// of every archive member.
    fn archive<'a>(
        &'a self,
        base_dir: &'a Path,
        entry: &'a str,
        archive: &'a Path,
    ) -> BoxFuture<'a, Result<()>>;
}

/// xz-compressed tarball through the system tar binary.
#[derive(Debug, Clone)]
pub struct TarXzArchiver {
    program: String,
}

impl TarXzArchiver {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// `tar -cJf <archive> -C <base_dir> <entry>`
    async fn create(&self, base_dir: &Path, entry: &str, archive: &Path) -> Result<()> {
        debug!(
            archive = %archive.display(),
            base_dir = %base_dir.display(),
            entry,
            "Creating archive"
        );

        ProcessBuilder::which(&self.program)
            .map_err(BackupError::from)?
            .arg("-cJf")
            .arg(archive)
            .arg("-C")
            .arg(base_dir)
            .arg(entry)
            .capture_stderr()
            .name("tar -cJf")
            .run()
            .await
            .with_context(|| format!("failed to create archive {}", archive.display()))?;

        Ok(())
    }
}

impl Default for TarXzArchiver {
    fn default() -> Self {
        Self::new("tar")
    }
}

impl Archiver for TarXzArchiver {
    fn name(&self) -> &str {
        "tar"
    }

    fn archive<'a>(
        &'a self,
        base_dir: &'a Path,
        entry: &'a str,
        archive: &'a Path,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.create(base_dir, entry, archive))
    }
}

/// Deletes the partial archive on drop unless [`Self::keep`] was called.
struct PartialFileGuard {
    path: PathBuf,
    keep: bool,
}

impl PartialFileGuard {
    const fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    const fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            debug!(path = %self.path.display(), error = %e, "failed to remove partial archive");
        }
    }
}

/// Runs `archiver` against a temporary sibling of `archive` and renames the
/// result into place only once the archiver succeeded.
///
/// # Errors
///
/// Returns the archiver's error or `FsError::IoError` if the rename fails.
/// Either way no file is left at `archive` or at its temporary sibling.
pub async fn archive_into_place(
    archiver: &dyn Archiver,
    base_dir: &Path,
    entry: &str,
    archive: &Path,
) -> Result<()> {
    let partial = partial_path(archive);
    let mut guard = PartialFileGuard::new(partial.clone());

    archiver
        .archive(base_dir, entry, &partial)
        .await
        .with_context(|| format!("{} failed to archive {entry}", archiver.name()))?;

    tokio::fs::rename(&partial, archive)
        .await
        .map_err(|e| FsError::io(archive, e))?;
    guard.keep();

    info!(archive = %archive.display(), "Archive created");
    Ok(())
}
