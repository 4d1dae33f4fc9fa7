// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-repository backup steps.
//!
//! ```text
//! create <root>  -->  repository-info.json  -->  mirror repository/
//!                                                     |
//!                      compress? archive -> rename -> remove repository/
//!                                                     |
//!                      include_issues? issues/
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::archive::{Archiver, archive_into_place};
use super::issues::IssueExporter;
use super::layout::{MIRROR_DIR, RepositoryLayout, create_fresh_dir, write_pretty_json};
use super::mirror::Mirror;
use crate::api::ApiClient;
use crate::error::{FsError, Result};
use crate::model::Repository;

/// What to produce besides the metadata file and the mirror.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackupOptions {
    /// Replace the mirror directory with `repository.tar.xz`.
    pub compress: bool,
    /// Export issues and their comments.
    pub include_issues: bool,
}

/// Backs up single repositories with injected capabilities.
#[derive(Clone, Copy)]
pub struct RepositoryBackup<'a> {
    client: &'a ApiClient,
    mirror: &'a dyn Mirror,
    archiver: &'a dyn Archiver,
    options: BackupOptions,
}

impl<'a> RepositoryBackup<'a> {
    #[must_use]
    pub fn new(
        client: &'a ApiClient,
        mirror: &'a dyn Mirror,
        archiver: &'a dyn Archiver,
        options: BackupOptions,
    ) -> Self {
        Self {
            client,
            mirror,
            archiver,
            options,
        }
    }

    #[must_use]
    pub const fn options(&self) -> BackupOptions {
        self.options
    }

    /// Backs up `repo` below `dest_root` and returns the repository directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record lacks `full_name` or `clone_url`, or the name is unsafe.
    /// - The repository directory already exists.
    /// - Mirroring, archiving or the issue export fails.
    ///
    /// Files written before the failure are left in place.
    pub async fn run(&self, dest_root: &Path, repo: &Repository) -> Result<PathBuf> {
        let full_name = repo.full_name()?;
        let layout = RepositoryLayout::for_repository(dest_root, repo)?;
        let clone_url = repo.clone_url()?;

        info!(repo = %full_name, path = %layout.root().display(), "Backing up repository");

        create_fresh_dir(layout.root()).await?;
        write_pretty_json(&layout.info_file(), repo).await?;

        let mirror_dir = layout.mirror_dir();
        self.mirror
            .mirror(clone_url, &mirror_dir)
            .await
            .with_context(|| format!("{} failed to mirror {full_name}", self.mirror.name()))?;

        if self.options.compress {
            archive_into_place(
                self.archiver,
                layout.root(),
                MIRROR_DIR,
                &layout.archive_file(),
            )
            .await?;

            tokio::fs::remove_dir_all(&mirror_dir)
                .await
                .map_err(|e| FsError::io(&mirror_dir, e))?;
            debug!(repo = %full_name, "Mirror directory removed");
        }

        if self.options.include_issues {
            IssueExporter::new(self.client)
                .export(&layout.issues_dir(), repo)
                .await?;
        }

        Ok(layout.root().to_path_buf())
    }
}
