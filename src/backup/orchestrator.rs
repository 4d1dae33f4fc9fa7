// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Whole-account backup run.

use std::path::Path;

use anyhow::Context;
use bon::Builder;
use tracing::{info, warn};

use super::archive::Archiver;
use super::layout::{RepositoryLayout, create_fresh_dir};
use super::mirror::Mirror;
use super::pipeline::{BackupOptions, RepositoryBackup};
use crate::api::ApiClient;
use crate::error::{FsError, Result};

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackupSummary {
    pub backed_up: usize,
    pub skipped: usize,
}

/// Enumerates the account's repositories and backs each one up in order.
///
/// # Example
///
/// ```ignore
/// let orchestrator = Orchestrator::builder()
///     .client(client)
///     .mirror(Box::new(GitMirror::default()))
///     .archiver(Box::new(TarXzArchiver::default()))
///     .options(BackupOptions { compress: true, include_issues: false })
///     .build();
/// let summary = orchestrator.run(Path::new("/backups")).await?;
/// ```
#[derive(Builder)]
pub struct Orchestrator {
    client: ApiClient,
    mirror: Box<dyn Mirror>,
    archiver: Box<dyn Archiver>,
    #[builder(default)]
    options: BackupOptions,
    #[builder(default = true)]
    skip_private: bool,
    #[builder(default)]
    dry_run: bool,
}

impl Orchestrator {
    /// Runs the backup into `dest_root`, which must not exist yet.
    ///
    /// The root is created before the first API request. The first failing
    /// repository aborts the run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `dest_root` already exists or cannot be created.
    /// - Listing repositories fails.
    /// - Any repository backup fails.
    pub async fn run(&self, dest_root: &Path) -> Result<BackupSummary> {
        self.prepare_root(dest_root).await?;

        let pipeline = RepositoryBackup::new(
            &self.client,
            self.mirror.as_ref(),
            self.archiver.as_ref(),
            self.options,
        );

        let mut repositories = self.client.repositories();
        let mut summary = BackupSummary::default();

        while let Some(repo) = repositories
            .next_record()
            .await
            .context("failed to list repositories")?
        {
            let full_name = repo.full_name()?;

            if self.skip_private && repo.is_private()? {
                warn!(repo = %full_name, "Skipping private repository");
                summary.skipped += 1;
                continue;
            }

            if self.dry_run {
                let layout = RepositoryLayout::for_repository(dest_root, &repo)?;
                info!(
                    repo = %full_name,
                    path = %layout.root().display(),
                    "[dry-run] Would back up repository"
                );
                summary.backed_up += 1;
                continue;
            }

            pipeline
                .run(dest_root, &repo)
                .await
                .with_context(|| format!("failed to back up {full_name}"))?;
            summary.backed_up += 1;
        }

        info!(
            backed_up = summary.backed_up,
            skipped = summary.skipped,
            pages = repositories.pages_fetched(),
            "Backup complete"
        );
        Ok(summary)
    }

    async fn prepare_root(&self, dest_root: &Path) -> Result<()> {
        if self.dry_run {
            let exists = tokio::fs::try_exists(dest_root)
                .await
                .map_err(|e| FsError::io(dest_root, e))?;
            if exists {
                return Err(FsError::AlreadyExists(dest_root.display().to_string()).into());
            }
            info!(path = %dest_root.display(), "[dry-run] Would create destination");
            return Ok(());
        }

        create_fresh_dir(dest_root)
            .await
            .with_context(|| format!("cannot use destination {}", dest_root.display()))
    }
}
