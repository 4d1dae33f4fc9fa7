// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository mirroring capability.

use std::path::Path;

use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::{debug, info};

use crate::core::process::builder::ProcessBuilder;
use crate::error::{BackupError, Result};

/// Produces a complete mirror (all refs) of a remote repository.
pub trait Mirror: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Mirrors `clone_url` into `target`, which must not exist yet.
    fn mirror<'a>(&'a self, clone_url: &'a str, target: &'a Path) -> BoxFuture<'a, Result<()>>;
}

/// `git clone --mirror` through the system git binary.
///
/// `program` is a name looked up in PATH or a path to the executable.
#[derive(Debug, Clone)]
pub struct GitMirror {
    program: String,
}

impl GitMirror {
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

    async fn clone_mirror(&self, clone_url: &str, target: &Path) -> Result<()> {
        debug!(
            url = %clone_url,
            target = %target.display(),
            "Cloning mirror"
        );

        ProcessBuilder::which(&self.program)
            .map_err(BackupError::from)?
            .arg("clone")
            .arg("--mirror")
            .arg(clone_url)
            .arg(target)
            .env("GIT_TERMINAL_PROMPT", "0")
            .capture_stderr()
            .name("git clone --mirror")
            .run()
            .await
            .with_context(|| format!("failed to mirror {clone_url}"))?;

        info!(target = %target.display(), "Mirror cloned");
        Ok(())
    }
}

impl Default for GitMirror {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Mirror for GitMirror {
    fn name(&self) -> &str {
        "git"
    }

    fn mirror<'a>(&'a self, clone_url: &'a str, target: &'a Path) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.clone_mirror(clone_url, target))
    }
}
