// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backup execution.
//!
//! # Architecture
//!
//! ```text
//! Orchestrator
//!      |  ApiClient::repositories()
//!      v
//!   Repository ---- private && skip_private? --> warn, skip
//!      |
//!      v
//! RepositoryBackup
//!   /      |       \
//!  v       v        v
//! Mirror  Archiver  IssueExporter
//!  git     tar       ApiClient::issues / comments
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Orchestrator`] | Creates the destination root and walks every repository |
//! | [`RepositoryBackup`] | Metadata, mirror, optional archive and issues for one repository |
//! | [`Mirror`] | Capability producing a full mirror clone |
//! | [`Archiver`] | Capability packing the mirror into `repository.tar.xz` |
//! | [`IssueExporter`] | Issue and comment JSON export |
//! | [`RepositoryLayout`] | Path derivation below the destination root |
//!
//! `Mirror` and `Archiver` are trait objects so tests can swap in fakes.

pub mod archive;
pub mod issues;
pub mod layout;
pub mod mirror;
pub mod orchestrator;
pub mod pipeline;

pub use archive::{Archiver, TarXzArchiver, archive_into_place};
pub use issues::IssueExporter;
pub use layout::RepositoryLayout;
pub use mirror::{GitMirror, Mirror};
pub use orchestrator::{BackupSummary, Orchestrator};
pub use pipeline::{BackupOptions, RepositoryBackup};

#[cfg(test)]
mod tests;
