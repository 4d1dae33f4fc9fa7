// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Issue and comment export.

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use super::layout::{comments_file, create_fresh_dir, issue_file, write_pretty_json};
use crate::api::ApiClient;
use crate::error::Result;
use crate::model::Repository;

/// Writes every issue of a repository and its comment thread as JSON files.
#[derive(Debug, Clone, Copy)]
pub struct IssueExporter<'a> {
    client: &'a ApiClient,
}

impl<'a> IssueExporter<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exports into `issues_dir`, which must not exist yet.
    ///
    /// Returns the number of issues written. Pull requests listed by the
    /// issue endpoint are exported like any other issue.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `issues_dir` already exists or cannot be created.
    /// - Any issue or comment page fails to download.
    /// - An issue record has no `number` or `comments_url`.
    /// - A file cannot be written.
    pub async fn export(&self, issues_dir: &Path, repo: &Repository) -> Result<usize> {
        let full_name = repo.full_name()?;
        create_fresh_dir(issues_dir).await?;

        let mut issues = self.client.issues(repo)?;
        let mut exported = 0usize;

        while let Some(issue) = issues
            .next_record()
            .await
            .with_context(|| format!("failed to list issues of {full_name}"))?
        {
            let number = issue.number()?;
            let comments = self
                .client
                .comments(&issue)?
                .collect_all()
                .await
                .with_context(|| format!("failed to fetch comments of {full_name}#{number}"))?;

            info!(
                repo = %full_name,
                number,
                url = issue.url().unwrap_or_default(),
                "Saving issue"
            );
            debug!(number, comments = comments.len(), "comment thread fetched");

            write_pretty_json(&issue_file(issues_dir, number), &issue).await?;
            write_pretty_json(&comments_file(issues_dir, number), &comments).await?;
            exported += 1;
        }

        info!(
            repo = %full_name,
            issues = exported,
            pages = issues.pages_fetched(),
            "Issues exported"
        );
        Ok(exported)
    }
}
