// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Authenticated HTTP client for the hosting API.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, LINK};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::link::next_link;
use super::pager::Pager;
use super::rate_limit;
use crate::auth::Credentials;
use crate::error::{ApiError, BackupResult};
use crate::model::{Issue, Repository};

/// Public API endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// `User-Agent` sent when the configuration does not override it.
#[must_use]
pub fn default_user_agent() -> String {
    format!("github-backup/{}", env!("CARGO_PKG_VERSION"))
}

/// One decoded page of a listing endpoint.
#[derive(Debug)]
pub struct Page<T> {
    pub records: Vec<T>,
    /// Verbatim `rel="next"` URL, `None` on the last page.
    pub next: Option<String>,
    /// Pause demanded by the rate-limit headers of this response.
    pub delay: Duration,
}

/// Client bound to one API base URL and one set of credentials.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    /// Builds a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` is not an http(s) URL,
    /// or `ApiError::Request` if the HTTP client cannot be constructed.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        user_agent: Option<&str>,
    ) -> BackupResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url.to_string()).into());
        }

        let http = Client::builder()
            .user_agent(user_agent.map_or_else(default_user_agent, str::to_string))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            credentials,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// First page of the authenticated user's repositories.
    #[must_use]
    pub fn repositories_url(&self) -> String {
        format!("{}/user/repos?page=1", self.base_url)
    }

    /// First page of all issues of `repo`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if the record has no `full_name`.
    pub fn issues_url(&self, repo: &Repository) -> BackupResult<String> {
        let full_name = repo.full_name()?;
        Ok(format!(
            "{}/repos/{full_name}/issues?state=all&direction=asc",
            self.base_url
        ))
    }

    /// Every repository visible to the credentials, in server order.
    #[must_use]
    pub fn repositories(&self) -> Pager<'_, Repository> {
        self.pager(self.repositories_url())
    }

    /// Every issue of `repo`, open and closed.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if the record has no `full_name`.
    pub fn issues(&self, repo: &Repository) -> BackupResult<Pager<'_, Issue>> {
        Ok(self.pager(self.issues_url(repo)?))
    }

    /// The comment thread of `issue`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if the record has no `comments_url`.
    pub fn comments(&self, issue: &Issue) -> BackupResult<Pager<'_, Value>> {
        Ok(self.pager(issue.comments_url()?))
    }

    /// A cursor starting at `start_url`.
    #[must_use]
    pub fn pager<T: DeserializeOwned>(&self, start_url: impl Into<String>) -> Pager<'_, T> {
        Pager::new(self, start_url)
    }

    /// Issues one authenticated GET and decodes the JSON array body.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request cannot be sent.
    /// - The server answers with a non-success status.
    /// - The body is not a JSON array of `T`.
    pub async fn fetch_page<T: DeserializeOwned>(&self, url: &str) -> BackupResult<Page<T>> {
        debug!(url = %url, "fetching page");

        let response = self
            .http
            .get(url)
            .basic_auth(self.credentials.username(), Some(self.credentials.token()))
            .header(ACCEPT, ACCEPT_V3)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_link);
        let delay = rate_limit::observe(response.headers());

        let body = response.bytes().await?;
        let records = serde_json::from_slice::<Vec<T>>(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        debug!(url = %url, records = records.len(), has_next = next.is_some(), "page fetched");

        Ok(Page {
            records,
            next,
            delay,
        })
    }
}
