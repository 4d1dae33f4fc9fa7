// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Forward-only cursor over a paginated listing.
//!
//! ```text
//! start_url --GET--> page 1 --link rel=next--> page 2 --...--> page N (no next)
//!                      |                          |
//!                 sleep(delay)               sleep(delay)
//! ```

use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use tracing::info;

use super::client::ApiClient;
use crate::error::BackupResult;

/// Lazy, single-pass cursor; nothing is requested until the first pull.
#[derive(Debug)]
pub struct Pager<'a, T> {
    client: &'a ApiClient,
    next_url: Option<String>,
    buffer: VecDeque<T>,
    pages_fetched: usize,
}

impl<'a, T: DeserializeOwned> Pager<'a, T> {
    #[must_use]
    pub fn new(client: &'a ApiClient, start_url: impl Into<String>) -> Self {
        Self {
            client,
            next_url: Some(start_url.into()),
            buffer: VecDeque::new(),
            pages_fetched: 0,
        }
    }

    /// Number of HTTP requests made so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetches the next page, honoring any rate-limit pause before returning.
    ///
    /// Returns `Ok(None)` once the previous page carried no `next` link.
    ///
    /// # Errors
    ///
    /// Returns the first request, status or decode failure; the cursor is
    /// exhausted afterwards.
    pub async fn next_page(&mut self) -> BackupResult<Option<Vec<T>>> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        let page = self.client.fetch_page::<T>(&url).await?;
        self.pages_fetched += 1;
        self.next_url = page.next;

        if !page.delay.is_zero() {
            info!(
                url = %url,
                delay_secs = page.delay.as_secs(),
                "rate limit exhausted, waiting for reset"
            );
            tokio::time::sleep(page.delay).await;
        }

        Ok(Some(page.records))
    }

    /// Next single record, fetching further pages as needed.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::next_page`] failures.
    pub async fn next_record(&mut self) -> BackupResult<Option<T>> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Ok(Some(record));
            }
            match self.next_page().await? {
                Some(records) => self.buffer.extend(records),
                None => return Ok(None),
            }
        }
    }

    /// Drains the cursor into one vector, in server order.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::next_page`] failures.
    pub async fn collect_all(mut self) -> BackupResult<Vec<T>> {
        let mut all: Vec<T> = self.buffer.drain(..).collect();
        while let Some(records) = self.next_page().await? {
            all.extend(records);
        }
        Ok(all)
    }
}
