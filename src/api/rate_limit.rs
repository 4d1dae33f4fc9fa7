// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rate-limit governor.
//!
//! ```text
//! x-ratelimit-remaining: 0
//! x-ratelimit-reset: 1706400000   (epoch seconds)
//!        |
//!        v
//! RateLimit { remaining, reset_at }
//!        |
//!   remaining <= 1 ?  delay = reset_at - now + 1s  (floored at 0)
//!   otherwise         delay = 0
//! ```
//!
//! The governor only reports a delay; the pager does the sleeping.

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::debug;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Quota state reported by the latest response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    remaining: u64,
    reset_at: DateTime<Utc>,
}

impl RateLimit {
    #[must_use]
    pub const fn new(remaining: u64, reset_at: DateTime<Utc>) -> Self {
        Self {
            remaining,
            reset_at,
        }
    }

    /// Reads the quota headers; `None` if either is missing or malformed.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = header_value(headers, REMAINING_HEADER)?
            .parse::<u64>()
            .ok()?;
        let reset_epoch = header_value(headers, RESET_HEADER)?.parse::<i64>().ok()?;
        let reset_at = DateTime::from_timestamp(reset_epoch, 0)?;
        Some(Self::new(remaining, reset_at))
    }

    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    #[must_use]
    pub const fn reset_at(&self) -> DateTime<Utc> {
        self.reset_at
    }

    /// Pause required before the next request, measured from `now`.
    #[must_use]
    pub fn delay_at(&self, now: DateTime<Utc>) -> Duration {
        if self.remaining > 1 {
            return Duration::ZERO;
        }
        // A reset in the past yields a negative span, which to_std rejects
        (self.reset_at - now + TimeDelta::seconds(1))
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Delay demanded by a response's headers, against the current clock.
#[must_use]
pub fn observe(headers: &HeaderMap) -> Duration {
    RateLimit::from_headers(headers).map_or(Duration::ZERO, |limit| {
        debug!(remaining = limit.remaining(), reset_at = %limit.reset_at(), "rate limit");
        limit.delay_at(Utc::now())
    })
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim)
}
