// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hosting API access.
//!
//! ```text
//! ApiClient (basic auth, Accept v3, User-Agent)
//!     |
//!     +-- repositories() --> Pager<Repository>   /user/repos?page=1
//!     +-- issues(repo)   --> Pager<Issue>        /repos/<full_name>/issues?state=all&direction=asc
//!     +-- comments(issue)--> Pager<Value>        <comments_url>
//!
//! Pager::next_page
//!     fetch_page --> link::next_link     (cursor)
//!                --> rate_limit::observe (delay) --> tokio::time::sleep
//! ```

pub mod client;
pub mod link;
pub mod pager;
pub mod rate_limit;

pub use client::{ApiClient, DEFAULT_API_URL, Page, default_user_agent};
pub use pager::Pager;
pub use rate_limit::RateLimit;
