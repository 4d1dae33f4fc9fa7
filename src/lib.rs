// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)         cmd (handlers)
//!                |                     |
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, CLI layers   |
//!              '------------+--------------'
//!                           |
//!                           v
//!                        backup
//!            orchestrator -> pipeline
//!             /         |          \
//!            v          v           v
//!          api        mirror      archive
//!     pager/link/    (git)        (tar)
//!     rate_limit
//!
//!   +-----------------------------------------+
//!   |  core   process execution               |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, auth,     |
//!   |               model                     |
//!   +-----------------------------------------+
//! ```

pub mod api;
pub mod auth;
pub mod backup;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod model;
