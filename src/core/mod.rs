// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for external process management.
//!
//! ```text
//!        core
//!         |
//!         v
//!      process
//!         |
//!  ProcessBuilder --> ProcessOutput
//!  (git clone --mirror, tar -cJf)
//! ```

pub mod process;
