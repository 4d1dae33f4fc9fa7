// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! Cli --> load_config --> build_log_config
//!     --> run_backup_command --> Orchestrator::run
//! ```

pub mod backup;
