// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and output streaming.
//!
//! ```text
//! run()
//!   build_command()  args, env, stdio
//!   spawn()          --> SpawnFailed
//!   reader tasks     stdout/stderr lines --> trace! / String
//!   wait()
//!   exit_code != 0   --> NonZeroExit
//!   --> ProcessOutput
//! ```

use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::{BackupResult, ProcessError};

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    ///
    /// Non-UTF-8 arguments are shown lossily here only.
    fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            let arg = arg.to_string_lossy();
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if:
    /// - Spawning the child process fails.
    /// - Waiting on the child fails.
    /// - The process exits with a non-zero status.
    pub async fn run(self) -> BackupResult<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let mut child = command.spawn().map_err(|source| ProcessError::SpawnFailed {
            command: cmd_line.clone(),
            source,
        })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let stdout_handle = child
            .stdout
            .take()
            .map(|out| spawn_reader(out, self.stdout_flags(), name.clone(), "stdout"));
        let stderr_handle = child
            .stderr
            .take()
            .map(|err| spawn_reader(err, self.stderr_flags(), name.clone(), "stderr"));

        let status = child
            .wait()
            .await
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        let stdout = join_reader(stdout_handle).await;
        let stderr = join_reader(stderr_handle).await;
        let output = ProcessOutput::new(status.code().unwrap_or(-1), stdout, stderr);

        if !output.success() {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: cmd_line,
                code: output.exit_code(),
            }
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());

        for (key, value) in self.env_overrides() {
            command.env(key, value);
        }

        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command.kill_on_drop(true);

        command
    }
}

/// Reads a child stream line by line on its own task.
fn spawn_reader<R>(
    reader: R,
    flags: StreamFlags,
    process_name: String,
    stream_name: &'static str,
) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut kept = String::new();
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                trace!(process = %process_name, stream = %stream_name, line = %line, "output");
            }
            if flags.contains(StreamFlags::KEEP_IN_STRING) {
                if !kept.is_empty() {
                    kept.push('\n');
                }
                kept.push_str(&line);
            }
        }
        kept
    })
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}
