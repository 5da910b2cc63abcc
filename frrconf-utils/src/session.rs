//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use std::io::Write;
use std::process::Command;

use derive_new::new;
use tracing::{debug, debug_span};

use crate::error::{CommandFailure, DaemonError};

// Last line of the banner preceding `show running-config` output.
const BANNER_END: &str = "Current configuration:";

// One exclusive configuration transaction against a daemon instance.
//
// Sessions are bound to a single daemon and are not meant to be shared
// between concurrent reconciliations.
pub trait DaemonSession {
    // Name of the daemon this session is bound to (e.g. "isisd").
    fn daemon(&self) -> &str;

    // Loads the daemon's currently active configuration.
    fn load_snapshot(&mut self) -> Result<String, DaemonError>;

    // Replaces the daemon's whole configuration with the given document.
    fn commit(&mut self, config: &str) -> Result<(), DaemonError>;
}

// Session backed by the FRR command-line tools.
//
// Snapshots are taken with `vtysh` and commits go through `frr-reload.py`,
// which computes and applies the difference against the running
// configuration of the daemon.
#[derive(Debug, new)]
pub struct VtyshSession {
    daemon: String,
    vtysh_path: String,
    reload_path: String,
}

// ===== impl VtyshSession =====

impl VtyshSession {
    fn run(&self, command: &mut Command) -> Result<String, DaemonError> {
        let command_str = format!("{command:?}");
        debug_span!("daemon", name = %self.daemon).in_scope(|| {
            debug!(command = %command_str, "executing command");
        });

        let output = command
            .output()
            .map_err(|error| DaemonError::Spawn(command_str.clone(), error))?;
        if !output.status.success() {
            return Err(DaemonError::CommandFailed(CommandFailure {
                command: command_str,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| DaemonError::InvalidOutput(command_str))
    }
}

impl DaemonSession for VtyshSession {
    fn daemon(&self) -> &str {
        &self.daemon
    }

    fn load_snapshot(&mut self) -> Result<String, DaemonError> {
        let output = self.run(
            Command::new(&self.vtysh_path)
                .arg("-d")
                .arg(&self.daemon)
                .arg("-c")
                .arg("show running-config"),
        )?;
        Ok(strip_banner(&output))
    }

    fn commit(&mut self, config: &str) -> Result<(), DaemonError> {
        // Stage the new configuration in a temporary file. The file is
        // removed once it goes out of scope.
        let mut file = tempfile::Builder::new()
            .prefix("frrconf-")
            .suffix(".conf")
            .tempfile()
            .map_err(DaemonError::TempFile)?;
        file.write_all(config.as_bytes())
            .and_then(|_| file.flush())
            .map_err(DaemonError::TempFile)?;

        self.run(
            Command::new(&self.reload_path)
                .arg("--reload")
                .arg("--stdout")
                .arg("--daemon")
                .arg(&self.daemon)
                .arg(file.path()),
        )?;

        Ok(())
    }
}

// ===== helper functions =====

// Removes the banner vtysh prints ahead of the running configuration, along
// with carriage returns. The banner isn't valid configuration and must never
// be fed back to the daemon.
fn strip_banner(output: &str) -> String {
    let output = output.replace('\r', "");
    let mut lines = output.lines();
    if !lines.any(|line| line.trim_end() == BANNER_END) {
        return output;
    }

    let mut config = lines.collect::<Vec<_>>().join("\n");
    if !config.is_empty() && output.ends_with('\n') {
        config.push('\n');
    }
    config
}

// ===== testing =====

#[cfg(any(test, feature = "testing"))]
pub mod stub {
    use std::collections::VecDeque;

    use super::*;

    // In-memory session that records every committed document.
    //
    // Committed documents become the snapshot returned by subsequent loads,
    // unless a snapshot was explicitly queued.
    #[derive(Debug, Default)]
    pub struct RecordingSession {
        pub daemon: String,
        pub running: String,
        pub commits: Vec<String>,
        pub loads: usize,
        pub snapshots: VecDeque<String>,
        pub fail_load: bool,
        pub fail_commit_at: Option<usize>,
    }

    impl RecordingSession {
        pub fn new(daemon: &str, running: &str) -> RecordingSession {
            RecordingSession {
                daemon: daemon.to_owned(),
                running: running.to_owned(),
                ..Default::default()
            }
        }

        fn failure(&self, command: &str) -> DaemonError {
            DaemonError::CommandFailed(CommandFailure {
                command: command.to_owned(),
                status: Some(1),
                stderr: "connection refused".to_owned(),
            })
        }
    }

    impl DaemonSession for RecordingSession {
        fn daemon(&self) -> &str {
            &self.daemon
        }

        fn load_snapshot(&mut self) -> Result<String, DaemonError> {
            if self.fail_load {
                return Err(self.failure("load"));
            }
            self.loads += 1;
            Ok(self
                .snapshots
                .pop_front()
                .unwrap_or_else(|| self.running.clone()))
        }

        fn commit(&mut self, config: &str) -> Result<(), DaemonError> {
            if self.fail_commit_at == Some(self.commits.len()) {
                return Err(self.failure("commit"));
            }
            self.commits.push(config.to_owned());
            self.running = config.to_owned();
            Ok(())
        }
    }
}

// ===== unit tests =====
