//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::warn;

// Errors talking to a routing daemon.
#[derive(Debug)]
pub enum DaemonError {
    // Failed to spawn a helper command.
    Spawn(String, std::io::Error),
    // A helper command exited with a non-zero status.
    CommandFailed(CommandFailure),
    // Failed to stage the configuration for a reload.
    TempFile(std::io::Error),
    // The daemon returned something other than UTF-8 text.
    InvalidOutput(String),
}

#[derive(Debug)]
pub struct CommandFailure {
    pub command: String,
    pub status: Option<i32>,
    pub stderr: String,
}

// Errors raised by a template renderer.
#[derive(Debug)]
pub enum RenderError {
    TemplateNotFound(String),
    MissingField(String, String),
    Format(std::fmt::Error),
}

// ===== impl DaemonError =====

impl DaemonError {
    pub fn log(&self) {
        match self {
            DaemonError::Spawn(command, error) => {
                warn!(%command, %error, "{}", self);
            }
            DaemonError::CommandFailed(failure) => {
                warn!(
                    command = %failure.command,
                    status = ?failure.status,
                    stderr = %failure.stderr.trim_end(),
                    "{}", self
                );
            }
            DaemonError::TempFile(error) => {
                warn!(%error, "{}", self);
            }
            DaemonError::InvalidOutput(command) => {
                warn!(%command, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for DaemonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DaemonError::Spawn(command, ..) => {
                write!(f, "failed to execute \"{command}\"")
            }
            DaemonError::CommandFailed(failure) => {
                write!(f, "\"{}\" failed", failure.command)?;
                if let Some(status) = failure.status {
                    write!(f, " with exit status {status}")?;
                }
                let stderr = failure.stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                Ok(())
            }
            DaemonError::TempFile(..) => {
                write!(f, "failed to stage configuration file")
            }
            DaemonError::InvalidOutput(command) => {
                write!(f, "\"{command}\" returned invalid UTF-8 output")
            }
        }
    }
}

impl std::error::Error for DaemonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DaemonError::Spawn(_, error) | DaemonError::TempFile(error) => {
                Some(error)
            }
            _ => None,
        }
    }
}

// ===== impl RenderError =====

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::TemplateNotFound(name) => {
                write!(f, "template \"{name}\" not found")
            }
            RenderError::MissingField(template, field) => {
                write!(
                    f,
                    "template \"{template}\" requires field \"{field}\""
                )
            }
            RenderError::Format(..) => {
                write!(f, "failed to format template output")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Format(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::fmt::Error> for RenderError {
    fn from(error: std::fmt::Error) -> RenderError {
        RenderError::Format(error)
    }
}

// ===== global functions =====

// Formats an error along with its chain of sources.
pub fn with_source<E: std::error::Error>(error: E) -> String {
    if let Some(source) = error.source() {
        format!("{} ({})", error, with_source(source))
    } else {
        error.to_string()
    }
}
