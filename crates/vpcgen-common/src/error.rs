//! Error types for vpcgen operations.
//!
//! Everything here is a hard failure: it aborts the run with a non-zero
//! exit status. Spec validation failures have their own type in the
//! `vpcgen` crate, and provisioning problems are downgraded to warnings
//! by the provisioner before they reach the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vpcgen operations.
pub type VpcgenResult<T> = Result<T, VpcgenError>;

/// Errors that can occur while talking to the kernel or writing output.
#[derive(Debug, Error)]
pub enum VpcgenError {
    /// Failed to execute a shell command (spawn error).
    #[error("Failed to execute shell command '{command}': {source}")]
    ShellExec {
        /// The command that failed to execute.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Shell command returned non-zero exit code.
    #[error("Shell command failed: '{command}' (exit code {exit_code}): {stderr}")]
    ShellCommandFailed {
        /// The command that failed.
        command: String,
        /// The exit code.
        exit_code: i32,
        /// What the command wrote to stderr.
        stderr: String,
    },

    /// Failed to write the generated configuration.
    #[error("Failed to write configuration to {}: {source}", .path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl VpcgenError {
    /// Creates a write error for the given path.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the failure happened while talking to the kernel
    /// through the `ip` command.
    pub fn is_shell(&self) -> bool {
        matches!(
            self,
            VpcgenError::ShellExec { .. } | VpcgenError::ShellCommandFailed { .. }
        )
    }
}
