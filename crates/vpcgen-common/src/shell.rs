//! Runs `ip` commands through the shell.
//!
//! Device names come from the command line, so callers pass every
//! interpolated value through [`shellquote`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{VpcgenError, VpcgenResult};

pub const IP_CMD: &str = "/sbin/ip";

/// Characters still live inside double quotes: `$`, backtick, `"`, `\` and newline.
static DQUOTE_SPECIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([$`"\\\n])"#).expect("Invalid regex pattern"));

/// Wraps `s` in double quotes, backslash-escaping anything the shell would
/// still expand there.
///
/// ```
/// use vpcgen_common::shell::shellquote;
///
/// assert_eq!(shellquote("eth0.10"), "\"eth0.10\"");
/// assert_eq!(shellquote("a$b"), "\"a\\$b\"");
/// ```
pub fn shellquote(s: &str) -> String {
    format!("\"{}\"", DQUOTE_SPECIAL_RE.replace_all(s, r"\$1"))
}

/// Exit status and stderr of a finished command. Stdout is discarded.
#[derive(Debug, Clone)]
pub struct ExecResult {
    pub exit_code: i32,
    pub stderr: String,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs `cmd` under `/bin/sh -c` and reports how it exited.
///
/// `Err` means the shell itself could not be started; a command that ran
/// and failed is still `Ok`. A process killed by a signal reports -1.
pub async fn exec(cmd: &str) -> VpcgenResult<ExecResult> {
    tracing::debug!(command = %cmd, "Executing shell command");

    let output = Command::new("/bin/sh")
        .arg("-c")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| VpcgenError::ShellExec {
            command: cmd.to_string(),
            source,
        })?;

    let result = ExecResult {
        exit_code: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    };
    if !result.success() {
        tracing::debug!(
            command = %cmd,
            exit_code = result.exit_code,
            stderr = %result.stderr,
            "Command exited non-zero"
        );
    }
    Ok(result)
}

/// Like [`exec`], but a non-zero exit becomes
/// [`VpcgenError::ShellCommandFailed`] carrying the command's stderr.
pub async fn exec_or_fail(cmd: &str) -> VpcgenResult<()> {
    let result = exec(cmd).await?;
    if result.success() {
        return Ok(());
    }
    Err(VpcgenError::ShellCommandFailed {
        command: cmd.to_string(),
        exit_code: result.exit_code,
        stderr: result.stderr,
    })
}
