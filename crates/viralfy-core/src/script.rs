//! Invocation of the external workflow scripts.
//!
//! Scripts live under `<scripts-dir>/<family>/<name>.<ext>`: `bash/*.sh` on
//! POSIX hosts, `powershell/*.ps1` on Windows. Each script prints a JSON
//! [`ScriptResponse`] on stdout.
//!
//! # Interpreting output
//! - exit 0, empty stdout: synthetic `success`.
//! - exit 0, stdout that is not an envelope: `success` with the raw text as message.
//! - non-zero exit whose stdout is an envelope with `status: "error"`: that envelope.
//! - any other non-zero exit: [`ScriptFailure::Exit`].
//!
//! Stderr from a successful run is logged as a warning.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wait_timeout::ChildExt;

use crate::error::{Result, ScriptFailure, ViralfyError};
use crate::progress::NewsletterProgress;

/// Ceiling on captured stdout.
pub const MAX_STDOUT_BYTES: usize = 10 * 1024 * 1024;

/// Environment variable carrying the CLI version into every script.
pub const VERSION_ENV: &str = "VIRALFY_VERSION";

// ---------------------------------------------------------------------------
// ScriptFamily
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFamily {
    Bash,
    PowerShell,
}

impl ScriptFamily {
    /// The family for the host this binary was built for.
    pub fn detect() -> Self {
        if cfg!(windows) {
            ScriptFamily::PowerShell
        } else {
            ScriptFamily::Bash
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            ScriptFamily::Bash => "bash",
            ScriptFamily::PowerShell => "powershell",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ScriptFamily::Bash => "sh",
            ScriptFamily::PowerShell => "ps1",
        }
    }

    fn interpreters(self) -> &'static [&'static str] {
        match self {
            ScriptFamily::Bash => &["bash"],
            ScriptFamily::PowerShell => &["powershell", "pwsh"],
        }
    }

    fn interpreter_args(self) -> &'static [&'static str] {
        match self {
            ScriptFamily::Bash => &[],
            ScriptFamily::PowerShell => &["-ExecutionPolicy", "Bypass", "-File"],
        }
    }

    fn resolve_interpreter(self) -> Option<PathBuf> {
        self.interpreters()
            .iter()
            .find_map(|name| which::which(name).ok())
    }
}

// ---------------------------------------------------------------------------
// ScriptResponse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStatus {
    Success,
    Error,
}

/// Tells the command layer which branch to take. Absent means no branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptAction {
    Create,
    Update,
    Resume,
}

/// The JSON envelope every script prints on stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub status: ScriptStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ScriptAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ScriptResponse {
    pub fn success() -> Self {
        Self {
            status: ScriptStatus::Success,
            action: None,
            message: None,
            data: None,
        }
    }

    /// Parse `stdout` as an envelope. `None` means it is not one.
    pub fn parse(stdout: &str) -> Option<Self> {
        serde_json::from_str(stdout.trim()).ok()
    }

    /// Pick a self-reported error out of a failed run's stdout. Only
    /// `status` has to be well-formed; unknown `action` values and
    /// mistyped optional fields are dropped.
    pub fn parse_error(stdout: &str) -> Option<Self> {
        if let Some(response) = Self::parse(stdout) {
            return response.is_error().then_some(response);
        }
        let serde_json::Value::Object(mut obj) =
            serde_json::from_str::<serde_json::Value>(stdout.trim()).ok()?
        else {
            return None;
        };
        if obj.get("status").and_then(serde_json::Value::as_str) != Some("error") {
            return None;
        }
        Some(Self {
            status: ScriptStatus::Error,
            action: obj
                .remove("action")
                .and_then(|v| serde_json::from_value(v).ok()),
            message: obj
                .remove("message")
                .and_then(|v| v.as_str().map(str::to_string)),
            data: match obj.remove("data") {
                Some(serde_json::Value::Object(map)) => Some(map),
                _ => None,
            },
        })
    }

    /// Interpret the stdout of a successful run. Never fails.
    pub fn from_stdout(stdout: &str) -> Self {
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            return Self::success();
        }
        Self::parse(trimmed).unwrap_or_else(|| Self {
            message: Some(trimmed.to_string()),
            ..Self::success()
        })
    }

    pub fn is_success(&self) -> bool {
        self.status == ScriptStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == ScriptStatus::Error
    }

    /// Deserialize `data.<key>` into `T`, if present and well-formed.
    pub fn data_field<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.data.as_ref()?.get(key)?.clone();
        serde_json::from_value(value).ok()
    }

    /// The progress record a `resume` response carries under `data.progress`.
    pub fn progress(&self) -> Option<NewsletterProgress> {
        self.data_field("progress")
    }
}

// ---------------------------------------------------------------------------
// ScriptRunner
// ---------------------------------------------------------------------------

/// Runs scripts by logical name. Construct once per process and pass it to
/// whichever command needs it.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    scripts_dir: PathBuf,
    family: ScriptFamily,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    env: Vec<(String, String)>,
    max_stdout: usize,
}

impl ScriptRunner {
    pub fn new(scripts_dir: impl Into<PathBuf>) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
            family: ScriptFamily::detect(),
            working_dir: None,
            timeout: None,
            env: Vec::new(),
            max_stdout: MAX_STDOUT_BYTES,
        }
    }

    pub fn with_family(mut self, family: ScriptFamily) -> Self {
        self.family = family;
        self
    }

    /// Run scripts in `dir` instead of the caller's current directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill scripts that run longer than `timeout`. Unbounded by default.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_max_stdout(mut self, bytes: usize) -> Self {
        self.max_stdout = bytes;
        self
    }

    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }

    pub fn family(&self) -> ScriptFamily {
        self.family
    }

    pub fn script_path(&self, name: &str) -> PathBuf {
        self.scripts_dir
            .join(self.family.dir_name())
            .join(format!("{name}.{}", self.family.extension()))
    }

    pub fn script_exists(&self, name: &str) -> bool {
        self.script_path(name).is_file()
    }

    /// The invocation as a shell would see it, with whitespace-bearing
    /// arguments double-quoted.
    pub fn command_line(&self, script: &Path, args: &[&str]) -> String {
        let mut parts: Vec<String> = vec![self.family.interpreters()[0].to_string()];
        parts.extend(self.family.interpreter_args().iter().map(|a| a.to_string()));
        parts.push(quote_arg(&script.to_string_lossy()));
        parts.extend(args.iter().map(|a| quote_arg(a)));
        parts.join(" ")
    }

    /// Run script `name` with `args` and interpret its output.
    pub fn execute(&self, name: &str, args: &[&str]) -> Result<ScriptResponse> {
        let path = self.script_path(name);
        if !path.is_file() {
            return Err(ViralfyError::script(
                name,
                ScriptFailure::NotFound { path },
            ));
        }

        let command_line = self.command_line(&path, args);
        tracing::debug!(script = name, command = %command_line, "running script");

        let output = self.run(name, &path, args)?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            let warning = stderr.trim();
            if !warning.is_empty() {
                tracing::warn!(script = name, "script warning: {warning}");
            }
            return Ok(ScriptResponse::from_stdout(&stdout));
        }

        // A script that reports its own error in JSON wins over the exit code.
        if let Some(response) = ScriptResponse::parse_error(&stdout) {
            return Ok(response);
        }

        let code = output.status.code();
        let message = match code {
            Some(c) => format!("command failed with exit code {c}: {command_line}"),
            None => format!("command terminated by signal: {command_line}"),
        };
        Err(ViralfyError::script(
            name,
            ScriptFailure::Exit {
                code,
                stdout,
                stderr,
                message,
            },
        ))
    }

    fn run(&self, name: &str, path: &Path, args: &[&str]) -> Result<RawOutput> {
        let launch = |msg: String| ViralfyError::script(name, ScriptFailure::Launch(msg));

        let interpreter = self.family.resolve_interpreter().ok_or_else(|| {
            launch(format!(
                "{} not found on PATH",
                self.family.interpreters().join(" or ")
            ))
        })?;

        // The child may run elsewhere, so a relative scripts dir must not leak into it.
        let path = std::path::absolute(path).map_err(|e| launch(e.to_string()))?;

        let mut cmd = Command::new(interpreter);
        cmd.args(self.family.interpreter_args()).arg(&path).args(args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd.env(VERSION_ENV, env!("CARGO_PKG_VERSION"));
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| launch(e.to_string()))?;

        // Drain both pipes concurrently so a chatty stderr cannot stall stdout.
        let limit = self.max_stdout;
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let stdout_reader = thread::spawn(move || read_capped(stdout_pipe, limit));
        let stderr_reader = thread::spawn(move || read_capped(stderr_pipe, limit));

        let status = self.wait(&mut child, name)?;

        let stdout = join_reader(stdout_reader).map_err(launch)?;
        let stderr = join_reader(stderr_reader).map_err(launch)?;

        if stdout.overflowed {
            return Err(ViralfyError::script(
                name,
                ScriptFailure::OutputTooLarge { limit },
            ));
        }

        Ok(RawOutput {
            status,
            stdout: stdout.bytes,
            stderr: stderr.bytes,
        })
    }

    fn wait(&self, child: &mut Child, name: &str) -> Result<ExitStatus> {
        let launch = |e: std::io::Error| ViralfyError::script(name, ScriptFailure::Launch(e.to_string()));

        let Some(timeout) = self.timeout else {
            return child.wait().map_err(launch);
        };

        match child.wait_timeout(timeout).map_err(launch)? {
            Some(status) => Ok(status),
            None => {
                tracing::warn!(script = name, timeout_secs = timeout.as_secs(), "script timed out, killing");
                child.kill().map_err(launch)?;
                child.wait().map_err(launch)?;
                Err(ViralfyError::script(
                    name,
                    ScriptFailure::TimedOut {
                        seconds: timeout.as_secs(),
                    },
                ))
            }
        }
    }
}

/// Wrap an argument in double quotes when it is empty or contains whitespace.
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
        format!("\"{arg}\"")
    } else {
        arg.to_string()
    }
}

struct RawOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

struct Captured {
    bytes: Vec<u8>,
    overflowed: bool,
}

/// Read up to `limit` bytes, then keep draining (and discarding) so the
/// child never blocks on a full pipe.
fn read_capped<R: Read>(pipe: Option<R>, limit: usize) -> std::io::Result<Captured> {
    let Some(mut pipe) = pipe else {
        return Ok(Captured {
            bytes: Vec::new(),
            overflowed: false,
        });
    };
    let mut bytes = Vec::new();
    (&mut pipe)
        .take(limit as u64 + 1)
        .read_to_end(&mut bytes)?;
    let overflowed = bytes.len() > limit;
    if overflowed {
        bytes.truncate(limit);
        std::io::copy(&mut pipe, &mut std::io::sink())?;
    }
    Ok(Captured { bytes, overflowed })
}

fn join_reader(
    handle: thread::JoinHandle<std::io::Result<Captured>>,
) -> std::result::Result<Captured, String> {
    match handle.join() {
        Ok(Ok(captured)) => Ok(captured),
        Ok(Err(e)) => Err(format!("failed to read script output: {e}")),
        Err(_) => Err("output reader thread panicked".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
