use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViralfyError {
    #[error("project not initialized: run 'viralfy init' first")]
    NotInitialized,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("script execution failed: {script}: {failure}")]
    ScriptExecution {
        script: String,
        failure: ScriptFailure,
    },

    #[error("invalid id '{0}': must be alphanumeric with '.', '_' or '-'")]
    InvalidId(String),

    #[error("invalid {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Why an external script invocation failed.
#[derive(Debug, Error)]
pub enum ScriptFailure {
    #[error("script file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to launch: {0}")]
    Launch(String),

    #[error("{message}")]
    Exit {
        code: Option<i32>,
        stdout: String,
        stderr: String,
        message: String,
    },

    #[error("stdout exceeded {limit} bytes")]
    OutputTooLarge { limit: usize },

    #[error("timed out after {seconds}s")]
    TimedOut { seconds: u64 },
}

impl ViralfyError {
    pub(crate) fn script(script: &str, failure: ScriptFailure) -> Self {
        ViralfyError::ScriptExecution {
            script: script.to_string(),
            failure,
        }
    }

    /// Exit code of a script that ran to completion with a failing status.
    pub fn script_exit_code(&self) -> Option<i32> {
        match self {
            ViralfyError::ScriptExecution {
                failure: ScriptFailure::Exit { code, .. },
                ..
            } => *code,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ViralfyError>;
