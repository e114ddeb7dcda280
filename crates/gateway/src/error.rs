use itertools::Itertools;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Why a single command candidate failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    #[error("executable not found")]
    NotFound,

    #[error("failed to start: {0}")]
    Spawn(String),

    #[error("{}", describe_exit(.code, .stderr))]
    Exit { code: Option<i32>, stderr: String },

    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error("expected a page count on stdout, got {0:?}")]
    InvalidOutput(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl FailureReason {
    /// Only a missing executable lets the gateway fall through to the next candidate.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FailureReason::NotFound)
    }

    /// The process exit status, when the process ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            FailureReason::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_exit(code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by signal".to_string(),
    };
    if stderr.is_empty() {
        status
    } else {
        format!("{status}: {stderr}")
    }
}

/// A recorded failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub label: String,
    pub reason: FailureReason,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.reason)
    }
}

#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    #[error("No renderer command candidates are configured for {mode} mode")]
    NoCandidates { mode: &'static str },

    #[error(
        "Renderer failed in {mode} mode after {} attempt(s):\n{}",
        .attempts.len(),
        list_attempts(.attempts)
    )]
    Exhausted {
        mode: &'static str,
        attempts: Vec<Attempt>,
    },
}

fn list_attempts(attempts: &[Attempt]) -> String {
    attempts.iter().map(|a| format!("  - {a}")).join("\n")
}

impl GatewayError {
    /// Every attempt made before giving up.
    pub fn attempts(&self) -> &[Attempt] {
        match self {
            GatewayError::NoCandidates { .. } => &[],
            GatewayError::Exhausted { attempts, .. } => attempts,
        }
    }
}
