use crate::candidate::{CommandCandidate, RenderMode, resolve_candidates};
use crate::error::{Attempt, FailureReason, GatewayError};
use crate::process::{self, Captured};
use crate::RenderBackend;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

/// A successful invocation, along with the failures that preceded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<T> {
    pub value: T,
    /// Label of the candidate that succeeded.
    pub label: String,
    /// Candidates tried before the successful one. All of them were "not found".
    pub failed_attempts: Vec<Attempt>,
}

#[derive(Debug, Clone)]
enum Candidates {
    /// Resolved fresh from the override and the built-in defaults on every call.
    Configured { override_command: Option<String> },
    /// An explicit list, used as given.
    Fixed(Vec<CommandCandidate>),
}

/// Invokes the external renderer through an ordered list of command candidates.
#[derive(Debug, Clone)]
pub struct ExternalRenderer {
    candidates: Candidates,
    timeout: Option<Duration>,
}

impl ExternalRenderer {
    /// A renderer using the override command line (if any) followed by the
    /// built-in defaults. `timeout` bounds each subprocess; `None` waits forever.
    pub fn new(override_command: Option<String>, timeout: Option<Duration>) -> Self {
        Self {
            candidates: Candidates::Configured { override_command },
            timeout,
        }
    }

    /// A renderer restricted to exactly these candidates.
    pub fn with_candidates(candidates: Vec<CommandCandidate>, timeout: Option<Duration>) -> Self {
        Self {
            candidates: Candidates::Fixed(candidates),
            timeout,
        }
    }

    /// The candidates an invocation made now would try, in order.
    pub fn candidates(&self) -> Vec<CommandCandidate> {
        match &self.candidates {
            Candidates::Configured { override_command } => {
                resolve_candidates(override_command.as_deref())
            }
            Candidates::Fixed(list) => list.clone(),
        }
    }

    /// Renders `input` into the artifact at `output`.
    pub fn produce_artifact(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<Invocation<()>, GatewayError> {
        let mode = RenderMode::Artifact {
            output: output.to_path_buf(),
        };
        self.invoke(input, &mode, |_| Ok(()))
    }

    /// Asks the renderer for the page count of `input`.
    pub fn count_pages(&self, input: &Path) -> Result<Invocation<usize>, GatewayError> {
        self.invoke(input, &RenderMode::PageCount, |captured| {
            parse_page_count(&captured.stdout)
        })
    }

    fn invoke<T>(
        &self,
        input: &Path,
        mode: &RenderMode,
        accept: impl Fn(&Captured) -> Result<T, FailureReason>,
    ) -> Result<Invocation<T>, GatewayError> {
        let candidates = self.candidates();
        if candidates.is_empty() {
            return Err(GatewayError::NoCandidates { mode: mode.name() });
        }

        let mode_args = mode.arguments(input);
        let mut attempts = Vec::new();

        for candidate in candidates {
            let mut args: Vec<OsString> = candidate.args.iter().map(OsString::from).collect();
            args.extend(mode_args.iter().cloned());
            debug!("[GATEWAY] Trying `{}` in {} mode.", candidate.label, mode.name());

            let result = process::run(&candidate.program, &args, self.timeout)
                .and_then(|captured| accept(&captured));

            match result {
                Ok(value) => {
                    info!("[GATEWAY] `{}` succeeded in {} mode.", candidate.label, mode.name());
                    return Ok(Invocation {
                        value,
                        label: candidate.label,
                        failed_attempts: attempts,
                    });
                }
                Err(reason) => {
                    let not_found = reason.is_not_found();
                    debug!("[GATEWAY] `{}` failed: {}", candidate.label, reason);
                    attempts.push(Attempt {
                        label: candidate.label,
                        reason,
                    });
                    if !not_found {
                        break;
                    }
                }
            }
        }

        Err(GatewayError::Exhausted {
            mode: mode.name(),
            attempts,
        })
    }
}

impl RenderBackend for ExternalRenderer {
    fn probe_page_count(&self, input: &Path) -> Option<usize> {
        match self.count_pages(input) {
            Ok(invocation) => Some(invocation.value),
            Err(e) => {
                warn!("Page count unavailable, continuing without it. {}", e);
                None
            }
        }
    }

    fn render_pdf(&self, input: &Path, output: &Path) -> Result<(), GatewayError> {
        self.produce_artifact(input, output).map(|_| ())
    }

    fn name(&self) -> &'static str {
        "ExternalRenderer"
    }
}

/// The page-count tool must print exactly one positive integer.
fn parse_page_count(stdout: &str) -> Result<usize, FailureReason> {
    let trimmed = stdout.trim();
    match trimmed.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(FailureReason::InvalidOutput(trimmed.to_string())),
    }
}
