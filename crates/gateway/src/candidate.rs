use itertools::Itertools;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// The default renderer executable.
pub const DEFAULT_PROGRAM: &str = "folio-pdf";

/// Interpreter entry points tried after the default executable.
pub const FALLBACK_INVOCATIONS: &[(&str, &[&str])] = &[
    ("python3", &["-m", "folio_pdf"]),
    ("python", &["-m", "folio_pdf"]),
];

/// What the renderer is asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    /// Write the final artifact to `output`.
    Artifact { output: PathBuf },
    /// Print the page count of the rendered input on stdout.
    PageCount,
}

impl RenderMode {
    /// Arguments appended after a candidate's own arguments.
    pub fn arguments(&self, input: &Path) -> Vec<OsString> {
        match self {
            RenderMode::Artifact { output } => {
                vec![input.as_os_str().to_owned(), output.as_os_str().to_owned()]
            }
            RenderMode::PageCount => vec!["--page-count".into(), input.as_os_str().to_owned()],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Artifact { .. } => "artifact",
            RenderMode::PageCount => "page-count",
        }
    }
}

/// One way of invoking the external renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCandidate {
    pub program: String,
    pub args: Vec<String>,
    pub label: String,
}

impl CommandCandidate {
    /// Creates a candidate labelled with its own command line.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        let program = program.into();
        let label = std::iter::once(program.as_str())
            .chain(args.iter().map(String::as_str))
            .join(" ");
        Self {
            program,
            args,
            label,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Parses an override command line: the first whitespace-separated word is
    /// the program, the rest are leading arguments. Blank input yields `None`.
    pub fn from_override(command_line: &str) -> Option<Self> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words.next()?;
        let candidate = Self::new(program, words.collect());
        let label = format!("override `{}`", candidate.label);
        Some(candidate.with_label(label))
    }
}

impl fmt::Display for CommandCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Builds the ordered candidate list: override (if any), default, fallbacks.
pub fn resolve_candidates(override_command: Option<&str>) -> Vec<CommandCandidate> {
    let mut candidates = Vec::with_capacity(2 + FALLBACK_INVOCATIONS.len());
    if let Some(candidate) = override_command.and_then(CommandCandidate::from_override) {
        candidates.push(candidate);
    }
    candidates.push(CommandCandidate::new(DEFAULT_PROGRAM, Vec::new()));
    for (program, args) in FALLBACK_INVOCATIONS {
        candidates.push(CommandCandidate::new(
            *program,
            args.iter().map(|a| a.to_string()).collect(),
        ));
    }
    candidates
}
