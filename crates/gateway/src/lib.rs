//! Gateway to the external document renderer.
//!
//! The renderer is an out-of-process tool that either converts an HTML file to
//! a PDF artifact or reports how many pages that artifact would have. It can be
//! reached through several command lines, tried in order:
//!
//! 1. an override command line supplied by configuration,
//! 2. the default `folio-pdf` executable,
//! 3. interpreter entry points (`python3 -m folio_pdf`, `python -m folio_pdf`).
//!
//! A candidate that fails because its executable does not exist is recorded and
//! the next one is tried. Any other failure stops the search. When nothing
//! succeeds the caller gets every recorded attempt in [`GatewayError::Exhausted`].
//!
//! ## Usage
//!
//! ```ignore
//! use folio_gateway::{ExternalRenderer, RenderBackend};
//!
//! let renderer = ExternalRenderer::new(None, Some(Duration::from_secs(60)));
//! let pages = renderer.probe_page_count(Path::new("dist/statement.html"));
//! renderer.render_pdf(Path::new("dist/statement.html"), Path::new("dist/statement.pdf"))?;
//! ```

mod candidate;
mod error;
mod process;
mod renderer;

pub use candidate::{
    CommandCandidate, DEFAULT_PROGRAM, FALLBACK_INVOCATIONS, RenderMode, resolve_candidates,
};
pub use error::{Attempt, FailureReason, GatewayError};
pub use renderer::{ExternalRenderer, Invocation};

use std::path::Path;

/// The operations the pagination controller and the pipeline need from a
/// document renderer.
pub trait RenderBackend {
    /// Best-effort page count of the rendered `input`. `None` means unknown.
    fn probe_page_count(&self, input: &Path) -> Option<usize>;

    /// Produces the final artifact for `input` at `output`.
    fn render_pdf(&self, input: &Path, output: &Path) -> Result<(), GatewayError>;

    /// Returns a human-readable name for this backend (for logging/debugging).
    fn name(&self) -> &'static str;
}
