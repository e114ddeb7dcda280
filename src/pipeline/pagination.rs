//! The two-pass pagination feedback loop.
//!
//! The document is rendered once with a provisional [`RenderContext`] and
//! written to its final location, because the page-count probe reads a file.
//! The probe's answer (or its absence) decides the final context, and the
//! document is rendered again. The file is only rewritten when the second
//! render differs from the first.
//!
//! States advance strictly in order:
//!
//! ```text
//! Initial -> ProbeRendered -> CountKnown | CountUnknown -> FinalRendered
//! ```
//!
//! Writes are not transactional. If the process dies between the provisional
//! write and the final write, the provisional rendering stays on disk until
//! the next run regenerates it.

use super::context::RenderContext;
use crate::error::PipelineError;
use folio_gateway::RenderBackend;
use folio_template_core::unresolved_placeholders;
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaginationState {
    Initial,
    ProbeRendered,
    CountKnown,
    CountUnknown,
    FinalRendered,
}

/// What the feedback loop ended with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationOutcome {
    pub state: PaginationState,
    pub context: RenderContext,
    /// Whether the final render replaced the provisional file.
    pub rewritten: bool,
    /// Placeholder markers still present in the final output.
    pub unresolved_placeholders: usize,
}

pub struct PaginationController<'a> {
    backend: &'a dyn RenderBackend,
    fallback_page_count: Option<usize>,
    state: PaginationState,
}

impl<'a> PaginationController<'a> {
    pub fn new(backend: &'a dyn RenderBackend, fallback_page_count: Option<usize>) -> Self {
        Self {
            backend,
            fallback_page_count,
            state: PaginationState::Initial,
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Runs both passes, persisting the document at `output`.
    ///
    /// `render` turns a context into the complete document text. It is called
    /// exactly twice.
    pub fn run<F>(mut self, output: &Path, mut render: F) -> Result<PaginationOutcome, PipelineError>
    where
        F: FnMut(&RenderContext) -> String,
    {
        let provisional = render(&RenderContext::provisional());
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, &provisional)?;
        self.advance(PaginationState::ProbeRendered);

        // A zero-page answer carries no usable signal.
        let probed = self
            .backend
            .probe_page_count(output)
            .filter(|&count| count > 0);
        match probed {
            Some(count) => {
                info!("{} reported {} page(s).", self.backend.name(), count);
                self.advance(PaginationState::CountKnown);
            }
            None => {
                warn!(
                    "Page count unknown from {}; using fallback {:?}.",
                    self.backend.name(),
                    self.fallback_page_count
                );
                self.advance(PaginationState::CountUnknown);
            }
        }

        let context = RenderContext::resolve(probed, self.fallback_page_count);
        let rendered = render(&context);
        let rewritten = rendered.as_bytes() != provisional.as_bytes();
        if rewritten {
            fs::write(output, &rendered)?;
        } else {
            info!(
                "Final render matches the provisional render; leaving {} untouched.",
                output.display()
            );
        }
        self.advance(PaginationState::FinalRendered);

        let unresolved = unresolved_placeholders(&rendered);
        debug!(
            "{} unresolved placeholder(s) in final output: {:?}",
            unresolved.len(),
            unresolved
        );

        Ok(PaginationOutcome {
            state: self.state,
            context,
            rewritten,
            unresolved_placeholders: unresolved.len(),
        })
    }

    fn advance(&mut self, next: PaginationState) {
        debug!("Pagination {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
