// src/error.rs
use folio_gateway::GatewayError;
use folio_resource::ResourceError;
use folio_source::SourceError;
use folio_template_core::TemplateError;
use thiserror::Error;

/// A comprehensive error type for a statement run.
///
/// Every variant is fatal. Degraded conditions (an unavailable page count,
/// an unknown placeholder) are logged and never reach this type.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to load statement data: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to load template: {0}")]
    Template(#[from] TemplateError),

    #[error("{0}")]
    Gateway(#[from] GatewayError),

    #[error("Failed to load stylesheet: {0}")]
    Resource(#[from] ResourceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
