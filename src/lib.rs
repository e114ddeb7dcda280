//! folio renders a financial statement from a JSON record and an HTML template.
//!
//! Rendering happens in two passes. The first pass assumes nothing about
//! pagination and is handed to an external renderer, which reports how many
//! pages the document occupies. The second pass renders the pagination
//! dependent content (footer variant, page count, page class) from that answer.
//! Optionally the external renderer then produces a PDF artifact.
//!
//! ```ignore
//! use folio::{PipelineBuilder, StatementConfig};
//!
//! let report = PipelineBuilder::new()
//!     .with_config(StatementConfig::from_env()?)
//!     .with_pdf(true)
//!     .build()
//!     .run()?;
//! println!("{}", report.html_path.display());
//! ```

pub mod error;
pub mod pipeline;
pub mod styles;

pub use error::PipelineError;
pub use pipeline::builder::PipelineBuilder;
pub use pipeline::config::StatementConfig;
pub use pipeline::context::RenderContext;
pub use pipeline::pagination::{PaginationController, PaginationOutcome, PaginationState};
pub use pipeline::{RunReport, StatementPipeline};
pub use styles::StyleInliner;

pub use folio_gateway::{CommandCandidate, ExternalRenderer, GatewayError, RenderBackend};
pub use folio_source::{DataSource, InMemorySource, JsonFileSource};
pub use folio_template_core::{Template, TokenMapping};
