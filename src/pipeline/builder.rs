// src/pipeline/builder.rs
use super::StatementPipeline;
use super::config::StatementConfig;
use folio_gateway::{ExternalRenderer, RenderBackend};
use folio_source::{DataSource, JsonFileSource};

/// A builder for creating a `StatementPipeline`.
///
/// Anything not supplied explicitly is derived from the configuration: the
/// record is read from `data_path` and the external renderer is reached
/// through the configured override and the default commands.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<StatementConfig>,
    source: Option<Box<dyn DataSource>>,
    backend: Option<Box<dyn RenderBackend>>,
    produce_pdf: bool,
    inline_styles: Option<bool>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: StatementConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the configured data file with another record source.
    pub fn with_data_source(mut self, source: impl DataSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Replaces the external renderer, e.g. with an in-process test double.
    pub fn with_backend(mut self, backend: impl RenderBackend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    /// Requests the PDF artifact. Also inlines styles unless
    /// [`PipelineBuilder::with_inline_styles`] says otherwise.
    pub fn with_pdf(mut self, produce_pdf: bool) -> Self {
        self.produce_pdf = produce_pdf;
        self
    }

    pub fn with_inline_styles(mut self, inline_styles: bool) -> Self {
        self.inline_styles = Some(inline_styles);
        self
    }

    pub fn build(self) -> StatementPipeline {
        let config = self.config.unwrap_or_default();
        let source = self
            .source
            .unwrap_or_else(|| Box::new(JsonFileSource::new(&config.data_path)));
        let backend = self.backend.unwrap_or_else(|| {
            Box::new(ExternalRenderer::new(
                config.renderer_override.clone(),
                config.renderer_timeout,
            ))
        });
        let inline_styles = self.inline_styles.unwrap_or(self.produce_pdf);
        log::debug!(
            "Building pipeline: backend={}, pdf={}, inline_styles={}",
            backend.name(),
            self.produce_pdf,
            inline_styles
        );

        StatementPipeline {
            config,
            source,
            backend,
            produce_pdf: self.produce_pdf,
            inline_styles,
        }
    }
}
