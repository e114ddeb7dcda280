// src/pipeline/mod.rs
pub mod builder;
pub mod config;
pub mod context;
pub mod pagination;
pub mod tokens;

use self::config::StatementConfig;
use self::pagination::{PaginationController, PaginationOutcome};
use self::tokens::{fallback_page_count, statement_tokens};
use crate::error::PipelineError;
use crate::styles::StyleInliner;
use folio_gateway::RenderBackend;
use folio_resource::FilesystemResourceProvider;
use folio_source::DataSource;
use folio_template_core::Template;
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Directory names the stylesheet and asset directories are copied to inside the output directory.
const STYLES_OUTPUT_DIR: &str = "styles";
const ASSETS_OUTPUT_DIR: &str = "assets";

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub html_path: PathBuf,
    pub pdf_path: Option<PathBuf>,
    pub pagination: PaginationOutcome,
}

/// A configured statement run. Create one with [`builder::PipelineBuilder`].
pub struct StatementPipeline {
    config: StatementConfig,
    source: Box<dyn DataSource>,
    backend: Box<dyn RenderBackend>,
    produce_pdf: bool,
    inline_styles: bool,
}

impl StatementPipeline {
    pub fn config(&self) -> &StatementConfig {
        &self.config
    }

    /// Loads the record and template, runs both rendering passes and, when
    /// requested, produces the PDF artifact.
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        info!("Loading statement data from {}.", self.source.describe());
        let record = self.source.load()?;
        let template = Template::from_file(&self.config.template_path)?;
        debug!(
            "Template {} declares {} placeholder(s).",
            self.config.template_path.display(),
            template.placeholders().len()
        );

        let styles = if self.inline_styles {
            StyleInliner::from_provider(&FilesystemResourceProvider::new(&self.config.styles_dir))?
        } else {
            StyleInliner::default()
        };

        fs::create_dir_all(&self.config.output_dir)?;
        self.copy_static_dirs()?;

        let base = statement_tokens(&record);
        let fallback = fallback_page_count(self.config.fallback_page_count, &record);
        let html_path = self.config.html_output();

        let pagination = PaginationController::new(&*self.backend, fallback).run(
            &html_path,
            |context| {
                let mut tokens = base.clone();
                tokens.merge(context.tokens());
                styles.inline(&template.render(&tokens))
            },
        )?;
        info!("Wrote {}.", html_path.display());

        let pdf_path = if self.produce_pdf {
            let pdf_path = self.config.pdf_output();
            self.backend.render_pdf(&html_path, &pdf_path)?;
            info!("Wrote {} using {}.", pdf_path.display(), self.backend.name());
            Some(pdf_path)
        } else {
            None
        };

        Ok(RunReport {
            html_path,
            pdf_path,
            pagination,
        })
    }

    fn copy_static_dirs(&self) -> Result<(), PipelineError> {
        for (source, target) in [
            (&self.config.styles_dir, STYLES_OUTPUT_DIR),
            (&self.config.assets_dir, ASSETS_OUTPUT_DIR),
        ] {
            let copied = FilesystemResourceProvider::new(source)
                .copy_tree_to(self.config.output_dir.join(target))?;
            debug!("Copied {} file(s) from {}.", copied, source.display());
        }
        Ok(())
    }
}
