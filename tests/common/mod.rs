pub mod fixtures;

use folio::{GatewayError, PipelineBuilder, PipelineError, RenderBackend, RunReport, StatementConfig};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// In-process stand-in for the external renderer.
#[derive(Debug, Clone, Default)]
pub struct StubBackend {
    /// Answer to every page-count probe. `None` simulates a failed probe.
    pub pages: Option<usize>,
    /// When set, the probe backdates the file it reads to this time.
    pub backdate_to: Option<SystemTime>,
}

impl StubBackend {
    pub fn pages(pages: usize) -> Self {
        Self {
            pages: Some(pages),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn backdating(mut self, time: SystemTime) -> Self {
        self.backdate_to = Some(time);
        self
    }
}

impl RenderBackend for StubBackend {
    fn probe_page_count(&self, input: &Path) -> Option<usize> {
        if let Some(time) = self.backdate_to {
            let file = fs::File::options().write(true).open(input).ok()?;
            file.set_modified(time).ok()?;
        }
        self.pages
    }

    fn render_pdf(&self, input: &Path, output: &Path) -> Result<(), GatewayError> {
        let html = fs::read_to_string(input).unwrap_or_default();
        fs::write(output, format!("%PDF-stub\n{}", html.len())).unwrap();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "StubBackend"
    }
}

/// A throwaway project directory laid out like the default configuration.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(template: &str, record: &Value) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let workspace = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        workspace.write("templates/statement.html", template);
        workspace.write("data/statement.json", &serde_json::to_string_pretty(record).unwrap());
        workspace
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    /// Default configuration rooted in this workspace.
    pub fn config(&self) -> StatementConfig {
        let defaults = StatementConfig::default();
        StatementConfig {
            data_path: self.dir.path().join(defaults.data_path),
            template_path: self.dir.path().join(defaults.template_path),
            styles_dir: self.dir.path().join(defaults.styles_dir),
            assets_dir: self.dir.path().join(defaults.assets_dir),
            output_dir: self.dir.path().join(defaults.output_dir),
            ..defaults
        }
    }

    pub fn run(&self, backend: StubBackend) -> Result<RunReport, PipelineError> {
        self.run_with(self.config(), backend, false)
    }

    pub fn run_with(
        &self,
        config: StatementConfig,
        backend: StubBackend,
        pdf: bool,
    ) -> Result<RunReport, PipelineError> {
        PipelineBuilder::new()
            .with_config(config)
            .with_backend(backend)
            .with_pdf(pdf)
            .build()
            .run()
    }
}
