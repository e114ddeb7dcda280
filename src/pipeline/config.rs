use crate::error::PipelineError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// File name of the rendered document inside the output directory.
pub const HTML_FILE_NAME: &str = "statement.html";
/// File name of the PDF artifact, a sibling of the rendered document.
pub const PDF_FILE_NAME: &str = "statement.pdf";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings for one statement run.
///
/// Built from defaults, then overridden by `FOLIO_*` environment variables.
/// Empty variables count as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementConfig {
    pub data_path: PathBuf,
    pub template_path: PathBuf,
    pub styles_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Command line prefix tried before the default renderer commands.
    pub renderer_override: Option<String>,
    /// `None` waits for the renderer indefinitely.
    pub renderer_timeout: Option<Duration>,
    /// Page count used when the probe cannot report one. Never zero.
    pub fallback_page_count: Option<usize>,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/statement.json"),
            template_path: PathBuf::from("templates/statement.html"),
            styles_dir: PathBuf::from("styles"),
            assets_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("dist"),
            renderer_override: None,
            renderer_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            fallback_page_count: None,
        }
    }
}

impl StatementConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = get("FOLIO_DATA") {
            config.data_path = path.into();
        }
        if let Some(path) = get("FOLIO_TEMPLATE") {
            config.template_path = path.into();
        }
        if let Some(path) = get("FOLIO_STYLES_DIR") {
            config.styles_dir = path.into();
        }
        if let Some(path) = get("FOLIO_ASSETS_DIR") {
            config.assets_dir = path.into();
        }
        if let Some(path) = get("FOLIO_OUTPUT_DIR") {
            config.output_dir = path.into();
        }
        config.renderer_override = get("FOLIO_PDF_RENDERER");

        if let Some(raw) = get("FOLIO_RENDERER_TIMEOUT_SECS") {
            let secs: u64 = parse_number("FOLIO_RENDERER_TIMEOUT_SECS", &raw)?;
            config.renderer_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(raw) = get("FOLIO_FALLBACK_PAGE_COUNT") {
            let count: usize = parse_number("FOLIO_FALLBACK_PAGE_COUNT", &raw)?;
            // Zero pages is no count at all.
            config.fallback_page_count = (count > 0).then_some(count);
        }

        Ok(config)
    }

    pub fn html_output(&self) -> PathBuf {
        self.output_dir.join(HTML_FILE_NAME)
    }

    pub fn pdf_output(&self) -> PathBuf {
        self.output_dir.join(PDF_FILE_NAME)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, PipelineError> {
    raw.parse().map_err(|_| {
        PipelineError::Config(format!(
            "{} must be a non-negative integer, got '{}'",
            key, raw
        ))
    })
}
