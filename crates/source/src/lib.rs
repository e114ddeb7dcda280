//! Data record sources for the pipeline.
//!
//! This module provides the `DataSource` trait and the implementations used to
//! feed a statement record into the rendering pipeline.
//!
//! ## Available Sources
//!
//! - `JsonFileSource`: A JSON document on disk
//! - `InMemorySource`: An already-parsed record
//!
//! ## Example
//!
//! ```ignore
//! use folio_source::{DataSource, JsonFileSource};
//!
//! let source = JsonFileSource::new("data/statement.json");
//! let record = source.load()?;
//! ```

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for loading a data record. Every variant is fatal to a run.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Data record not found: {0}")]
    NotFound(String),

    #[error("Failed to read data record '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Data record '{path}' is not well-formed JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Data record '{0}' must be a JSON object")]
    NotAnObject(String),
}

/// A trait for sources that provide the statement record.
///
/// A record is loaded once per run and treated as immutable afterwards.
pub trait DataSource {
    /// Load the record. The result is always a JSON object.
    fn load(&self) -> Result<Value, SourceError>;

    /// Returns a human-readable description of this source (for logging/debugging).
    fn describe(&self) -> String;
}

/// A record stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileSource {
    fn load(&self) -> Result<Value, SourceError> {
        let display = self.path.display().to_string();
        let text = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound(display.clone())
            } else {
                SourceError::Io {
                    path: display.clone(),
                    source,
                }
            }
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| SourceError::Parse {
            path: display.clone(),
            source,
        })?;
        log::debug!("Loaded data record from {}", display);
        require_object(value, display)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// A record held in memory.
///
/// This is the simplest source, useful for embedding and testing.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    record: Value,
}

impl InMemorySource {
    pub fn new(record: Value) -> Self {
        Self { record }
    }
}

impl DataSource for InMemorySource {
    fn load(&self) -> Result<Value, SourceError> {
        require_object(self.record.clone(), self.describe())
    }

    fn describe(&self) -> String {
        "in-memory record".to_string()
    }
}

// Blanket implementation for Box<dyn DataSource>
impl DataSource for Box<dyn DataSource> {
    fn load(&self) -> Result<Value, SourceError> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

fn require_object(value: Value, origin: String) -> Result<Value, SourceError> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(SourceError::NotAnObject(origin))
    }
}
