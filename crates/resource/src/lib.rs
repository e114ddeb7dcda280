//! Resource providers for the folio pipeline.
//!
//! Stylesheets are read through the [`ResourceProvider`] trait so the style
//! inliner does not depend on filesystem access.
//!
//! ## Available Providers
//!
//! - [`FilesystemResourceProvider`]: Loads resources from a directory on disk
//! - [`InMemoryResourceProvider`]: Pre-populated in-memory storage

mod filesystem;
mod memory;

pub use filesystem::FilesystemResourceProvider;
pub use memory::InMemoryResourceProvider;

use std::fmt::Debug;
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// A trait for loading text resources such as stylesheets.
///
/// # Implementations
///
/// - `FilesystemResourceProvider`: Loads from a base directory, refusing paths that escape it
/// - `InMemoryResourceProvider`: Loads from pre-populated memory
pub trait ResourceProvider: Debug {
    /// Load a resource as UTF-8 text.
    fn load_text(&self, path: &str) -> Result<String, ResourceError>;

    /// Check if a resource exists.
    fn exists(&self, path: &str) -> bool;

    /// Paths of all top-level resources with the given extension, sorted.
    fn list(&self, extension: &str) -> Result<Vec<String>, ResourceError>;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}
