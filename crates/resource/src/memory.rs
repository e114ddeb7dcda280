use crate::{ResourceError, ResourceProvider};
use std::collections::BTreeMap;
use std::path::Path;

/// An in-memory resource provider.
///
/// Resources are stored in memory and must be pre-populated before use.
#[derive(Debug, Default, Clone)]
pub struct InMemoryResourceProvider {
    resources: BTreeMap<String, String>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, replacing any previous content under the same path.
    pub fn add(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.resources.insert(path.into(), content.into());
    }

    /// Builder-style [`InMemoryResourceProvider::add`].
    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.add(path, content);
        self
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load_text(&self, path: &str) -> Result<String, ResourceError> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources.contains_key(path)
    }

    fn list(&self, extension: &str) -> Result<Vec<String>, ResourceError> {
        Ok(self
            .resources
            .keys()
            .filter(|path| !path.contains('/'))
            .filter(|path| Path::new(path).extension().is_some_and(|ext| ext == extension))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
