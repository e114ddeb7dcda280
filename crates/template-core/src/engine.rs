//! Placeholder substitution.
//!
//! A marker has the form `{{ path.to-value }}`: the path is made of word
//! characters, dots and hyphens, optionally padded with whitespace inside the
//! braces. Substitution is a single left-to-right pass over the template text,
//! so a substituted value is never scanned again.

use crate::{TemplateError, TokenMapping};
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([\w.-]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// Substitutes `tokens` into `template`.
///
/// Markers whose path is not in the mapping are copied to the output verbatim.
pub fn render(template: &str, tokens: &TokenMapping) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| -> String {
            let path = caps[1].trim();
            match tokens.get(path) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Returns the paths of every placeholder marker left in `text`, in order of
/// appearance.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// An immutable template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Reads a template from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { source })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder paths referenced by this template, in order of appearance.
    pub fn placeholders(&self) -> Vec<String> {
        unresolved_placeholders(&self.source)
    }

    pub fn render(&self, tokens: &TokenMapping) -> String {
        render(&self.source, tokens)
    }
}
