//! Core abstractions for folio templates
//!
//! This crate provides the text-level machinery shared by every rendering pass:
//! a record is flattened into a [`TokenMapping`], and a [`Template`] substitutes
//! that mapping into its `{{path.to.value}}` placeholder markers.
//!
//! ## Key Abstractions
//!
//! - **`TokenMapping`**: Flat, ordered map of dotted paths to string values
//! - **`flatten` / `rehydrate`**: Conversion between a nested record and a mapping
//! - **`Template`**: Immutable template text with single-pass placeholder substitution

mod engine;
mod flatten;
mod tokens;

pub use engine::{Template, render, unresolved_placeholders};
pub use flatten::{flatten, flatten_into, rehydrate};
pub use tokens::TokenMapping;

use thiserror::Error;

/// Errors that can occur while loading templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
