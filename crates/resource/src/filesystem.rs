//! Filesystem-based resource provider.
//!
//! All resolved paths must stay within the base directory, so a stylesheet
//! reference such as `../../etc/passwd` cannot be read.

use crate::{ResourceError, ResourceProvider};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// A resource provider that loads resources from a directory.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    /// Creates a provider rooted at `base_path`. The directory does not have to exist yet.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail if the directory does not exist yet
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolves `path` against the base, or `None` if it would escape it.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        let full_path = self.base_path.join(relative);
        match (full_path.canonicalize(), &self.canonical_base) {
            (Ok(canonical), Some(base)) if canonical.starts_with(base) => Some(canonical),
            // Symlink pointing outside the base
            (Ok(_), Some(_)) => None,
            _ => Some(full_path),
        }
    }

    /// Recursively copies the base directory into `destination`, creating it as
    /// needed. Returns the number of files copied; a missing base copies nothing.
    pub fn copy_tree_to<P: AsRef<Path>>(&self, destination: P) -> Result<usize, ResourceError> {
        if !self.base_path.is_dir() {
            log::debug!(
                "Skipping copy of '{}': not a directory.",
                self.base_path.display()
            );
            return Ok(0);
        }
        copy_dir(&self.base_path, destination.as_ref())
    }
}

fn copy_dir(source: &Path, destination: &Path) -> Result<usize, ResourceError> {
    fs::create_dir_all(destination)?;
    let mut copied = 0;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = destination.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load_text(&self, path: &str) -> Result<String, ResourceError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (path traversal blocked)", path)))?;

        fs::read_to_string(&full_path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path)
            .map(|p| p.exists())
            .unwrap_or(false)
    }

    fn list(&self, extension: &str) -> Result<Vec<String>, ResourceError> {
        if !self.base_path.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file()
                || path.extension().is_none_or(|ext| ext != extension)
            {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_filesystem_provider_load_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("base.css"), "body { margin: 0; }").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        assert_eq!(provider.load_text("base.css").unwrap(), "body { margin: 0; }");
    }

    #[test]
    fn test_filesystem_provider_not_found() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());

        let result = provider.load_text("missing.css");
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn test_filesystem_provider_blocks_path_traversal() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());

        assert!(provider.load_text("../../../etc/passwd").is_err());
        assert!(!provider.exists("../../../etc/passwd"));
        assert!(!provider.exists("/etc/passwd"));
        assert!(!provider.exists("foo/../../bar"));
    }

    #[test]
    fn test_list_returns_sorted_matching_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("print.css"), "").unwrap();
        fs::write(dir.path().join("base.css"), "").unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();
        fs::create_dir(dir.path().join("vendor.css")).unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        assert_eq!(provider.list("css").unwrap(), vec!["base.css", "print.css"]);
    }

    #[test]
    fn test_list_of_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path().join("nope"));
        assert!(provider.list("css").unwrap().is_empty());
    }

    #[test]
    fn test_copy_tree_copies_nested_files() {
        let source = tempdir().unwrap();
        fs::create_dir(source.path().join("fonts")).unwrap();
        fs::write(source.path().join("logo.svg"), "<svg/>").unwrap();
        fs::write(source.path().join("fonts/inter.woff2"), "font").unwrap();
        let dest = tempdir().unwrap();

        let provider = FilesystemResourceProvider::new(source.path());
        let copied = provider.copy_tree_to(dest.path().join("assets")).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(dest.path().join("assets/fonts/inter.woff2")).unwrap(),
            "font"
        );
    }

    #[test]
    fn test_copy_tree_of_missing_directory_is_a_no_op() {
        let dest = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dest.path().join("missing"));
        assert_eq!(provider.copy_tree_to(dest.path().join("out")).unwrap(), 0);
        assert!(!dest.path().join("out").exists());
    }
}
