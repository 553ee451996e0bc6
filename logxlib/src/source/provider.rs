//! File providers: where the scanner gets its paths and text from.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LogxError;
use crate::Result;

use super::filter::{discover_files, FilterConfig};

/// Supplies the ordered set of files to scan and their contents.
///
/// Implementations must be `Sync` so that files can be read from rayon
/// workers when parallel scanning is enabled.
pub trait FileProvider: Sync {
    /// Root used to compute relative path labels in reports.
    fn root(&self) -> &Path;

    /// Ordered list of files to scan.
    fn files(&self) -> Result<Vec<PathBuf>>;

    /// Read one file's full text.
    fn read(&self, path: &Path) -> Result<String>;
}

/// Provider backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct CodebaseProvider {
    root: PathBuf,
    filter: FilterConfig,
}

impl CodebaseProvider {
    /// Create a provider over `root` using the given filter.
    pub fn new(root: impl Into<PathBuf>, filter: FilterConfig) -> Self {
        Self {
            root: root.into(),
            filter,
        }
    }
}

impl FileProvider for CodebaseProvider {
    fn root(&self) -> &Path {
        &self.root
    }

    fn files(&self) -> Result<Vec<PathBuf>> {
        discover_files(&self.root, &self.filter)
    }

    fn read(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| LogxError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        // Legacy sources are often Latin-1; keep scanning rather than failing.
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }
}

/// Provider holding file contents in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    root: PathBuf,
    files: BTreeMap<PathBuf, String>,
}

impl MemoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: BTreeMap::new(),
        }
    }

    /// Add a file. Relative paths are placed under the root.
    pub fn with_file(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        let path = self.root.join(path);
        self.files.insert(path, text.into());
        self
    }
}

impl FileProvider for MemoryProvider {
    fn root(&self) -> &Path {
        &self.root
    }

    fn files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LogxError::FileRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not in memory provider"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_codebase_provider_lists_and_reads() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.c"), "MLog(\"X\");").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let provider = CodebaseProvider::new(temp.path(), FilterConfig::new());
        let files = provider.files().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(provider.read(&files[0]).unwrap(), "MLog(\"X\");");
        assert_eq!(provider.root(), temp.path());
    }

    #[test]
    fn test_codebase_provider_lossy_decode() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("latin.c");
        fs::write(&path, b"/* caf\xe9 */ MLog(\"A: x\");").unwrap();

        let provider = CodebaseProvider::new(temp.path(), FilterConfig::new());
        let text = provider.read(&path).unwrap();

        assert!(text.contains("MLog(\"A: x\");"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_codebase_provider_missing_file() {
        let temp = tempdir().unwrap();
        let provider = CodebaseProvider::new(temp.path(), FilterConfig::new());

        let err = provider.read(&temp.path().join("gone.c")).unwrap_err();
        assert!(matches!(err, LogxError::FileRead { .. }));
    }

    #[test]
    fn test_memory_provider_orders_by_path() {
        let provider = MemoryProvider::new("/code")
            .with_file("b.c", "b")
            .with_file("a.c", "a");

        let files = provider.files().unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("/code/a.c"), PathBuf::from("/code/b.c")]
        );
        assert_eq!(provider.read(Path::new("/code/b.c")).unwrap(), "b");
        assert!(provider.read(Path::new("/code/c.c")).is_err());
    }
}
