//! File filtering and discovery with glob pattern support.
//!
//! This module decides which files under a codebase root are scanned. By
//! default that is C and C++ sources, skipping version-control metadata and
//! test directories, optionally narrowed with include/exclude globs.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::error::LogxError;
use crate::Result;

/// Source extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["h", "c", "hpp", "cpp", "hxx", "cxx", "cc"];

/// Directory names never descended into, unless skipping is cleared.
const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn", ".bzr"];
const TEST_DIRS: &[&str] = &["test", "tests"];

/// Configuration for file filtering.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include every source file)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
    /// Glob patterns matched against directory names; matching directories are not walked
    pub skip_dirs: Vec<Pattern>,
    /// Accepted file extensions, lowercase, without the leading dot
    pub extensions: Vec<String>,
    /// Skip version-control and test directories
    pub skip_default_dirs: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            skip_dirs: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            skip_default_dirs: true,
        }
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| LogxError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

impl FilterConfig {
    /// Create a filter with the default extensions and directory policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add a pattern for directory names that should not be walked.
    pub fn skip_dir(mut self, pattern: &str) -> Result<Self> {
        self.skip_dirs.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Replace the accepted extensions. A leading dot is tolerated.
    pub fn extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Walk into version-control and test directories too.
    pub fn keep_default_dirs(mut self) -> Self {
        self.skip_default_dirs = false;
        self
    }

    /// Check if a file path matches the filter criteria.
    ///
    /// A path matches if:
    /// 1. Its extension is one of the accepted extensions (case-insensitive)
    /// 2. It matches at least one include pattern (or include is empty)
    /// 3. It doesn't match any exclude pattern
    pub fn matches(&self, path: &Path) -> bool {
        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            });
        if !accepted {
            return false;
        }

        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }

    /// Check if a directory should be skipped during traversal.
    pub fn skips_dir(&self, name: &str) -> bool {
        if self.skip_default_dirs {
            if VCS_DIRS.contains(&name) {
                return true;
            }
            if TEST_DIRS.iter().any(|t| t.eq_ignore_ascii_case(name)) {
                return true;
            }
        }

        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        self.skip_dirs
            .iter()
            .any(|p| p.matches_with(name, options))
    }
}

/// Discover source files under a directory.
///
/// Walks the directory tree and returns every file that matches the filter,
/// sorted for deterministic output. A single file root is returned as-is if
/// it matches.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(LogxError::PathNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    if root.is_file() {
        // Relative to its own directory, a file root is just its name.
        let relative = root.file_name().map(Path::new).unwrap_or(root);
        if filter.matches(relative) {
            files.push(root.to_path_buf());
        }
        return Ok(files);
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        // Always include the root directory
        if e.depth() == 0 {
            return true;
        }
        if e.file_type().is_dir() {
            let name = e.file_name().to_str().unwrap_or("");
            return !filter.skips_dir(name);
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!("skipping unreadable entry: {err}");
                continue;
            }
        };

        let path = entry.path();
        // Glob patterns are written relative to the root.
        let relative = path.strip_prefix(root).unwrap_or(path);

        if path.is_file() && filter.matches(relative) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_files(dir: &Path) {
        fs::create_dir_all(dir.join("src/net")).unwrap();
        fs::create_dir_all(dir.join("include")).unwrap();
        fs::create_dir_all(dir.join("Tests")).unwrap();
        fs::create_dir_all(dir.join(".svn")).unwrap();
        fs::create_dir_all(dir.join("generated")).unwrap();

        fs::write(dir.join("src/main.c"), "int main() { return 0; }").unwrap();
        fs::write(dir.join("src/net/socket.cpp"), "void f() {}").unwrap();
        fs::write(dir.join("include/api.H"), "#pragma once").unwrap();
        fs::write(dir.join("Tests/unit.c"), "void t() {}").unwrap();
        fs::write(dir.join(".svn/entries.c"), "// vcs").unwrap();
        fs::write(dir.join("generated/table.cc"), "// generated").unwrap();
        fs::write(dir.join("README.md"), "# Readme").unwrap();
        fs::write(dir.join("build.py"), "print()").unwrap();
    }

    #[test]
    fn test_filter_matches_default_extensions() {
        let filter = FilterConfig::new();

        assert!(filter.matches(Path::new("src/main.c")));
        assert!(filter.matches(Path::new("src/util.cxx")));
        assert!(filter.matches(Path::new("include/API.HPP")));
        assert!(filter.matches(Path::new("lib.cc")));
        assert!(!filter.matches(Path::new("README.md")));
        assert!(!filter.matches(Path::new("Makefile")));
        assert!(!filter.matches(Path::new("main.rs")));
    }

    #[test]
    fn test_filter_custom_extensions() {
        let filter = FilterConfig::new().extensions(&[".m", "mm"]);

        assert!(filter.matches(Path::new("app/view.m")));
        assert!(filter.matches(Path::new("app/view.MM")));
        assert!(!filter.matches(Path::new("app/view.c")));
    }

    #[test]
    fn test_filter_with_include_pattern() {
        let filter = FilterConfig::new().include("**/net/*").unwrap();

        assert!(filter.matches(Path::new("src/net/socket.cpp")));
        assert!(!filter.matches(Path::new("src/main.c")));
    }

    #[test]
    fn test_filter_with_exclude_pattern() {
        let filter = FilterConfig::new()
            .exclude_many(&["**/generated/**", "**/*.h"])
            .unwrap();

        assert!(filter.matches(Path::new("src/main.c")));
        assert!(!filter.matches(Path::new("out/generated/table.cc")));
        assert!(!filter.matches(Path::new("include/api.h")));
    }

    #[test]
    fn test_skips_vcs_and_test_dirs() {
        let filter = FilterConfig::new();

        assert!(filter.skips_dir(".git"));
        assert!(filter.skips_dir(".hg"));
        assert!(filter.skips_dir("test"));
        assert!(filter.skips_dir("TESTS"));
        assert!(!filter.skips_dir("testing"));
        assert!(!filter.skips_dir("src"));

        let keep = FilterConfig::new().keep_default_dirs();
        assert!(!keep.skips_dir(".git"));
        assert!(!keep.skips_dir("tests"));
    }

    #[test]
    fn test_skip_dir_pattern() {
        let filter = FilterConfig::new().skip_dir("third_*").unwrap();

        assert!(filter.skips_dir("third_party"));
        assert!(filter.skips_dir("Third_Party"));
        assert!(!filter.skips_dir("src"));
    }

    #[test]
    fn test_discover_files() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let files = discover_files(temp.path(), &FilterConfig::new()).unwrap();

        assert!(files.iter().any(|p| p.ends_with("src/main.c")));
        assert!(files.iter().any(|p| p.ends_with("src/net/socket.cpp")));
        assert!(files.iter().any(|p| p.ends_with("include/api.H")));
        assert!(files.iter().any(|p| p.ends_with("generated/table.cc")));

        assert!(!files.iter().any(|p| p.ends_with("Tests/unit.c")));
        assert!(!files.iter().any(|p| p.ends_with(".svn/entries.c")));
        assert!(!files.iter().any(|p| p.ends_with("README.md")));
        assert_eq!(files.len(), 4);

        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_discover_files_patterns_are_root_relative() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let filter = FilterConfig::new().include("src/**").unwrap();
        let files = discover_files(temp.path(), &filter).unwrap();
        assert_eq!(files.len(), 2);

        let filter = FilterConfig::new().exclude("src/net/*").unwrap();
        let files = discover_files(temp.path(), &filter).unwrap();
        assert!(!files.iter().any(|p| p.ends_with("src/net/socket.cpp")));
        assert!(files.iter().any(|p| p.ends_with("src/main.c")));
    }

    #[test]
    fn test_discover_files_with_filter() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let filter = FilterConfig::new().skip_dir("generated").unwrap();
        let files = discover_files(temp.path(), &filter).unwrap();

        assert!(!files.iter().any(|p| p.ends_with("generated/table.cc")));
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_discover_single_file() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("one.c");
        fs::write(&file_path, "void f() {}").unwrap();

        let files = discover_files(&file_path, &FilterConfig::new()).unwrap();

        assert_eq!(files, vec![file_path]);
    }

    #[test]
    fn test_discover_single_file_patterns_match_its_name() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("one.c");
        fs::write(&file_path, "void f() {}").unwrap();

        let filter = FilterConfig::new().exclude("one.c").unwrap();
        assert!(discover_files(temp.path(), &filter).unwrap().is_empty());
        assert!(discover_files(&file_path, &filter).unwrap().is_empty());

        let filter = FilterConfig::new().include("one.*").unwrap();
        assert_eq!(discover_files(&file_path, &filter).unwrap(), vec![file_path]);
    }

    #[test]
    fn test_discover_files_nonexistent() {
        let result = discover_files("/nonexistent/path", &FilterConfig::new());

        assert!(matches!(result, Err(LogxError::PathNotFound(_))));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = FilterConfig::new().include("[invalid");

        if let Err(LogxError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("Expected InvalidGlob error");
        }
    }
}
