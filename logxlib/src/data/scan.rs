//! High-level scanning API.
//!
//! This module ties the stages together: it runs the scanner, parser and
//! classifier over a file's text to build a [`FileIndex`], and drives that
//! over every file a [`FileProvider`] yields.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::source::provider::FileProvider;
use crate::Result;

use super::callsite::CallSite;
use super::classifier::Classifier;
use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::index::FileIndex;
use super::parser::{parse_call, DEFAULT_MAX_ARGUMENTS};
use super::scanner::{CallScanner, DEFAULT_CALL, DEFAULT_WRAPPER};

/// Options for scanning.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Name of the call to audit
    pub call_name: String,
    /// Regex fragment matching wrapper macro names
    pub wrapper_pattern: String,
    /// Top-level arguments tracked per call before falling back
    pub max_arguments: usize,
    /// Scan files on the rayon thread pool
    pub parallel: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            call_name: DEFAULT_CALL.to_string(),
            wrapper_pattern: DEFAULT_WRAPPER.to_string(),
            max_arguments: DEFAULT_MAX_ARGUMENTS,
            parallel: false,
        }
    }
}

impl ScanOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the call name.
    pub fn call_name(mut self, name: impl Into<String>) -> Self {
        self.call_name = name.into();
        self
    }

    /// Set the wrapper name pattern.
    pub fn wrapper_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.wrapper_pattern = pattern.into();
        self
    }

    /// Set the argument threshold.
    pub fn max_arguments(mut self, max: usize) -> Self {
        self.max_arguments = max;
        self
    }

    /// Enable or disable parallel scanning.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Compiled scanning pipeline for one set of options, reusable across files.
#[derive(Debug, Clone)]
pub struct FileScanner {
    calls: CallScanner,
    classifier: Classifier,
    max_arguments: usize,
}

impl FileScanner {
    /// Compile the patterns described by `options`.
    pub fn new(options: &ScanOptions) -> Result<Self> {
        Ok(Self {
            calls: CallScanner::new(&options.call_name, &options.wrapper_pattern)?,
            classifier: Classifier::new()?,
            max_arguments: options.max_arguments,
        })
    }

    pub fn call_name(&self) -> &str {
        self.calls.call_name()
    }

    /// Scan one file's text. Never fails: problems become diagnostics.
    pub fn scan_text(&self, path: impl Into<PathBuf>, text: &str) -> FileIndex {
        let path = path.into();
        let mut sites = Vec::new();
        let mut diagnostics = Vec::new();

        for found in self.calls.scan(text) {
            let offset = Some(found.start);
            let parsed = parse_call(text, found.name_offset, self.max_arguments);

            if parsed.fallback {
                diagnostics.push(Diagnostic::new(
                    &path,
                    offset,
                    DiagnosticKind::ArgumentOverflow {
                        threshold: self.max_arguments,
                    },
                ));
            }
            if parsed.end_offset.is_none() {
                diagnostics.push(Diagnostic::new(
                    &path,
                    offset,
                    DiagnosticKind::UnresolvedTerminator,
                ));
            }

            let (classification, problem) = self.classifier.classify(found.wrapper.as_ref());
            if let Some(kind) = problem {
                diagnostics.push(Diagnostic::new(&path, offset, kind));
            }

            let site = CallSite::new(found, parsed, classification);
            site.describe(text, &self.classifier);
            sites.push(site);
        }

        for diagnostic in &diagnostics {
            diagnostic.log();
        }
        tracing::debug!(path = %path.display(), calls = sites.len(), "scanned file");

        FileIndex::new(path, sites, diagnostics)
    }

    /// Read a file through `provider` and scan it. A read failure yields an
    /// empty index carrying a `FileRead` diagnostic.
    pub fn scan_path<P: FileProvider + ?Sized>(&self, provider: &P, path: &Path) -> FileIndex {
        match provider.read(path) {
            Ok(text) => self.scan_text(path, &text),
            Err(err) => {
                let diagnostic = Diagnostic::new(
                    path,
                    None,
                    DiagnosticKind::FileRead {
                        message: err.to_string(),
                    },
                );
                diagnostic.log();
                FileIndex::empty(path, vec![diagnostic])
            }
        }
    }
}

/// Result of scanning a codebase.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Root the files were discovered under
    pub root: PathBuf,
    /// Name of the audited call
    pub call_name: String,
    /// One index per provided file, in provider order
    pub files: Vec<FileIndex>,
}

impl ScanResult {
    /// Number of files scanned, including unreadable ones.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of files with at least one call.
    pub fn files_with_calls(&self) -> usize {
        self.files.iter().filter(|f| !f.is_empty()).count()
    }

    /// Total call sites across all files.
    pub fn call_count(&self) -> usize {
        self.files.iter().map(FileIndex::call_count).sum()
    }

    /// All diagnostics, file by file.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.files.iter().flat_map(|f| f.diagnostics().iter())
    }
}

/// Scan every file the provider yields.
///
/// Errors only when the options do not compile or the provider cannot list
/// its files; per-file problems are recorded as diagnostics. With
/// `options.parallel` set, files are scanned on rayon workers, each producing
/// its own [`FileIndex`]; results keep provider order.
///
/// # Example
///
/// ```rust
/// use logxlib::{scan_codebase, MemoryProvider, ScanOptions};
///
/// let provider = MemoryProvider::new("/src")
///     .with_file("net.c", "MDB(info, net) MLog(\"NET: up\");")
///     .with_file("util.c", "int x;");
///
/// let result = scan_codebase(&provider, &ScanOptions::new()).unwrap();
/// assert_eq!(result.file_count(), 2);
/// assert_eq!(result.files_with_calls(), 1);
/// assert_eq!(result.files[0].sites()[0].described_category(), "NET");
/// ```
pub fn scan_codebase<P: FileProvider + ?Sized>(
    provider: &P,
    options: &ScanOptions,
) -> Result<ScanResult> {
    let scanner = FileScanner::new(options)?;
    let paths = provider.files()?;

    tracing::debug!(
        root = %provider.root().display(),
        files = paths.len(),
        parallel = options.parallel,
        "scanning codebase"
    );

    let files: Vec<FileIndex> = if options.parallel {
        paths
            .par_iter()
            .map(|path| scanner.scan_path(provider, path))
            .collect()
    } else {
        paths
            .iter()
            .map(|path| scanner.scan_path(provider, path))
            .collect()
    };

    Ok(ScanResult {
        root: provider.root().to_path_buf(),
        call_name: scanner.call_name().to_string(),
        files,
    })
}

/// Scan a single file on disk.
pub fn scan_file(path: impl AsRef<Path>, options: &ScanOptions) -> Result<FileIndex> {
    let path = path.as_ref();
    let scanner = FileScanner::new(options)?;
    let text = std::fs::read(path).map_err(|e| crate::error::LogxError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(scanner.scan_text(path, &String::from_utf8_lossy(&text)))
}
