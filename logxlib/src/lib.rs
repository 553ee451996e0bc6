//! # logxlib
//!
//! A static auditor for logging calls in C and C++ source trees.
//!
//! ## Overview
//!
//! The library walks a source tree, finds every call to a target logging
//! function (`MLog` by default) and classifies each call site by:
//!
//! - **Category**: The uppercase label the message starts with, e.g. `NET` in
//!   `MLog("NET: link up")`, or `?` when there is none
//! - **Level** and **Facility**: The first two fields of a filtering wrapper
//!   macro placed right before the call, e.g. `MDB(info, net) MLog(...)`
//! - **Filter function**: The name of that wrapper macro
//!
//! Counts are then folded across the tree into a report with the busiest
//! files ranked first.
//!
//! ## Pipeline
//!
//! - [`source`]: discover files and read them
//! - [`data`]: scan, parse and classify call sites per file
//! - [`query`]: fold per-file indices into codebase counts
//! - [`output`]: build and render the report
//!
//! ## Example
//!
//! ```rust
//! use logxlib::{render, scan_codebase, MemoryProvider, Report, ReportOptions, ScanOptions};
//!
//! let provider = MemoryProvider::new("/src")
//!     .with_file("net.c", "MDB(info, net) MLog(\"NET: up\");\nMLog(\"NET: down\");\n")
//!     .with_file("db.c", "MDBE(warn, db) MLog(\"DB: slow query\");\n");
//!
//! let result = scan_codebase(&provider, &ScanOptions::new()).unwrap();
//! assert_eq!(result.call_count(), 3);
//!
//! let report = Report::build(&result, &ReportOptions::new());
//! let text = render(&report);
//! assert!(text.contains("# calls to log NET"));
//! assert!(text.contains("  net.c: 2"));
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;

pub use data::{
    scan_codebase, scan_file, CallSite, Classification, Classifier, Diagnostic, DiagnosticKind,
    Dimension, FileIndex, FileScanner, GroupKey, ScanOptions, ScanResult, DEFAULT_CALL,
    DEFAULT_MAX_ARGUMENTS, DEFAULT_WRAPPER,
};
pub use error::LogxError;
pub use output::{render, render_lines, LineKind, Report, ReportLine};
pub use query::{CodebaseIndex, Counts, FileRank, ReportOptions, DEFAULT_TOP_FILES};
pub use source::{CodebaseProvider, FileProvider, FilterConfig, MemoryProvider};

/// Result type for logxlib operations
pub type Result<T> = std::result::Result<T, LogxError>;
