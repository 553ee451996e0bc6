//! Data collection: find, parse and classify call sites.
//!
//! This module handles the second stage of the pipeline - turning a file's
//! text into an indexed list of call sites. It provides:
//!
//! - **Scanning**: Locate the target call and any wrapper macro before it
//! - **Parsing**: Quote-aware argument and statement-end detection
//! - **Classification**: Level, facility, filter function, described category
//! - **Indexing**: Per-file groupings along four dimensions
//!
//! ## Example
//!
//! ```rust,ignore
//! use logxlib::data::{FileScanner, ScanOptions};
//!
//! let scanner = FileScanner::new(&ScanOptions::new())?;
//! let index = scanner.scan_text("net.c", source);
//! println!("{} calls", index.call_count());
//! ```

pub mod callsite;
pub mod classifier;
pub mod diagnostic;
pub mod index;
pub mod parser;
pub mod scan;
pub mod scanner;

pub use callsite::CallSite;
pub use classifier::{is_valid_category, Classification, Classifier, UNKNOWN_CATEGORY};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use index::{key_label, Dimension, FileIndex, GroupKey, Grouping, NONE_LABEL};
pub use parser::{parse_call, ParsedCall, DEFAULT_MAX_ARGUMENTS};
pub use scan::{scan_codebase, scan_file, FileScanner, ScanOptions, ScanResult};
pub use scanner::{CallMatch, CallScanner, Wrapper, DEFAULT_CALL, DEFAULT_WRAPPER};
