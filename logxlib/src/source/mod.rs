//! Source discovery: find files to scan.
//!
//! This module handles the first stage of the pipeline - deciding which files
//! are scanned and reading their text. It provides:
//!
//! - **File filtering**: Extension, directory and glob based selection
//! - **Providers**: The [`FileProvider`] seam, backed by disk or memory
//!
//! ## Example
//!
//! ```rust,ignore
//! use logxlib::source::{CodebaseProvider, FilterConfig};
//!
//! let filter = FilterConfig::new().exclude("**/generated/**")?;
//! let provider = CodebaseProvider::new("./src", filter);
//! ```

pub mod filter;
pub mod provider;

pub use filter::{discover_files, FilterConfig, DEFAULT_EXTENSIONS};
pub use provider::{CodebaseProvider, FileProvider, MemoryProvider};
