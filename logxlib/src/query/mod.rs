//! Query processing: fold file indices into codebase counts and rank files.
//!
//! This module handles the third stage of the pipeline - turning per-file
//! indices into codebase-level aggregates. It provides:
//!
//! - **Counts**: Ordered key → count maps that merge in any order
//! - **CodebaseIndex**: Four `Counts`, one per dimension
//! - **Ranking**: Busiest files with their per-category sub-counts
//!
//! ## Example
//!
//! ```rust,ignore
//! use logxlib::query::CodebaseIndex;
//!
//! let index = CodebaseIndex::from_files(&result.files);
//! for (key, count) in index.by_level.ranked() { /* ... */ }
//! ```

pub mod codebase;
pub mod options;

pub use codebase::{rank_files, top_files, CodebaseIndex, Counts, FileRank};
pub use options::{ReportOptions, DEFAULT_TOP_FILES};
