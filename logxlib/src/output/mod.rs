//! Output formatting: present a scan as a report.
//!
//! This module handles the fourth and final stage of the pipeline -
//! formatting query results for display. It provides:
//!
//! - **Report**: Sorted, serializable snapshot of one scan
//! - **render / render_lines**: Plain-text layout with labels padded to a
//!   fixed column
//!
//! Rendering is a pure function of the report. All counting and sorting
//! happens when the report is built.
//!
//! ## Example
//!
//! ```rust,ignore
//! use logxlib::output::{render, Report};
//!
//! let report = Report::build(&result, &ReportOptions::new());
//! print!("{}", render(&report));
//! ```

pub mod report;

pub use report::{render, render_lines, DimensionSection, LineKind, Report, ReportLine, ReportRow};
