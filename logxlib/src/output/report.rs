//! Report snapshot and plain-text rendering.
//!
//! The data flow is:
//! 1. ScanResult (one FileIndex per file)
//! 2. Report (counts folded, sorted, top files picked)
//! 3. Lines / String (formatted for display)
//!
//! `Report` is plain data and serializes directly to JSON. Rendering only
//! formats it; it does no counting or sorting of its own.

use serde::{Deserialize, Serialize};

use crate::data::index::Dimension;
use crate::data::scan::ScanResult;
use crate::query::codebase::{rank_files, top_files, CodebaseIndex, FileRank};
use crate::query::options::ReportOptions;

/// Width labels are padded to in text output.
const LABEL_WIDTH: usize = 30;

/// One `<label>: <count>` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Grouping key; `None` is the absent bucket
    pub key: Option<String>,
    /// Display label, e.g. `# calls with level info`
    pub label: String,
    pub count: u64,
}

/// Rows for one dimension, sorted by descending count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSection {
    pub dimension: Dimension,
    pub rows: Vec<ReportRow>,
}

/// Everything a report shows, already sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Name of the audited call
    pub call_name: String,
    /// Files scanned
    pub file_count: usize,
    /// Files with at least one call
    pub files_with_calls: usize,
    /// Total call sites
    pub call_count: u64,
    /// Diagnostics raised during the scan
    pub diagnostic_count: usize,
    pub sections: Vec<DimensionSection>,
    /// How many files the ranking was asked for
    pub top_limit: usize,
    pub top_files: Vec<FileRank>,
}

impl Report {
    /// Build a report from a scan.
    ///
    /// Files are folded in rank order, so ties between equal counts resolve
    /// the same way every time the same file set is scanned.
    pub fn build(result: &ScanResult, options: &ReportOptions) -> Self {
        let ranked = rank_files(&result.files);

        let mut index = CodebaseIndex::from_files(ranked.iter().copied());
        // Files without calls only contribute to the file count.
        index.file_count = result.file_count();

        let top = top_files(&ranked, &result.root, options.top_files);

        let mut report = Self::from_index(&result.call_name, &index, top);
        report.diagnostic_count = result.diagnostics().count();
        report.top_limit = options.top_files;
        report
    }

    /// Build a report from an already folded index and ranking.
    pub fn from_index(call_name: &str, index: &CodebaseIndex, top_files: Vec<FileRank>) -> Self {
        let sections = Dimension::ALL
            .iter()
            .map(|&dimension| DimensionSection {
                dimension,
                rows: index
                    .counts(dimension)
                    .ranked()
                    .into_iter()
                    .map(|(key, count)| ReportRow {
                        label: dimension.row_label(&key),
                        key,
                        count,
                    })
                    .collect(),
            })
            .collect();

        Self {
            call_name: call_name.to_string(),
            file_count: index.file_count,
            files_with_calls: index.files_with_calls,
            call_count: index.call_count,
            diagnostic_count: 0,
            sections,
            top_limit: top_files.len(),
            top_files,
        }
    }

    /// Rows for one dimension.
    pub fn section(&self, dimension: Dimension) -> Option<&DimensionSection> {
        self.sections.iter().find(|s| s.dimension == dimension)
    }
}

/// What a rendered line shows; lets front ends style lines without parsing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// A `<label>: <count>` row of a dimension
    Row,
    /// File count summary
    Summary,
    /// "Top N files:" heading
    Heading,
    /// A ranked file
    File,
    /// A category count under a ranked file
    FileCategory,
}

/// One line of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: LineKind,
    pub text: String,
}

impl ReportLine {
    fn new(kind: LineKind, text: String) -> Self {
        Self { kind, text }
    }

    fn blank() -> Self {
        Self::new(LineKind::Blank, String::new())
    }
}

fn padded(label: &str, count: impl std::fmt::Display) -> String {
    format!("{label:<width$}: {count}", width = LABEL_WIDTH)
}

/// Lay a report out as lines.
pub fn render_lines(report: &Report) -> Vec<ReportLine> {
    let mut lines = Vec::new();

    for section in &report.sections {
        lines.push(ReportLine::blank());
        for row in &section.rows {
            lines.push(ReportLine::new(LineKind::Row, padded(&row.label, row.count)));
        }
    }

    lines.push(ReportLine::blank());
    lines.push(ReportLine::new(
        LineKind::Summary,
        padded("# files", report.file_count),
    ));
    lines.push(ReportLine::new(
        LineKind::Summary,
        padded(
            &format!("# files calling {}", report.call_name),
            report.files_with_calls,
        ),
    ));

    lines.push(ReportLine::blank());
    lines.push(ReportLine::new(
        LineKind::Heading,
        format!("Top {} files:", report.top_limit),
    ));
    for file in &report.top_files {
        lines.push(ReportLine::new(
            LineKind::File,
            format!("  {}: {}", file.path, file.calls),
        ));
        for (category, count) in &file.categories {
            lines.push(ReportLine::new(
                LineKind::FileCategory,
                format!("    {category}: {count}"),
            ));
        }
    }

    lines
}

/// Render a report as plain text, one line per row, newline terminated.
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    for line in render_lines(report) {
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::index::key_label;
    use crate::data::scan::{scan_codebase, ScanOptions};
    use crate::source::{CodebaseProvider, FilterConfig, MemoryProvider};

    fn provider() -> MemoryProvider {
        MemoryProvider::new("/code")
            .with_file(
                "net/socket.c",
                "MDB(info, net) MLog(\"NET: open\");\nMDB(warn, net) MLog(\"NET: fail %d\", e);\nMLog(\"plain text\");\n",
            )
            .with_file("db/query.c", "MDBE(info, db)\n  MLog(\"DB: q\");\n")
            .with_file("util.c", "int helper(void);\n")
    }

    fn report() -> Report {
        let result = scan_codebase(&provider(), &ScanOptions::new()).unwrap();
        Report::build(&result, &ReportOptions::new())
    }

    #[test]
    fn test_header_counts() {
        let report = report();

        assert_eq!(report.file_count, 3);
        assert_eq!(report.files_with_calls, 2);
        assert_eq!(report.call_count, 4);
        assert_eq!(report.diagnostic_count, 0);
    }

    #[test]
    fn test_sections_sorted_by_descending_count() {
        let report = report();
        let level = report.section(Dimension::Level).unwrap();

        let rows: Vec<(&str, u64)> = level
            .rows
            .iter()
            .map(|r| (key_label(&r.key), r.count))
            .collect();
        assert_eq!(rows, vec![("info", 2), ("warn", 1), ("(none)", 1)]);

        let category = report.section(Dimension::Category).unwrap();
        assert_eq!(category.rows[0].key.as_deref(), Some("NET"));
        assert_eq!(category.rows[0].count, 2);
    }

    #[test]
    fn test_top_files_ranked_with_categories() {
        let report = report();

        assert_eq!(report.top_files.len(), 2);
        assert_eq!(report.top_files[0].path, "net/socket.c");
        assert_eq!(report.top_files[0].calls, 3);
        assert_eq!(
            report.top_files[0].categories,
            vec![("NET".to_string(), 2), ("?".to_string(), 1)]
        );
        assert_eq!(report.top_files[1].path, "db/query.c");
    }

    #[test]
    fn test_top_files_limit() {
        let result = scan_codebase(&provider(), &ScanOptions::new()).unwrap();
        let report = Report::build(&result, &ReportOptions::new().top_files(1));

        assert_eq!(report.top_files.len(), 1);
        assert!(render(&report).contains("Top 1 files:"));
    }

    #[test]
    fn test_rendered_text_layout() {
        let text = render(&report());
        let row = |label: &str, n: u64| format!("\n{label:<30}: {n}\n");

        assert!(text.contains(&row("# calls to log NET", 2)));
        assert!(text.contains(&row("# calls with level (none)", 1)));
        assert!(text.contains(&row("# calls filtered by MDBE", 1)));
        assert!(text.contains("\n# files                       : 3\n"));
        assert!(text.contains(&row("# files calling MLog", 2)));
        assert!(text.contains(
            "\nTop 10 files:\n  net/socket.c: 3\n    NET: 2\n    ?: 1\n  db/query.c: 1\n    DB: 1\n"
        ));
        // Each dimension block starts with a blank line.
        assert!(text.starts_with('\n'));
    }

    #[test]
    fn test_counts_line_up_at_column_thirty() {
        for line in render_lines(&report()) {
            if matches!(line.kind, LineKind::Row | LineKind::Summary) {
                assert_eq!(&line.text[30..32], ": ", "{}", line.text);
            }
        }
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let first = render(&report());
        let second = render(&report());

        assert_eq!(first, second);
    }

    #[test]
    fn test_line_kinds() {
        let lines = render_lines(&report());

        assert_eq!(lines[0].kind, LineKind::Blank);
        assert!(lines.iter().any(|l| l.kind == LineKind::Heading));
        assert_eq!(lines.iter().filter(|l| l.kind == LineKind::File).count(), 2);
    }

    #[test]
    fn test_empty_scan_renders() {
        let result = scan_codebase(&MemoryProvider::new("/empty"), &ScanOptions::new()).unwrap();
        let report = Report::build(&result, &ReportOptions::new());
        let text = render(&report);

        assert_eq!(report.call_count, 0);
        assert!(report.sections.iter().all(|s| s.rows.is_empty()));
        assert!(text.contains("# files                       : 0"));
    }

    #[test]
    fn test_single_file_root_is_labelled_by_name() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("one.c");
        std::fs::write(&file, "MLog(\"A: x\");\nMLog(\"A: y\");\n").unwrap();

        let provider = CodebaseProvider::new(&file, FilterConfig::new());
        let result = scan_codebase(&provider, &ScanOptions::new()).unwrap();
        let report = Report::build(&result, &ReportOptions::new());

        assert_eq!(report.top_files[0].path, "one.c");
        assert!(render(&report).contains("\n  one.c: 2\n"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = report();
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();

        assert_eq!(back, report);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sections"][2]["dimension"], "level");
    }
}
