//! Report rendering for CLI output

use console::Style;
use logxlib::{render_lines, LineKind, Report};

/// How the report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Aligned text, headings bold on a terminal
    #[default]
    Text,
    /// The serialized report
    Json,
}

impl OutputMode {
    /// Parse a `--output` value; anything unknown falls back to text.
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => OutputMode::Json,
            _ => OutputMode::Text,
        }
    }
}

/// Render a report in the given mode, newline terminated.
pub fn render_report(report: &Report, mode: OutputMode) -> Result<String, anyhow::Error> {
    match mode {
        OutputMode::Json => {
            let mut out = serde_json::to_string_pretty(report)?;
            out.push('\n');
            Ok(out)
        }
        OutputMode::Text => Ok(render_text(report)),
    }
}

/// Plain-text layout with headings styled. `console` drops the styling
/// when stdout is not a terminal.
fn render_text(report: &Report) -> String {
    let heading = Style::new().bold();

    let mut out = String::new();
    for line in render_lines(report) {
        match line.kind {
            LineKind::Heading | LineKind::Summary => {
                out.push_str(&heading.apply_to(&line.text).to_string())
            }
            _ => out.push_str(&line.text),
        }
        out.push('\n');
    }
    out
}
