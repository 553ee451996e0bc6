//! Derive level, facility, filter function and category for a call site.

use regex::Regex;

use crate::error::LogxError;
use crate::Result;

use super::diagnostic::DiagnosticKind;
use super::scanner::Wrapper;

/// Category reported when no label could be extracted.
pub const UNKNOWN_CATEGORY: &str = "?";

/// Fields taken from a call's wrapper macro.
///
/// Every field is `None` when there is no wrapper; an empty string is a real
/// (if odd) value and is never used to mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub level: Option<String>,
    pub facility: Option<String>,
    pub filter_function: Option<String>,
}

/// Classifies call sites. Owns the label pattern so it is compiled once.
#[derive(Debug, Clone)]
pub struct Classifier {
    label: Regex,
}

const LABEL_PATTERN: &str = r"\(\s*(.*?)[%\t, :]";

impl Classifier {
    pub fn new() -> Result<Self> {
        let label = Regex::new(LABEL_PATTERN).map_err(|e| LogxError::InvalidPattern {
            pattern: LABEL_PATTERN.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { label })
    }

    /// Split a wrapper's arguments into level (first field) and facility
    /// (last field). Fewer than two fields yields a diagnostic and leaves both
    /// absent; the filter function is the wrapper's name either way.
    pub fn classify(&self, wrapper: Option<&Wrapper>) -> (Classification, Option<DiagnosticKind>) {
        let Some(wrapper) = wrapper else {
            return (Classification::default(), None);
        };

        let mut classification = Classification {
            filter_function: Some(wrapper.name.trim().to_string()),
            ..Classification::default()
        };

        let args = wrapper.args.trim();
        let fields: Vec<&str> = if args.is_empty() {
            Vec::new()
        } else {
            args.split(',').map(str::trim).collect()
        };

        if fields.len() < 2 {
            let diagnostic = DiagnosticKind::TooFewWrapperFields {
                text: args.to_string(),
            };
            return (classification, Some(diagnostic));
        }

        classification.level = fields.first().map(|s| s.to_string());
        classification.facility = fields.last().map(|s| s.to_string());
        (classification, None)
    }

    /// Extract the all-uppercase label that conventionally opens a log message.
    ///
    /// The first `(`-opened token after `name_offset` is taken, up to the first
    /// `%`, tab, comma, space or colon. It counts only if it starts before the
    /// statement ends, opens with a quote, and the rest is uppercase ASCII
    /// letters (a closing quote is allowed). The search is positional: it is
    /// not bound to the call's own first argument.
    pub fn described_category(
        &self,
        text: &str,
        name_offset: usize,
        end_offset: Option<usize>,
    ) -> String {
        let Some(end) = end_offset else {
            return UNKNOWN_CATEGORY.to_string();
        };
        if name_offset > text.len() {
            return UNKNOWN_CATEGORY.to_string();
        }

        let Some(caps) = self.label.captures_at(text, name_offset) else {
            return UNKNOWN_CATEGORY.to_string();
        };
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            return UNKNOWN_CATEGORY.to_string();
        };
        if whole.start() >= end {
            return UNKNOWN_CATEGORY.to_string();
        }

        let Some(rest) = label.as_str().strip_prefix('"') else {
            return UNKNOWN_CATEGORY.to_string();
        };
        let rest = rest.strip_suffix('"').unwrap_or(rest);

        // A bare `?` label is the sentinel itself, so it passes through unchanged.
        if is_valid_category(rest) {
            rest.to_string()
        } else {
            UNKNOWN_CATEGORY.to_string()
        }
    }
}

/// True if `category` is the unknown sentinel or a run of uppercase ASCII.
pub fn is_valid_category(category: &str) -> bool {
    category == UNKNOWN_CATEGORY
        || (!category.is_empty() && category.bytes().all(|b| b.is_ascii_uppercase()))
}
