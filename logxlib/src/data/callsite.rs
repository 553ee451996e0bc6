//! One located, parsed and classified call.

use std::ops::Range;
use std::sync::OnceLock;

use super::classifier::{Classification, Classifier, UNKNOWN_CATEGORY};
use super::parser::ParsedCall;
use super::scanner::{CallMatch, Wrapper};

/// A single occurrence of the target call.
///
/// Offsets are byte offsets into the file's text. `end_offset` is exclusive
/// and includes the statement terminator; `None` means no terminator was
/// found. The described category is computed at most once per site.
#[derive(Debug, Clone)]
pub struct CallSite {
    pub start_offset: usize,
    pub name_offset: usize,
    pub end_offset: Option<usize>,
    pub arguments: Vec<Range<usize>>,
    pub wrapper: Option<Wrapper>,
    pub level: Option<String>,
    pub facility: Option<String>,
    pub filter_function: Option<String>,
    category: OnceLock<String>,
}

impl CallSite {
    pub fn new(found: CallMatch, parsed: ParsedCall, classification: Classification) -> Self {
        Self {
            start_offset: found.start,
            name_offset: found.name_offset,
            end_offset: parsed.end_offset,
            arguments: parsed.arguments,
            wrapper: found.wrapper,
            level: classification.level,
            facility: classification.facility,
            filter_function: classification.filter_function,
            category: OnceLock::new(),
        }
    }

    /// Compute the described category from the file's text, once.
    pub fn describe(&self, text: &str, classifier: &Classifier) -> &str {
        self.category
            .get_or_init(|| classifier.described_category(text, self.name_offset, self.end_offset))
    }

    /// The memoized category, or `"?"` if [`describe`](Self::describe) has not run.
    pub fn described_category(&self) -> &str {
        self.category
            .get()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    /// The statement text, when its end was resolved.
    pub fn statement<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start_offset..self.end_offset?)
    }

    /// The text of each top-level argument.
    pub fn argument_texts<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.arguments
            .iter()
            .filter_map(|r| text.get(r.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parser::{parse_call, DEFAULT_MAX_ARGUMENTS};
    use crate::data::scanner::{CallScanner, DEFAULT_CALL, DEFAULT_WRAPPER};

    fn site(text: &str) -> CallSite {
        let scanner = CallScanner::new(DEFAULT_CALL, DEFAULT_WRAPPER).unwrap();
        let classifier = Classifier::new().unwrap();
        let found = scanner.scan(text).remove(0);
        let parsed = parse_call(text, found.name_offset, DEFAULT_MAX_ARGUMENTS);
        let (classification, _) = classifier.classify(found.wrapper.as_ref());
        CallSite::new(found, parsed, classification)
    }

    #[test]
    fn test_category_is_memoized() {
        let text = "MDB(info, net) MLog(\"NET: up %d\", n);";
        let site = site(text);
        let classifier = Classifier::new().unwrap();

        assert_eq!(site.described_category(), UNKNOWN_CATEGORY);
        assert_eq!(site.describe(text, &classifier), "NET");
        // A different text no longer changes the memoized value.
        assert_eq!(site.describe("MLog(\"OTHER: x\");", &classifier), "NET");
        assert_eq!(site.described_category(), "NET");
    }

    #[test]
    fn test_statement_covers_wrapper_and_terminator() {
        let text = "x; MDB(info, net)\n  MLog(\"A\", 1); y;";
        let site = site(text);

        assert_eq!(
            site.statement(text),
            Some("MDB(info, net)\n  MLog(\"A\", 1);")
        );
        assert!(site.end_offset.unwrap() > site.start_offset);
        assert_eq!(site.argument_texts(text), vec!["\"A\"", " 1"]);
        assert_eq!(site.level.as_deref(), Some("info"));
    }

    #[test]
    fn test_unresolved_statement() {
        let text = "MLog(\"A\")";
        let site = site(text);

        assert_eq!(site.end_offset, None);
        assert_eq!(site.statement(text), None);
    }
}
