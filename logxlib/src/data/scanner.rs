//! Locate target call occurrences in a file's text.
//!
//! A single regex finds every `<call>(` at a word boundary, optionally
//! preceded by a wrapper invocation such as `MDB(level, facility)`. The
//! wrapper is only attached when nothing but whitespace separates its closing
//! parenthesis from the call name; if a statement or a brace intervenes the
//! call is still found, just without a wrapper.

use regex::Regex;

use crate::error::LogxError;
use crate::Result;

/// Default name of the logging call being audited.
pub const DEFAULT_CALL: &str = "MLog";

/// Default pattern for wrapper macro names.
pub const DEFAULT_WRAPPER: &str = "MDB[EO]?";

/// A wrapper macro attached to a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper {
    /// Wrapper macro name, e.g. `MDBE`
    pub name: String,
    /// Raw text between the wrapper's parentheses
    pub args: String,
}

/// One occurrence of the target call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMatch {
    /// Start of the match (the wrapper when attached, else the call name)
    pub start: usize,
    /// Byte offset of the call name
    pub name_offset: usize,
    pub wrapper: Option<Wrapper>,
}

/// Finds calls to one named function, with an optional preceding wrapper.
///
/// The pattern is compiled once and reused for every file.
#[derive(Debug, Clone)]
pub struct CallScanner {
    call_name: String,
    pattern: Regex,
}

impl CallScanner {
    /// Build a scanner for `call_name` with wrappers matching `wrapper_pattern`.
    ///
    /// The call name is matched literally; the wrapper pattern is a regex
    /// fragment for the wrapper's name.
    pub fn new(call_name: &str, wrapper_pattern: &str) -> Result<Self> {
        if call_name.trim().is_empty() {
            return Err(LogxError::InvalidPattern {
                pattern: call_name.to_string(),
                message: "call name is empty".to_string(),
            });
        }
        if wrapper_pattern.is_empty() {
            return Err(LogxError::InvalidPattern {
                pattern: wrapper_pattern.to_string(),
                message: "wrapper pattern is empty".to_string(),
            });
        }

        // The fragment is spliced into a larger pattern, so it must stand alone.
        let invalid = |e: regex::Error| LogxError::InvalidPattern {
            pattern: wrapper_pattern.to_string(),
            message: e.to_string(),
        };
        Regex::new(&format!("^(?:{wrapper_pattern})$")).map_err(invalid)?;

        let source = format!(
            r"(?s)(?:\b(?P<wname>{wrapper})\s*\((?P<wargs>[^)]*?)\)\s*|\b)(?P<call>{call})\s*\(",
            wrapper = wrapper_pattern,
            call = regex::escape(call_name.trim()),
        );
        let pattern = Regex::new(&source).map_err(invalid)?;

        Ok(Self {
            call_name: call_name.trim().to_string(),
            pattern,
        })
    }

    /// Name of the call this scanner looks for.
    pub fn call_name(&self) -> &str {
        &self.call_name
    }

    /// Every occurrence of the call in `text`, in order of appearance.
    pub fn scan(&self, text: &str) -> Vec<CallMatch> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let call = caps.name("call")?;
                let wrapper = caps.name("wname").map(|name| Wrapper {
                    name: name.as_str().trim().to_string(),
                    args: caps
                        .name("wargs")
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default(),
                });
                Some(CallMatch {
                    start: whole.start(),
                    name_offset: call.start(),
                    wrapper,
                })
            })
            .collect()
    }
}
