//! Argument and statement-end parsing for a located call.
//!
//! This is a character scan, not a grammar: it tracks string literals
//! (`"` with `\` escapes) and parenthesis depth, which is enough to find the
//! call's top-level argument spans and the `;` that ends its statement even
//! when the call spans lines or its strings contain parentheses.

use std::ops::Range;

/// Arguments tracked per call before the scan gives up on them.
pub const DEFAULT_MAX_ARGUMENTS: usize = 20;

const TERMINATOR: u8 = b';';

/// Result of parsing one call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCall {
    /// Top-level argument spans, excluding the separating commas.
    pub arguments: Vec<Range<usize>>,
    /// One past the statement terminator, if one was found.
    pub end_offset: Option<usize>,
    /// Set when the argument threshold was exceeded and the scan fell back to
    /// the first terminator after the call name.
    pub fallback: bool,
}

/// Parse the call whose name starts at `name_offset`.
///
/// Scanning starts at the first `(` at or after `name_offset`. Once more than
/// `max_arguments` top-level arguments have been seen, argument tracking is
/// abandoned: `arguments` is left empty and `end_offset` comes from the first
/// terminator after `name_offset`. This bounds the work done on text whose
/// parentheses never balance.
pub fn parse_call(text: &str, name_offset: usize, max_arguments: usize) -> ParsedCall {
    let bytes = text.as_bytes();
    let open = match bytes
        .get(name_offset..)
        .and_then(|rest| rest.iter().position(|&b| b == b'('))
    {
        Some(pos) => name_offset + pos,
        None => return ParsedCall::default(),
    };

    let mut arguments = Vec::new();
    let mut arg_start = open + 1;
    let mut depth = 1usize;
    let mut in_quote = false;
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => in_quote = !in_quote,
            b'\\' if in_quote => {
                // The escaped byte is consumed whatever it is.
                i += 1;
            }
            b'(' if !in_quote => depth += 1,
            b')' if !in_quote => {
                depth -= 1;
                if depth == 0 {
                    if !arguments.is_empty() || !is_blank(&bytes[arg_start..i]) {
                        arguments.push(arg_start..i);
                    }
                    return ParsedCall {
                        arguments,
                        end_offset: find_terminator(bytes, i + 1),
                        fallback: false,
                    };
                }
            }
            b',' if !in_quote && depth == 1 => {
                arguments.push(arg_start..i);
                arg_start = i + 1;
                // The comma opens another argument, so `len + 1` have been seen.
                if arguments.len() + 1 > max_arguments {
                    return ParsedCall {
                        arguments: Vec::new(),
                        end_offset: find_terminator(bytes, name_offset),
                        fallback: true,
                    };
                }
            }
            _ => {}
        }
        i += 1;
    }

    // Ran off the end with the argument list still open.
    ParsedCall {
        arguments,
        end_offset: None,
        fallback: false,
    }
}

fn find_terminator(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == TERMINATOR)
        .map(|pos| from + pos + 1)
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| b.is_ascii_whitespace())
}
