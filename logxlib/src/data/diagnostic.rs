//! Non-fatal findings raised while scanning.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What went wrong at a call site or file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Wrapper arguments split into fewer than two fields; level and facility are left absent.
    TooFewWrapperFields { text: String },
    /// No statement terminator was found after the call.
    UnresolvedTerminator,
    /// The call had more top-level arguments than the threshold; argument tracking was abandoned.
    ArgumentOverflow { threshold: usize },
    /// The file could not be read.
    FileRead { message: String },
}

/// A finding tied to a file and, when known, a byte offset in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub offset: Option<usize>,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(path: impl Into<PathBuf>, offset: Option<usize>, kind: DiagnosticKind) -> Self {
        Self {
            path: path.into(),
            offset,
            kind,
        }
    }

    /// Emit this diagnostic through `tracing`.
    pub(crate) fn log(&self) {
        tracing::warn!(path = %self.path.display(), offset = ?self.offset, "{}", self.kind);
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewWrapperFields { text } => {
                write!(f, "wrapper arguments '{text}' have fewer than two fields")
            }
            Self::UnresolvedTerminator => write!(f, "call has no statement terminator"),
            Self::ArgumentOverflow { threshold } => write!(
                f,
                "call has more than {threshold} arguments; falling back to terminator search"
            ),
            Self::FileRead { message } => write!(f, "unable to read file: {message}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{}@{}: {}", self.path.display(), offset, self.kind),
            None => write!(f, "{}: {}", self.path.display(), self.kind),
        }
    }
}
