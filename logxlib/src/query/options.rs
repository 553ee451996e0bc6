//! Options controlling how a report is assembled.

use serde::{Deserialize, Serialize};

/// Files listed in the busiest-files section by default.
pub const DEFAULT_TOP_FILES: usize = 10;

/// Report configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// How many of the busiest files to list
    pub top_files: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_files: DEFAULT_TOP_FILES,
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the number of files listed.
    pub fn top_files(mut self, n: usize) -> Self {
        self.top_files = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_ten_files() {
        assert_eq!(ReportOptions::new().top_files, 10);
        assert_eq!(ReportOptions::new().top_files(3).top_files, 3);
    }
}
