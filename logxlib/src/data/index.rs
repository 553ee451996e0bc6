//! Per-file grouping of call sites.
//!
//! A [`FileIndex`] owns the call sites found in one file and groups them
//! along four independent dimensions. Groupings keep insertion order within
//! each bucket and first-seen order across buckets, so reports built from
//! them are deterministic.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::callsite::CallSite;
use super::diagnostic::Diagnostic;

/// Grouping key. `None` is the bucket for sites where the value is absent,
/// which is never the same bucket as `Some("")`.
pub type GroupKey = Option<String>;

/// Label used for the absent bucket in reports.
pub const NONE_LABEL: &str = "(none)";

/// Render a key for display.
pub fn key_label(key: &GroupKey) -> &str {
    key.as_deref().unwrap_or(NONE_LABEL)
}

/// The four ways call sites are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Category,
    Facility,
    Level,
    FilterFunction,
}

impl Dimension {
    /// All dimensions, in report order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Category,
        Dimension::Facility,
        Dimension::Level,
        Dimension::FilterFunction,
    ];

    /// Row label for a key in this dimension, e.g. `# calls to facility net`.
    pub fn row_label(&self, key: &GroupKey) -> String {
        let key = key_label(key);
        match self {
            Dimension::Category => format!("# calls to log {key}"),
            Dimension::Facility => format!("# calls to facility {key}"),
            Dimension::Level => format!("# calls with level {key}"),
            Dimension::FilterFunction => format!("# calls filtered by {key}"),
        }
    }

    /// The key a call site falls under in this dimension.
    pub fn key_of(&self, site: &CallSite) -> GroupKey {
        match self {
            Dimension::Category => Some(site.described_category().to_string()),
            Dimension::Facility => site.facility.clone(),
            Dimension::Level => site.level.clone(),
            Dimension::FilterFunction => site.filter_function.clone(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Category => "category",
            Dimension::Facility => "facility",
            Dimension::Level => "level",
            Dimension::FilterFunction => "filter function",
        };
        f.write_str(name)
    }
}

/// Ordered multimap from key to the indices of the sites sharing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    order: Vec<GroupKey>,
    buckets: HashMap<GroupKey, Vec<usize>>,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a site index to the bucket for `key`.
    pub fn push(&mut self, key: GroupKey, site: usize) {
        match self.buckets.get_mut(&key) {
            Some(bucket) => bucket.push(site),
            None => {
                self.order.push(key.clone());
                self.buckets.insert(key, vec![site]);
            }
        }
    }

    /// Site indices for `key`, empty if the key was never seen.
    pub fn get(&self, key: &GroupKey) -> &[usize] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of sites under `key`.
    pub fn count(&self, key: &GroupKey) -> usize {
        self.get(key).len()
    }

    /// Buckets in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[usize])> + '_ {
        self.order.iter().map(move |key| (key, self.get(key)))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Call sites of one file, grouped four ways. Immutable once built.
#[derive(Debug, Clone)]
pub struct FileIndex {
    path: PathBuf,
    sites: Vec<CallSite>,
    by_category: Grouping,
    by_facility: Grouping,
    by_level: Grouping,
    by_filter_function: Grouping,
    diagnostics: Vec<Diagnostic>,
}

impl FileIndex {
    /// Build the index in one pass over `sites`.
    ///
    /// Categories are read from each site's memoized value, so sites should
    /// have been described before indexing.
    pub fn new(
        path: impl Into<PathBuf>,
        sites: Vec<CallSite>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let mut by_category = Grouping::new();
        let mut by_facility = Grouping::new();
        let mut by_level = Grouping::new();
        let mut by_filter_function = Grouping::new();

        for (i, site) in sites.iter().enumerate() {
            by_category.push(Dimension::Category.key_of(site), i);
            by_facility.push(Dimension::Facility.key_of(site), i);
            by_level.push(Dimension::Level.key_of(site), i);
            by_filter_function.push(Dimension::FilterFunction.key_of(site), i);
        }

        Self {
            path: path.into(),
            sites,
            by_category,
            by_facility,
            by_level,
            by_filter_function,
            diagnostics,
        }
    }

    /// An index with no call sites, e.g. for a file that could not be read.
    pub fn empty(path: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(path, Vec::new(), diagnostics)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sites(&self) -> &[CallSite] {
        &self.sites
    }

    pub fn call_count(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn grouping(&self, dimension: Dimension) -> &Grouping {
        match dimension {
            Dimension::Category => &self.by_category,
            Dimension::Facility => &self.by_facility,
            Dimension::Level => &self.by_level,
            Dimension::FilterFunction => &self.by_filter_function,
        }
    }

    pub fn by_category(&self) -> &Grouping {
        &self.by_category
    }

    pub fn by_facility(&self) -> &Grouping {
        &self.by_facility
    }

    pub fn by_level(&self) -> &Grouping {
        &self.by_level
    }

    pub fn by_filter_function(&self) -> &Grouping {
        &self.by_filter_function
    }

    /// Sites under `key` in `dimension`, in file order.
    pub fn sites_for<'a>(
        &'a self,
        dimension: Dimension,
        key: &GroupKey,
    ) -> impl Iterator<Item = &'a CallSite> + 'a {
        self.grouping(dimension)
            .get(key)
            .iter()
            .filter_map(move |&i| self.sites.get(i))
    }

    /// Category → number of sites, in first-seen order.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        self.by_category
            .iter()
            .map(|(key, sites)| (key_label(key).to_string(), sites.len()))
            .collect()
    }
}
