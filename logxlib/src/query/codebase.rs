//! Codebase-wide counts folded from per-file indices.
//!
//! [`CodebaseIndex`] keeps only integers: it never refers back to call sites
//! or source text, so it can be rebuilt at any time from the file indices and
//! two snapshots can be merged in any order with the same result.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::index::{key_label, Dimension, FileIndex, GroupKey};

/// Ordered key → count map.
///
/// Iteration follows first-seen order. Equality ignores that order, so two
/// counts built from the same files folded differently compare equal.
#[derive(Debug, Clone, Default)]
pub struct Counts {
    entries: Vec<(GroupKey, u64)>,
    index: HashMap<GroupKey, usize>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` to the count for `key`.
    pub fn add(&mut self, key: &GroupKey, n: u64) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key.clone(), n));
            }
        }
    }

    /// Count for `key`, zero if never seen.
    pub fn get(&self, key: &GroupKey) -> u64 {
        self.index
            .get(key)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    /// Add every count from `other`.
    pub fn merge(&mut self, other: &Counts) {
        for (key, n) in &other.entries {
            self.add(key, *n);
        }
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, u64)> + '_ {
        self.entries.iter().map(|(k, n)| (k, *n))
    }

    /// Entries by descending count; ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(GroupKey, u64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Counts {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, n)| other.get(k) == n)
    }
}

impl Eq for Counts {}

/// Codebase-level counts along the four dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodebaseIndex {
    /// Files folded in, with or without calls
    pub file_count: usize,
    /// Files with at least one call
    pub files_with_calls: usize,
    /// Total call sites
    pub call_count: u64,
    pub by_category: Counts,
    pub by_facility: Counts,
    pub by_level: Counts,
    pub by_filter_function: Counts,
}

impl CodebaseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the given files, in order.
    pub fn from_files<'a>(files: impl IntoIterator<Item = &'a FileIndex>) -> Self {
        let mut index = Self::new();
        for file in files {
            index.include(file);
        }
        index
    }

    /// Add one file's bucket sizes.
    pub fn include(&mut self, file: &FileIndex) {
        self.file_count += 1;
        if file.is_empty() {
            return;
        }
        self.files_with_calls += 1;
        self.call_count += file.call_count() as u64;

        for dimension in Dimension::ALL {
            let counts = self.counts_mut(dimension);
            for (key, sites) in file.grouping(dimension).iter() {
                counts.add(key, sites.len() as u64);
            }
        }
    }

    /// Combine with another snapshot.
    pub fn merge(&mut self, other: &CodebaseIndex) {
        self.file_count += other.file_count;
        self.files_with_calls += other.files_with_calls;
        self.call_count += other.call_count;
        for dimension in Dimension::ALL {
            self.counts_mut(dimension).merge(other.counts(dimension));
        }
    }

    pub fn counts(&self, dimension: Dimension) -> &Counts {
        match dimension {
            Dimension::Category => &self.by_category,
            Dimension::Facility => &self.by_facility,
            Dimension::Level => &self.by_level,
            Dimension::FilterFunction => &self.by_filter_function,
        }
    }

    fn counts_mut(&mut self, dimension: Dimension) -> &mut Counts {
        match dimension {
            Dimension::Category => &mut self.by_category,
            Dimension::Facility => &mut self.by_facility,
            Dimension::Level => &mut self.by_level,
            Dimension::FilterFunction => &mut self.by_filter_function,
        }
    }
}

/// One entry of the busiest-files ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRank {
    /// Path relative to the scan root
    pub path: String,
    /// Call sites in the file
    pub calls: usize,
    /// Category → count for this file, in first-seen order
    pub categories: Vec<(String, usize)>,
}

/// Files with at least one call, by descending call count. Ties keep the
/// input order, which for a scan is sorted path order.
pub fn rank_files(files: &[FileIndex]) -> Vec<&FileIndex> {
    let mut ranked: Vec<&FileIndex> = files.iter().filter(|f| !f.is_empty()).collect();
    ranked.sort_by(|a, b| b.call_count().cmp(&a.call_count()));
    ranked
}

/// Describe the first `limit` ranked files.
pub fn top_files(ranked: &[&FileIndex], root: &Path, limit: usize) -> Vec<FileRank> {
    ranked
        .iter()
        .take(limit)
        .map(|file| FileRank {
            path: relative_path_label(file.path(), root),
            calls: file.call_count(),
            categories: file
                .by_category()
                .iter()
                .map(|(key, sites)| (key_label(key).to_string(), sites.len()))
                .collect(),
        })
        .collect()
}

/// Path relative to the root, falling back to the full path if strip fails.
/// When the root is the file itself, the file name is used.
fn relative_path_label(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string()),
        Ok(rel) => rel.to_string_lossy().to_string(),
        Err(_) => path.to_string_lossy().to_string(),
    }
}
