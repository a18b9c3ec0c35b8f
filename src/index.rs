use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::warn;

use crate::constants::tags::TAG_DELIMITER;
use crate::data::{RawTagRow, TagRecord};
use crate::errors::TrialError;
use crate::source::TagSource;
use crate::types::{FileName, Tag};

/// Immutable filename -> tags/category lookup, built fresh per trial request.
///
/// Construction drops malformed rows instead of failing: a row without a
/// filename or without at least one parseable tag is skipped with a warning.
/// Callers must treat an index with no surviving records as a fatal
/// configuration error, which `from_source` surfaces as `EmptySource`.
#[derive(Debug)]
pub struct TagIndex {
    records: IndexMap<FileName, TagRecord>,
    all_tags: BTreeSet<Tag>,
}

impl TagIndex {
    /// Build an index from raw rows, keeping the first row per filename.
    pub fn build(rows: impl IntoIterator<Item = RawTagRow>) -> Self {
        let mut records: IndexMap<FileName, TagRecord> = IndexMap::new();
        let mut all_tags = BTreeSet::new();
        for row in rows {
            let filename = row.filename.trim();
            if filename.is_empty() {
                warn!("dropping tag row without a filename");
                continue;
            }
            let tags: Vec<Tag> = row
                .tags
                .split(TAG_DELIMITER)
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
            if tags.is_empty() {
                warn!(filename, "dropping tag row without tags");
                continue;
            }
            if records.contains_key(filename) {
                warn!(filename, "dropping duplicate tag row");
                continue;
            }
            let category = row
                .category
                .as_deref()
                .map(str::trim)
                .filter(|category| !category.is_empty())
                .map(str::to_string);
            all_tags.extend(tags.iter().cloned());
            if let Some(category) = &category {
                all_tags.insert(category.clone());
            }
            records.insert(
                filename.to_string(),
                TagRecord {
                    filename: filename.to_string(),
                    category,
                    tags,
                },
            );
        }
        Self { records, all_tags }
    }

    /// Load rows from a source and build an index, rejecting empty results.
    pub fn from_source(source: &dyn TagSource) -> Result<Self, TrialError> {
        let index = Self::build(source.rows()?);
        if index.is_empty() {
            return Err(TrialError::EmptySource);
        }
        Ok(index)
    }

    /// True when no usable rows survived construction.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Look up the record for `filename`.
    pub fn record(&self, filename: &str) -> Option<&TagRecord> {
        self.records.get(filename)
    }

    /// Iterate records in table order.
    pub fn records(&self) -> impl Iterator<Item = &TagRecord> {
        self.records.values()
    }

    /// Union of every record's tags and every non-empty category.
    pub fn all_tags(&self) -> &BTreeSet<Tag> {
        &self.all_tags
    }

    /// True when `tag` is known to the index (as a tag or a category).
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.all_tags.contains(tag)
    }

    /// Filenames whose tags or category carry `tag`, in table order.
    pub fn filenames_with_tag(&self, tag: &str) -> Vec<FileName> {
        self.records
            .values()
            .filter(|record| record.has_tag(tag))
            .map(|record| record.filename.clone())
            .collect()
    }
}
