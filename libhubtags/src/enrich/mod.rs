//! Derived display fields for tag rows.
//!
//! Before a row reaches a report it gets a human-readable size and the list
//! of architectures worth showing: one entry per normalized label, first
//! occurrence wins, minus the excluded labels.

use crate::format::format_optional_size;
use crate::model::{Architecture, ResultRow};
use std::collections::{BTreeSet, HashSet};

#[cfg(test)]
mod tests;

/// Label used for rows that carry no image list.
pub const FALLBACK_ARCHITECTURE: &str = "x86_64";

/// Architecture labels omitted from summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    labels: BTreeSet<String>,
}

impl ExclusionSet {
    /// An exclusion set that hides nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if `label` should be hidden.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Attaches derived fields to rows.
///
/// # Examples
///
/// ```
/// use libhubtags::enrich::{Enricher, ExclusionSet};
/// use libhubtags::model::{ImageVariant, ResultRow};
///
/// let enricher = Enricher::new(ExclusionSet::from_iter(["arm/v7"]));
/// let mut arm = ImageVariant::new("arm", Some(1));
/// arm.variant = Some("v7".to_string());
/// let row = ResultRow::new("1.0", Some(2048)).with_images(vec![
///     ImageVariant::new("amd64", Some(2048)),
///     arm,
/// ]);
///
/// let row = enricher.enrich(row);
/// assert_eq!(row.size_display, "2.00KB");
/// assert_eq!(row.architectures.len(), 1);
/// assert_eq!(row.architectures[0].label, "amd64");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Enricher {
    excluded: ExclusionSet,
}

impl Enricher {
    pub fn new(excluded: ExclusionSet) -> Self {
        Self { excluded }
    }

    /// The exclusion set this enricher filters with.
    pub fn excluded(&self) -> &ExclusionSet {
        &self.excluded
    }

    /// Returns the row with `size_display` and `architectures` filled in.
    ///
    /// Identity fields (`name`, `full_size`, `last_updated`, `images`) are
    /// left untouched.
    pub fn enrich(&self, mut row: ResultRow) -> ResultRow {
        row.size_display = format_optional_size(row.full_size);
        row.architectures = self.architectures(&row);
        row
    }

    fn architectures(&self, row: &ResultRow) -> Vec<Architecture> {
        let candidates: Vec<Architecture> = match row.images.as_deref() {
            Some(images) if !images.is_empty() => images
                .iter()
                .map(|image| Architecture::new(image.label(), image.size))
                .collect(),
            _ => vec![Architecture::new(FALLBACK_ARCHITECTURE, row.full_size)],
        };

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|arch| seen.insert(arch.label.clone()))
            .filter(|arch| !self.excluded.contains(&arch.label))
            .collect()
    }
}
