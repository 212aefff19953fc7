//! Font-size histogram and the per-document size rank derived from it.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::HeadingThresholds;
use crate::model::{HeadingLevel, TextLine};

/// A font size usable as an ordered map key.
///
/// Ordering follows [`f32::total_cmp`], so every size (including odd values
/// coming out of broken text matrices) has a well-defined place.
#[derive(Debug, Clone, Copy)]
pub struct FontSize(pub f32);

impl PartialEq for FontSize {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FontSize {}

impl PartialOrd for FontSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FontSize {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Occurrence count per distinct font size.
#[derive(Debug, Clone, Default)]
pub struct FontHistogram {
    counts: BTreeMap<FontSize, usize>,
}

impl FontHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate the representative sizes of `lines`.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a TextLine>,
    {
        let mut histogram = Self::new();
        for line in lines {
            histogram.add(line.font_size);
        }
        histogram
    }

    /// Record one observation of `size`.
    pub fn add(&mut self, size: f32) {
        if size.is_nan() {
            log::debug!("Ignoring NaN font size");
            return;
        }
        *self.counts.entry(FontSize(size)).or_insert(0) += 1;
    }

    /// How often `size` was observed.
    pub fn count(&self, size: f32) -> usize {
        self.counts.get(&FontSize(size)).copied().unwrap_or(0)
    }

    /// Number of distinct sizes.
    pub fn distinct_sizes(&self) -> usize {
        self.counts.len()
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Rank sizes by (size desc, count desc) and keep the top four.
    pub fn size_rank(&self) -> SizeRank {
        let mut entries: Vec<(f32, usize)> = self.counts.iter().map(|(s, c)| (s.0, *c)).collect();
        entries.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

        SizeRank {
            sizes: entries
                .into_iter()
                .take(HeadingLevel::ALL.len())
                .map(|(size, _)| size)
                .collect(),
        }
    }
}

/// Up to four sizes mapped positionally to H1..H4.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeRank {
    sizes: Vec<f32>,
}

impl SizeRank {
    /// Ranked sizes, largest first.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// The size ranked for `level`, if the document has that many distinct sizes.
    pub fn size_for(&self, level: HeadingLevel) -> Option<f32> {
        self.sizes.get(level.index()).copied()
    }

    /// Thresholds for classification: ranked sizes override `defaults` slot by slot.
    pub fn thresholds(&self, defaults: &HeadingThresholds) -> HeadingThresholds {
        let mut thresholds = defaults.clone();
        for level in HeadingLevel::ALL {
            if let Some(size) = self.size_for(level) {
                thresholds.set(level, size);
            }
        }
        thresholds
    }
}
