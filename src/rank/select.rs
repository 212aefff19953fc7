//! Top-K selection.

use crate::model::{RankedSection, Section};

/// Orders scored sections and keeps the best K.
#[derive(Debug, Clone, Copy)]
pub struct RankSelector {
    top_k: usize,
}

impl RankSelector {
    /// Create a selector keeping at most `top_k` sections.
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Sort by total score, highest first, and rank the first K as 1..K.
    ///
    /// The sort is stable, so equal scores keep harvest order and still get
    /// distinct consecutive ranks.
    pub fn select(&self, mut sections: Vec<Section>) -> Vec<RankedSection> {
        sections.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
        sections.truncate(self.top_k);

        sections
            .into_iter()
            .zip(1..)
            .map(|(section, importance_rank)| RankedSection {
                section,
                importance_rank,
            })
            .collect()
    }
}

impl Default for RankSelector {
    fn default() -> Self {
        Self::new(5)
    }
}
