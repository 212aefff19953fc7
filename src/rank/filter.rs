//! Boilerplate filtering and keyword priority.

use crate::config::RankOptions;
use crate::model::Section;

/// Drops boilerplate sections and scores titles by priority keywords.
#[derive(Debug, Clone)]
pub struct SectionFilter {
    priority_keywords: Vec<String>,
    ignored_titles: Vec<String>,
}

impl SectionFilter {
    /// Create a filter from explicit keyword and boilerplate lists.
    ///
    /// Entries are trimmed and lower-cased; empty keywords are dropped.
    pub fn new(priority_keywords: Vec<String>, ignored_titles: Vec<String>) -> Self {
        Self {
            priority_keywords: priority_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            ignored_titles: ignored_titles
                .iter()
                .map(|t| t.trim().to_lowercase())
                .collect(),
        }
    }

    /// Create a filter from rank options.
    pub fn from_options(options: &RankOptions) -> Self {
        Self::new(
            options.priority_keywords.clone(),
            options.ignored_titles.clone(),
        )
    }

    /// Whether a title is empty or on the boilerplate list.
    pub fn is_boilerplate(&self, title: &str) -> bool {
        let title = title.trim().to_lowercase();
        title.is_empty() || self.ignored_titles.iter().any(|t| *t == title)
    }

    /// Number of keyword list entries found in the lower-cased title.
    pub fn priority_score(&self, title: &str) -> u32 {
        let title = title.to_lowercase();
        self.priority_keywords
            .iter()
            .filter(|kw| title.contains(kw.as_str()))
            .count() as u32
    }

    /// Drop boilerplate sections and set the priority score of the rest.
    pub fn apply(&self, sections: Vec<Section>) -> Vec<Section> {
        let before = sections.len();
        let kept: Vec<Section> = sections
            .into_iter()
            .filter(|s| !self.is_boilerplate(&s.section_title))
            .map(|mut s| {
                s.priority_score = self.priority_score(&s.section_title);
                s
            })
            .collect();
        log::debug!("Kept {} of {} sections", kept.len(), before);
        kept
    }
}

impl Default for SectionFilter {
    fn default() -> Self {
        Self::from_options(&RankOptions::default())
    }
}
