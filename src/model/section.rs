//! Page-level sections used by the ranking pipeline.

use serde::{Deserialize, Serialize};

/// One page of one document, with its derived title and scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Document identifier (manifest filename)
    pub document: String,

    /// 1-based page number
    pub page_number: u32,

    /// First text line of the page, at most 80 characters
    pub section_title: String,

    /// Page text with whitespace runs collapsed
    pub raw_text: String,

    /// Number of priority keywords found in the title
    pub priority_score: u32,

    /// Cosine similarity against the query
    pub similarity_score: f64,

    /// `similarity_score + priority_score`
    pub total_score: f64,
}

impl Section {
    /// Create an unscored section.
    pub fn new(
        document: impl Into<String>,
        page_number: u32,
        section_title: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            document: document.into(),
            page_number,
            section_title: section_title.into(),
            raw_text: raw_text.into(),
            priority_score: 0,
            similarity_score: 0.0,
            total_score: 0.0,
        }
    }

    /// Record the similarity score and recompute the total.
    pub fn set_similarity(&mut self, similarity: f64) {
        self.similarity_score = similarity;
        self.total_score = similarity + f64::from(self.priority_score);
    }
}

/// A section selected into the top K.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// The scored section
    #[serde(flatten)]
    pub section: Section,

    /// 1-based position in the selection
    pub importance_rank: u32,
}
