//! Query relevance scoring.

use crate::model::Section;

use super::tfidf::{SimilarityProvider, TfIdfVectorizer};

/// Scores sections against a query with a [`SimilarityProvider`].
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer<P = TfIdfVectorizer> {
    provider: P,
}

impl RelevanceScorer {
    /// Create a scorer backed by TF-IDF.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: SimilarityProvider> RelevanceScorer<P> {
    /// Create a scorer backed by a custom similarity provider.
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Set the similarity and total score of every section.
    pub fn score(&self, query: &str, sections: &mut [Section]) {
        if sections.is_empty() {
            return;
        }

        let texts: Vec<&str> = sections.iter().map(|s| s.raw_text.as_str()).collect();
        let scores = self.provider.similarities(query, &texts);

        for (section, similarity) in sections.iter_mut().zip(scores) {
            section.set_similarity(similarity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::TermVector;

    struct LengthSimilarity;

    impl SimilarityProvider for LengthSimilarity {
        fn vectorize(&self, corpus: &[&str]) -> Vec<TermVector> {
            corpus.iter().map(|_| TermVector::default()).collect()
        }

        fn similarities(&self, _query: &str, documents: &[&str]) -> Vec<f64> {
            documents.iter().map(|d| d.len() as f64 / 100.0).collect()
        }
    }

    #[test]
    fn test_total_is_similarity_plus_priority() {
        let mut sections = vec![
            Section::new("a.pdf", 1, "Tips", "Packing list for the beach"),
            Section::new("a.pdf", 2, "History", "Roman ruins"),
        ];
        sections[0].priority_score = 1;

        RelevanceScorer::new().score("beach packing", &mut sections);

        assert!(sections[0].similarity_score > 0.0);
        assert_eq!(sections[1].similarity_score, 0.0);
        assert_eq!(
            sections[0].total_score,
            sections[0].similarity_score + 1.0
        );
        assert_eq!(sections[1].total_score, 0.0);
    }

    #[test]
    fn test_custom_provider() {
        let mut sections = vec![Section::new("a.pdf", 1, "T", "0123456789")];
        RelevanceScorer::with_provider(LengthSimilarity).score("q", &mut sections);
        assert_eq!(sections[0].similarity_score, 0.1);
    }

    #[test]
    fn test_empty_is_noop() {
        let mut sections: Vec<Section> = Vec::new();
        RelevanceScorer::new().score("anything", &mut sections);
        assert!(sections.is_empty());
    }
}
