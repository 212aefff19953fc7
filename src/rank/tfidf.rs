//! TF-IDF vectors and cosine similarity.
//!
//! The vocabulary is fitted per call over the sections of one collection
//! plus the query, so scores are only comparable within a single ranking.

use std::collections::BTreeMap;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Computes a relevance score for each document against a query.
pub trait SimilarityProvider {
    /// Vectorize a corpus, one vector per input text.
    fn vectorize(&self, corpus: &[&str]) -> Vec<TermVector>;

    /// Cosine similarity of every document against `query`, fitted over
    /// the documents and the query together.
    fn similarities(&self, query: &str, documents: &[&str]) -> Vec<f64> {
        let mut corpus = documents.to_vec();
        corpus.push(query);

        let mut vectors = self.vectorize(&corpus);
        let query_vector = vectors.pop().unwrap_or_default();
        vectors.iter().map(|v| v.cosine(&query_vector)).collect()
    }
}

/// Sparse vector of `(term id, weight)` pairs sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(u32, f64)>,
}

impl TermVector {
    /// Build from unordered entries; zero weights are dropped.
    pub fn from_entries(mut entries: Vec<(u32, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(id, _)| id);
        Self { entries }
    }

    /// Number of non-zero terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether every weight is zero.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of a term, zero when absent.
    pub fn weight(&self, term: u32) -> f64 {
        self.entries
            .binary_search_by_key(&term, |&(id, _)| id)
            .map_or(0.0, |i| self.entries[i].1)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit length. The zero vector stays zero.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }

    /// Dot product over the shared terms.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; 0 when either vector is zero.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            0.0
        } else {
            self.dot(other) / denom
        }
    }
}

/// TF-IDF with raw term counts, smoothed idf and L2-normalized rows.
///
/// Text is NFKC-normalized and lower-cased, then split into tokens of two
/// or more word characters.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    token: Regex,
}

impl TfIdfVectorizer {
    /// Create a vectorizer with the default token pattern.
    pub fn new() -> Self {
        Self {
            token: Regex::new(r"\b\w\w+\b").unwrap(),
        }
    }

    /// Tokens of one text, in order of appearance.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized: String = text.nfkc().collect::<String>().to_lowercase();
        self.token
            .find_iter(&normalized)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Smoothed inverse document frequency.
    pub fn idf(n_docs: usize, doc_freq: usize) -> f64 {
        ((1.0 + n_docs as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityProvider for TfIdfVectorizer {
    fn vectorize(&self, corpus: &[&str]) -> Vec<TermVector> {
        let tokenized: Vec<Vec<String>> = corpus.iter().map(|t| self.tokenize(t)).collect();

        // Sorted vocabulary keeps term ids stable across runs.
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let vocabulary: BTreeMap<&str, (u32, f64)> = doc_freq
            .iter()
            .enumerate()
            .map(|(id, (&term, &df))| (term, (id as u32, Self::idf(corpus.len(), df))))
            .collect();
        log::trace!("Fitted vocabulary of {} terms", vocabulary.len());

        tokenized
            .iter()
            .map(|tokens| {
                let mut counts: BTreeMap<u32, (f64, f64)> = BTreeMap::new();
                for token in tokens {
                    if let Some(&(id, idf)) = vocabulary.get(token.as_str()) {
                        counts.entry(id).or_insert((0.0, idf)).0 += 1.0;
                    }
                }
                let mut vector = TermVector::from_entries(
                    counts
                        .into_iter()
                        .map(|(id, (tf, idf))| (id, tf * idf))
                        .collect(),
                );
                vector.normalize();
                vector
            })
            .collect()
    }
}
