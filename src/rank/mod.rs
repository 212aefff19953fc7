//! Persona-driven section ranking.
//!
//! A collection's documents are cut into page-level sections
//! ([`SectionHarvester`]), boilerplate is dropped and titles are scored for
//! priority keywords ([`SectionFilter`]), every section is compared to the
//! persona query ([`RelevanceScorer`]) and the best K are kept
//! ([`RankSelector`]).

mod filter;
mod harvest;
mod scorer;
mod select;
mod tfidf;

pub use filter::SectionFilter;
pub use harvest::{normalize_whitespace, section_from_page, SectionHarvester, SECTION_TITLE_MAX_CHARS};
pub use scorer::RelevanceScorer;
pub use select::RankSelector;
pub use tfidf::{SimilarityProvider, TermVector, TfIdfVectorizer};

use std::path::Path;

use crate::config::RankOptions;
use crate::error::Result;
use crate::model::{CollectionManifest, RankedSection, RankingReport, Section};
use crate::source::SourceLoader;

/// Runs the full ranking pipeline for one collection.
#[derive(Debug, Clone)]
pub struct SectionRanker<P = TfIdfVectorizer> {
    options: RankOptions,
    filter: SectionFilter,
    scorer: RelevanceScorer<P>,
}

impl SectionRanker {
    /// Create a ranker scoring with TF-IDF.
    pub fn new(options: RankOptions) -> Self {
        Self::with_provider(options, TfIdfVectorizer::new())
    }
}

impl Default for SectionRanker {
    fn default() -> Self {
        Self::new(RankOptions::default())
    }
}

impl<P: SimilarityProvider> SectionRanker<P> {
    /// Create a ranker with a custom similarity provider.
    pub fn with_provider(options: RankOptions, provider: P) -> Self {
        Self {
            filter: SectionFilter::from_options(&options),
            scorer: RelevanceScorer::with_provider(provider),
            options,
        }
    }

    /// The options this ranker was built with.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Filter, score and select already harvested sections.
    pub fn rank_sections(&self, query: &str, sections: Vec<Section>) -> Vec<RankedSection> {
        let mut sections = self.filter.apply(sections);
        self.scorer.score(query, &mut sections);
        RankSelector::new(self.options.top_k).select(sections)
    }

    /// Rank the documents of a manifest found under `documents_dir`.
    pub fn rank_manifest(
        &self,
        manifest: &CollectionManifest,
        documents_dir: &Path,
        loader: &dyn SourceLoader,
    ) -> RankingReport {
        let sections = SectionHarvester::new(self.options.max_pages).harvest_collection(
            manifest,
            documents_dir,
            loader,
        );
        let query = manifest.query();
        log::info!("Ranking {} sections for \"{}\"", sections.len(), query);

        let ranked = self.rank_sections(&query, sections);
        RankingReport::new(manifest, &ranked, processing_timestamp())
    }

    /// Rank a collection directory laid out per [`RankOptions::layout`].
    pub fn rank_collection(&self, dir: &Path, loader: &dyn SourceLoader) -> Result<RankingReport> {
        let layout = &self.options.layout;
        let manifest = CollectionManifest::from_path(dir.join(&layout.manifest_name))?;
        Ok(self.rank_manifest(&manifest, &dir.join(&layout.documents_dir), loader))
    }
}

/// Local time with microseconds, without offset.
pub fn processing_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
