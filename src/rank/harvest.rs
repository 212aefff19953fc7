//! Page-level section harvesting.

use std::path::Path;

use crate::error::{catch_panic, Result};
use crate::model::{CollectionManifest, Section};
use crate::source::{PageSource, SourceLoader};

/// Longest section title kept, in characters.
pub const SECTION_TITLE_MAX_CHARS: usize = 80;

/// Turns every page of a document into a [`Section`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionHarvester {
    max_pages: Option<u32>,
}

impl SectionHarvester {
    /// Create a harvester, optionally capped to the first `max_pages` pages.
    pub fn new(max_pages: Option<u32>) -> Self {
        Self { max_pages }
    }

    /// One section per page of `source`, labelled with `document`.
    pub fn harvest<S: PageSource + ?Sized>(&self, document: &str, source: &S) -> Result<Vec<Section>> {
        let page_count = match self.max_pages {
            Some(max) => source.page_count().min(max),
            None => source.page_count(),
        };

        let mut sections = Vec::with_capacity(page_count as usize);
        for page_index in 0..page_count {
            let text = source.page_text(page_index)?;
            sections.push(section_from_page(document, page_index + 1, &text));
        }
        Ok(sections)
    }

    /// Harvest every document listed in `manifest`, resolved under `documents_dir`.
    ///
    /// Missing files are skipped with a warning and documents that fail to
    /// open or parse are skipped with an error; neither stops the collection.
    pub fn harvest_collection(
        &self,
        manifest: &CollectionManifest,
        documents_dir: &Path,
        loader: &dyn SourceLoader,
    ) -> Vec<Section> {
        let mut sections = Vec::new();

        for doc in &manifest.documents {
            let path = documents_dir.join(&doc.filename);
            if !path.exists() {
                log::warn!("Skipping missing file: {}", path.display());
                continue;
            }

            let harvested = catch_panic(|| {
                let source = loader.open(&path)?;
                self.harvest(&doc.filename, source.as_ref())
            });
            match harvested {
                Ok(found) => {
                    log::debug!("{}: {} sections", doc.filename, found.len());
                    sections.extend(found);
                }
                Err(e) => log::error!("Failed to read {}: {}", doc.filename, e),
            }
        }

        sections
    }
}

/// Build the section for one page of text.
///
/// The title is the first line of the trimmed text, cut to
/// [`SECTION_TITLE_MAX_CHARS`]; the body has whitespace runs collapsed.
pub fn section_from_page(document: &str, page_number: u32, text: &str) -> Section {
    let text = text.trim();
    let title: String = text
        .split('\n')
        .next()
        .unwrap_or_default()
        .chars()
        .take(SECTION_TITLE_MAX_CHARS)
        .collect();
    Section::new(document, page_number, title, normalize_whitespace(text))
}

/// Collapse every whitespace run to a single space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
