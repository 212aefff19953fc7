//! Outline assembly: title, histogram and classification over a whole document.

use crate::config::OutlineOptions;
use crate::error::Result;
use crate::model::{DocumentOutline, OutlineEntry, TextLine};
use crate::source::PageSource;

use super::{FontHistogram, HeadingClassifier, TitleExtractor};

/// Builds a [`DocumentOutline`] from a page source.
#[derive(Debug, Clone, Default)]
pub struct OutlineAssembler {
    options: OutlineOptions,
}

impl OutlineAssembler {
    /// Create an assembler with the given options.
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Read the document's pages and assemble its outline.
    ///
    /// The title always comes from the first page; headings only from pages
    /// inside the page cap.
    pub fn assemble<S: PageSource + ?Sized>(&self, source: &S) -> Result<DocumentOutline> {
        let page_count = source.page_count();
        if page_count == 0 {
            return Ok(DocumentOutline::default());
        }

        let first_page = source.page_lines(0)?;

        let mut lines = Vec::new();
        for page_index in (0..page_count).take_while(|i| self.options.includes_page(*i)) {
            if page_index == 0 {
                lines.extend(first_page.iter().cloned());
            } else {
                lines.extend(source.page_lines(page_index)?);
            }
        }
        log::debug!(
            "Collected {} lines from {} of {} pages",
            lines.len(),
            page_count.min(self.options.max_pages.unwrap_or(page_count)),
            page_count
        );

        Ok(self.assemble_lines(&first_page, &lines))
    }

    /// Assemble an outline from already extracted lines.
    ///
    /// `first_page` feeds the title; `lines` (reading order) feed the histogram
    /// and the classifier.
    pub fn assemble_lines(&self, first_page: &[TextLine], lines: &[TextLine]) -> DocumentOutline {
        let title = TitleExtractor::new(self.options.title_tolerance).extract(first_page);

        let rank = FontHistogram::from_lines(lines).size_rank();
        log::debug!("Size rank: {:?}", rank.sizes());

        let classifier =
            HeadingClassifier::for_document(&rank, &self.options.default_thresholds, &title);

        let mut outline = DocumentOutline::new(title);
        for line in lines.iter().filter(|l| !l.is_blank()) {
            if let Some(level) = classifier.classify(&line.text, line.font_size) {
                outline.push(OutlineEntry::new(level, line.trimmed(), line.page_index));
            }
        }
        outline
    }
}
