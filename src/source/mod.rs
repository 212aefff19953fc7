//! Page content providers.
//!
//! Both pipelines read documents through [`PageSource`]: the outline
//! pipeline wants visual lines with their font size, the ranking pipeline
//! wants plain page text. [`PdfSource`] reads PDF files with lopdf;
//! [`MemorySource`] holds lines built in code.

mod pdf;

pub use pdf::{PdfLoader, PdfSource};

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::TextLine;

/// Per-page access to a document's text.
pub trait PageSource {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Visual lines of a 0-based page, in reading order.
    fn page_lines(&self, page_index: u32) -> Result<Vec<TextLine>>;

    /// Plain text of a 0-based page, one visual line per `\n`.
    fn page_text(&self, page_index: u32) -> Result<String> {
        Ok(self
            .page_lines(page_index)?
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Opens documents by path for the ranking pipeline.
pub trait SourceLoader: Send + Sync {
    /// Open the document at `path`.
    fn open(&self, path: &Path) -> Result<Box<dyn PageSource>>;
}

/// A document held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Vec<TextLine>>,
}

impl MemorySource {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page built from `(text, font size)` lines.
    pub fn with_page<'a, I>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        let page_index = self.pages.len() as u32;
        self.pages.push(
            lines
                .into_iter()
                .map(|(text, size)| TextLine::new(text, size, page_index))
                .collect(),
        );
        self
    }

    /// Append a page of plain text; each `\n`-separated line gets `font_size`.
    pub fn with_text_page(self, text: &str, font_size: f32) -> Self {
        self.with_page(text.split('\n').map(|l| (l, font_size)))
    }
}

impl PageSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_lines(&self, page_index: u32) -> Result<Vec<TextLine>> {
        self.pages
            .get(page_index as usize)
            .cloned()
            .ok_or(Error::PageOutOfRange(page_index, self.page_count()))
    }
}

impl<S: PageSource + ?Sized> PageSource for Box<S> {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page_lines(&self, page_index: u32) -> Result<Vec<TextLine>> {
        (**self).page_lines(page_index)
    }

    fn page_text(&self, page_index: u32) -> Result<String> {
        (**self).page_text(page_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_pages() {
        let source = MemorySource::new()
            .with_page([("Heading", 18.0), ("Body", 10.0)])
            .with_text_page("First line\nSecond line", 11.0);

        assert_eq!(source.page_count(), 2);
        let lines = source.page_lines(1).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], TextLine::new("Second line", 11.0, 1));
    }

    #[test]
    fn test_default_page_text_joins_lines() {
        let source = MemorySource::new().with_page([("Heading", 18.0), ("Body", 10.0)]);
        assert_eq!(source.page_text(0).unwrap(), "Heading\nBody");
    }

    #[test]
    fn test_out_of_range_page() {
        let source = MemorySource::new().with_page([("Only", 10.0)]);
        assert!(matches!(
            source.page_lines(3),
            Err(Error::PageOutOfRange(3, 1))
        ));
    }

    #[test]
    fn test_boxed_source_delegates() {
        let boxed: Box<dyn PageSource> =
            Box::new(MemorySource::new().with_text_page("a\nb", 10.0));
        assert_eq!(boxed.page_count(), 1);
        assert_eq!(boxed.page_text(0).unwrap(), "a\nb");
    }
}
