//! # docsift
//!
//! Document outline extraction and persona-driven section ranking for PDFs.
//!
//! Two independent pipelines share one page-content layer:
//!
//! - **Outline**: infers a title and an H1–H4 heading hierarchy from font
//!   sizes, numbering patterns and CJK script.
//! - **Ranking**: scores every page of a document collection against a
//!   persona and job description, and keeps the most relevant sections.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{extract_outline, rank_collection, render, JsonFormat};
//!
//! fn main() -> docsift::Result<()> {
//!     let outline = extract_outline("report.pdf")?;
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!
//!     let report = rank_collection("Collection 1")?;
//!     for section in &report.extracted_sections {
//!         println!("{} {}", section.importance_rank, section.section_title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod rank;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use batch::{find_collections, find_pdfs, BatchSummary, ItemOutcome, OutlineBatch, RankBatch};
pub use config::{CollectionLayout, OutlineOptions, RankOptions};
pub use detect::{check_pdf_file, has_pdf_extension, sniff_pdf_version};
pub use error::{Error, Result};
pub use model::{
    CollectionManifest, DocumentOutline, DocumentRef, HeadingLevel, OutlineEntry, RankedSection,
    RankingReport, Section, TextLine,
};
pub use outline::{classify, HeadingClassifier, HeadingThresholds, OutlineAssembler};
pub use rank::{SectionRanker, SimilarityProvider, TfIdfVectorizer};
pub use render::JsonFormat;
pub use source::{MemorySource, PageSource, PdfLoader, PdfSource, SourceLoader};

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use docsift::extract_outline;
///
/// let outline = extract_outline("report.pdf").unwrap();
/// println!("{} ({} headings)", outline.title, outline.len());
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    extract_outline_with_options(path, &OutlineOptions::default())
}

/// Extract the outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use docsift::{extract_outline_with_options, OutlineOptions};
///
/// let options = OutlineOptions::new().with_max_pages(50);
/// let outline = extract_outline_with_options("report.pdf", &options).unwrap();
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: &OutlineOptions,
) -> Result<DocumentOutline> {
    let source = PdfSource::open(path)?;
    OutlineAssembler::new(options.clone()).assemble(&source)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_outline_from_bytes(data: &[u8], options: &OutlineOptions) -> Result<DocumentOutline> {
    let source = PdfSource::from_bytes(data)?;
    OutlineAssembler::new(options.clone()).assemble(&source)
}

/// Rank the sections of a collection directory.
///
/// The directory holds `challenge1b_input.json` and a `PDFs/` folder.
///
/// # Example
///
/// ```no_run
/// use docsift::rank_collection;
///
/// let report = rank_collection("Collection 1").unwrap();
/// println!("{}", report.metadata.persona);
/// ```
pub fn rank_collection<P: AsRef<Path>>(dir: P) -> Result<RankingReport> {
    rank_collection_with_options(dir, &RankOptions::default())
}

/// Rank the sections of a collection directory with custom options.
///
/// # Example
///
/// ```no_run
/// use docsift::{rank_collection_with_options, RankOptions};
///
/// let options = RankOptions::new().with_top_k(10).with_priority_keywords(["wine", "tour"]);
/// let report = rank_collection_with_options("Collection 1", &options).unwrap();
/// ```
pub fn rank_collection_with_options<P: AsRef<Path>>(
    dir: P,
    options: &RankOptions,
) -> Result<RankingReport> {
    SectionRanker::new(options.clone()).rank_collection(dir.as_ref(), &PdfLoader)
}
