//! Outline extraction from typography.
//!
//! The pipeline runs per document:
//!
//! 1. [`FontHistogram`] counts representative line sizes and derives a
//!    [`SizeRank`] of the four largest sizes.
//! 2. [`TitleExtractor`] joins the largest lines of the first page.
//! 3. [`HeadingClassifier`] decides a level for each line.
//! 4. [`OutlineAssembler`] drives the steps above over a page source.

mod assembler;
mod classifier;
mod histogram;
mod title;

pub use assembler::OutlineAssembler;
pub use classifier::{
    classify, is_cjk_char, HeadingClassifier, HeadingMatch, HeadingRule, HeadingThresholds,
};
pub use histogram::{FontHistogram, FontSize, SizeRank};
pub use title::TitleExtractor;
