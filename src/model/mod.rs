//! Record types shared by the outline and ranking pipelines.
//!
//! Everything here is plain data: lines handed over by a page source,
//! the outline and ranking records handed to the serializer, and the
//! collection manifest read from disk.

mod line;
mod manifest;
mod outline;
mod report;
mod section;

pub use line::TextLine;
pub use manifest::{CollectionManifest, DocumentRef, JobToBeDone, Persona};
pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry};
pub use report::{ExtractedSection, RankingReport, ReportMetadata, SubsectionAnalysis};
pub use section::{RankedSection, Section};
