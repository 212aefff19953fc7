//! Ranking output record.

use super::{CollectionManifest, RankedSection};
use serde::{Deserialize, Serialize};

/// Run metadata echoed into the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// ISO-8601 local time the report was produced
    pub processing_timestamp: String,
}

/// Rank listing of a selected section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: u32,
    pub page_number: u32,
}

/// Full text of a selected section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// Output of one collection's ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl RankingReport {
    /// Project ranked sections into the two parallel output lists.
    pub fn new(
        manifest: &CollectionManifest,
        ranked: &[RankedSection],
        processing_timestamp: impl Into<String>,
    ) -> Self {
        let metadata = ReportMetadata {
            input_documents: manifest.filenames(),
            persona: manifest.persona.role.clone(),
            job_to_be_done: manifest.job_to_be_done.task.clone(),
            processing_timestamp: processing_timestamp.into(),
        };

        let extracted_sections = ranked
            .iter()
            .map(|r| ExtractedSection {
                document: r.section.document.clone(),
                section_title: r.section.section_title.clone(),
                importance_rank: r.importance_rank,
                page_number: r.section.page_number,
            })
            .collect();

        let subsection_analysis = ranked
            .iter()
            .map(|r| SubsectionAnalysis {
                document: r.section.document.clone(),
                refined_text: r.section.raw_text.clone(),
                page_number: r.section.page_number,
            })
            .collect();

        Self {
            metadata,
            extracted_sections,
            subsection_analysis,
        }
    }
}
