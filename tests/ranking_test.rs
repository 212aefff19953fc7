//! Section ranking over generated collections.

mod common;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use docsift::error::Result;
use docsift::{
    rank_collection, rank_collection_with_options, CollectionManifest, Error, MemorySource,
    PageSource, RankBatch, RankOptions, RankingReport, SectionRanker, SourceLoader,
};

const MANIFEST: &str = r#"{
    "challenge_info": {"challenge_id": "round_1b_002"},
    "documents": [
        {"filename": "nice.pdf", "title": "Nice"},
        {"filename": "missing.pdf"},
        {"filename": "cuisine.pdf"}
    ],
    "persona": {"role": "Travel Planner"},
    "job_to_be_done": {"task": "plan a trip for a group of friends"}
}"#;

fn write_collection(dir: &Path) {
    let pdfs = dir.join("PDFs");
    fs::create_dir_all(&pdfs).unwrap();
    fs::write(dir.join("challenge1b_input.json"), MANIFEST).unwrap();

    let nightlife = common::titled_page("Nightlife in Nice", &["Bars and beaches for a group of friends."]);
    let conclusion = common::titled_page("Conclusion", &["A trip for friends, friends and more friends."]);
    let history = common::titled_page("History", &["Roman ruins and old walls."]);
    common::write_pdf(&pdfs.join("nice.pdf"), &[&nightlife, &conclusion, &history]);

    let cuisine = common::titled_page("Cuisine Tips", &["Share socca with friends on the trip."]);
    common::write_pdf(&pdfs.join("cuisine.pdf"), &[&cuisine]);
}

fn ranking(report: &RankingReport) -> Vec<(String, u32, String, u32)> {
    report
        .extracted_sections
        .iter()
        .map(|s| {
            (
                s.document.clone(),
                s.page_number,
                s.section_title.clone(),
                s.importance_rank,
            )
        })
        .collect()
}

#[test]
fn test_rank_collection_from_pdfs() {
    let dir = tempfile::tempdir().unwrap();
    write_collection(dir.path());

    let report = rank_collection(dir.path()).unwrap();

    assert_eq!(
        report.metadata.input_documents,
        vec!["nice.pdf", "missing.pdf", "cuisine.pdf"]
    );
    assert_eq!(report.metadata.persona, "Travel Planner");
    assert_eq!(
        report.metadata.job_to_be_done,
        "plan a trip for a group of friends"
    );

    assert_eq!(
        ranking(&report),
        vec![
            ("cuisine.pdf".to_string(), 1, "Cuisine Tips".to_string(), 1),
            ("nice.pdf".to_string(), 1, "Nightlife in Nice".to_string(), 2),
            ("nice.pdf".to_string(), 3, "History".to_string(), 3),
        ]
    );

    assert_eq!(report.subsection_analysis.len(), 3);
    assert_eq!(
        report.subsection_analysis[0].refined_text,
        "Cuisine Tips Share socca with friends on the trip."
    );
    assert_eq!(report.subsection_analysis[2].page_number, 3);
}

#[test]
fn test_top_k_and_keywords_from_options() {
    let dir = tempfile::tempdir().unwrap();
    write_collection(dir.path());

    let options = RankOptions::new()
        .with_top_k(1)
        .with_priority_keywords(["Roman", "history"]);
    let report = rank_collection_with_options(dir.path(), &options).unwrap();

    assert_eq!(report.extracted_sections.len(), 1);
    assert_eq!(report.extracted_sections[0].section_title, "History");
}

#[test]
fn test_rerun_is_identical_apart_from_timestamp() {
    let base = tempfile::tempdir().unwrap();
    let collection = base.path().join("Collection 1");
    write_collection(&collection);

    let batch = RankBatch::default();
    let first = batch.run(base.path()).unwrap();
    assert!(first.is_success());
    let out = collection.join("challenge1b_output.json");
    let a: RankingReport = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();

    batch.run(base.path()).unwrap();
    let b: RankingReport = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();

    assert_eq!(a.extracted_sections, b.extracted_sections);
    assert_eq!(a.subsection_analysis, b.subsection_analysis);
    assert_eq!(a.metadata.input_documents, b.metadata.input_documents);
}

struct InMemoryLoader {
    documents: HashMap<PathBuf, MemorySource>,
}

impl SourceLoader for InMemoryLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn PageSource>> {
        self.documents
            .get(path)
            .cloned()
            .map(|d| Box::new(d) as Box<dyn PageSource>)
            .ok_or_else(|| Error::PdfParse(format!("no fixture for {}", path.display())))
    }
}

#[test]
fn test_custom_loader_and_tie_order() {
    let dir = tempfile::tempdir().unwrap();
    let pdfs = dir.path().join("PDFs");
    fs::create_dir_all(&pdfs).unwrap();
    for name in ["a.pdf", "b.pdf"] {
        fs::write(pdfs.join(name), b"placeholder").unwrap();
    }

    let page = "Museums\nQuiet galleries.";
    let mut documents = HashMap::new();
    documents.insert(pdfs.join("a.pdf"), MemorySource::new().with_text_page(page, 10.0));
    documents.insert(pdfs.join("b.pdf"), MemorySource::new().with_text_page(page, 10.0));
    let loader = InMemoryLoader { documents };

    let manifest = CollectionManifest::from_json(
        r#"{"persona": {"role": "Student"}, "job_to_be_done": {"task": "visit galleries"},
            "documents": [{"filename": "a.pdf"}, {"filename": "b.pdf"}]}"#,
        Path::new("inline.json"),
    )
    .unwrap();

    let report = SectionRanker::default().rank_manifest(&manifest, &pdfs, &loader);
    let docs: Vec<&str> = report
        .extracted_sections
        .iter()
        .map(|s| s.document.as_str())
        .collect();
    let ranks: Vec<u32> = report
        .extracted_sections
        .iter()
        .map(|s| s.importance_rank)
        .collect();
    assert_eq!(docs, vec!["a.pdf", "b.pdf"]);
    assert_eq!(ranks, vec![1, 2]);
}
