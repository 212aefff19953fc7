//! Collection manifest read by the ranking pipeline.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Who the ranking is for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

/// What the persona is trying to get done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

/// A document listed in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// File name, resolved against the collection's document directory
    pub filename: String,

    /// Optional human title (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Input manifest for one collection.
///
/// Unknown fields (such as `challenge_info`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionManifest {
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
    pub documents: Vec<DocumentRef>,
}

impl CollectionManifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::manifest(origin, e.to_string()))
    }

    /// Read and parse a manifest file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::manifest(path, format!("cannot read: {}", e)))?;
        Self::from_json(&json, path)
    }

    /// The combined relevance query: `"{role} needs to {task}"`.
    pub fn query(&self) -> String {
        format!("{} needs to {}", self.persona.role, self.job_to_be_done.task)
    }

    /// File names of every listed document, in manifest order.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "challenge_info": {"challenge_id": "round_1b_002", "test_case_name": "travel_planner"},
        "documents": [
            {"filename": "South of France - Cities.pdf", "title": "South of France - Cities"},
            {"filename": "South of France - Cuisine.pdf"}
        ],
        "persona": {"role": "Travel Planner"},
        "job_to_be_done": {"task": "Plan a trip of 4 days for a group of 10 college friends."}
    }"#;

    #[test]
    fn test_parse_manifest_ignores_extra_fields() {
        let manifest = CollectionManifest::from_json(MANIFEST, Path::new("input.json")).unwrap();
        assert_eq!(manifest.documents.len(), 2);
        assert_eq!(
            manifest.documents[0].title.as_deref(),
            Some("South of France - Cities")
        );
        assert_eq!(manifest.documents[1].title, None);
    }

    #[test]
    fn test_query() {
        let manifest = CollectionManifest::from_json(MANIFEST, Path::new("input.json")).unwrap();
        assert_eq!(
            manifest.query(),
            "Travel Planner needs to Plan a trip of 4 days for a group of 10 college friends."
        );
    }

    #[test]
    fn test_malformed_manifest() {
        let result = CollectionManifest::from_json(r#"{"documents": []}"#, Path::new("x.json"));
        assert!(matches!(result, Err(Error::Manifest { .. })));
    }

    #[test]
    fn test_missing_manifest_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CollectionManifest::from_path(dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::Manifest { .. })));
    }
}
