//! Pipeline options.
//!
//! Every tunable of both pipelines lives in these structs and is passed in
//! explicitly, so documents with different calibration can be processed side
//! by side without sharing state.

use crate::outline::HeadingThresholds;

/// Title keywords that boost a section's score, counted per list entry.
pub const DEFAULT_PRIORITY_KEYWORDS: [&str; 10] = [
    "cities",
    "things to do",
    "cuisine",
    "packing",
    "tips",
    "nightlife",
    "activities",
    "adventures",
    "experiences",
    "travel",
];

/// Boilerplate section titles that are never ranked. The empty title is always excluded.
pub const DEFAULT_IGNORED_TITLES: [&str; 3] = ["conclusion", "introduction", "table of contents"];

/// Options for outline extraction.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Only look at the first N pages for headings (None = all pages)
    pub max_pages: Option<u32>,

    /// Size thresholds used for levels the document's histogram does not cover
    pub default_thresholds: HeadingThresholds,

    /// Maximum distance from the first page's largest size for a title line
    pub title_tolerance: f32,

    /// Whether batch runs may process documents in parallel
    pub parallel: bool,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit heading detection to the first `pages` pages.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// Set the fallback size thresholds.
    pub fn with_default_thresholds(mut self, thresholds: HeadingThresholds) -> Self {
        self.default_thresholds = thresholds;
        self
    }

    /// Set the title size tolerance.
    pub fn with_title_tolerance(mut self, tolerance: f32) -> Self {
        self.title_tolerance = tolerance;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Whether a 0-based page index falls inside the page cap.
    pub fn includes_page(&self, page_index: u32) -> bool {
        self.max_pages.map_or(true, |max| page_index < max)
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            max_pages: None,
            default_thresholds: HeadingThresholds::default(),
            title_tolerance: 0.1,
            parallel: true,
        }
    }
}

/// File names inside a collection directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionLayout {
    /// Manifest file name
    pub manifest_name: String,

    /// Subdirectory holding the listed documents
    pub documents_dir: String,

    /// Report file name
    pub output_name: String,
}

impl Default for CollectionLayout {
    fn default() -> Self {
        Self {
            manifest_name: "challenge1b_input.json".to_string(),
            documents_dir: "PDFs".to_string(),
            output_name: "challenge1b_output.json".to_string(),
        }
    }
}

/// Options for section ranking.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Keywords counted in lower-cased section titles
    pub priority_keywords: Vec<String>,

    /// Lower-case titles excluded before scoring
    pub ignored_titles: Vec<String>,

    /// Number of sections to keep
    pub top_k: usize,

    /// Only harvest the first N pages of each document (None = all pages)
    pub max_pages: Option<u32>,

    /// Whether batch runs may process collections in parallel
    pub parallel: bool,

    /// Where manifest, documents and report live inside a collection
    pub layout: CollectionLayout,
}

impl RankOptions {
    /// Create new rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the priority keyword list.
    pub fn with_priority_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority_keywords = keywords.into_iter().map(|k| k.into().to_lowercase()).collect();
        self
    }

    /// Replace the boilerplate title list.
    pub fn with_ignored_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_titles = titles
            .into_iter()
            .map(|t| t.into().trim().to_lowercase())
            .collect();
        self
    }

    /// Set how many sections to keep.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Limit harvesting to the first `pages` pages of each document.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the collection file layout.
    pub fn with_layout(mut self, layout: CollectionLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            priority_keywords: DEFAULT_PRIORITY_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            ignored_titles: DEFAULT_IGNORED_TITLES.iter().map(|t| t.to_string()).collect(),
            top_k: 5,
            max_pages: None,
            parallel: true,
            layout: CollectionLayout::default(),
        }
    }
}
