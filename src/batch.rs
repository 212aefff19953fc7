//! Directory-level runners for both pipelines.
//!
//! Each input is processed independently: a failing document or collection
//! is recorded in the [`BatchSummary`] and the run moves on.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::config::{OutlineOptions, RankOptions};
use crate::detect::has_pdf_extension;
use crate::error::{catch_panic, Error, Result};
use crate::outline::OutlineAssembler;
use crate::rank::SectionRanker;
use crate::render::{write_json, JsonFormat};
use crate::source::{PdfLoader, SourceLoader};

/// Result of one batch item.
#[derive(Debug)]
pub struct ItemOutcome {
    /// Document or collection that was processed
    pub input: PathBuf,

    /// Written output file, or the error that stopped this item
    pub result: Result<PathBuf>,

    /// Wall time spent on this item
    pub elapsed: Duration,
}

impl ItemOutcome {
    /// Whether the item produced an output file.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Output file, if one was written.
    pub fn output(&self) -> Option<&Path> {
        self.result.as_ref().ok().map(PathBuf::as_path)
    }
}

/// Outcomes of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub items: Vec<ItemOutcome>,
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Number of items that produced output.
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_ok()).count()
    }

    /// Number of items that failed.
    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    /// Failed items with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &Error)> {
        self.items
            .iter()
            .filter_map(|i| i.result.as_ref().err().map(|e| (i.input.as_path(), e)))
    }

    /// Whether every item succeeded.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// PDF files to process: the file itself, or every `*.pdf` in a directory
/// sorted by name.
pub fn find_pdfs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(Error::DocumentNotFound(input.to_path_buf()));
    }

    let mut pdfs = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

/// Subdirectories of `base` whose name starts with "collection", sorted by name.
pub fn find_collections(base: &Path) -> Result<Vec<PathBuf>> {
    if !base.is_dir() {
        return Err(Error::DocumentNotFound(base.to_path_buf()));
    }

    let mut dirs = Vec::new();
    for entry in fs::read_dir(base)? {
        let path = entry?.path();
        let is_collection = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase().starts_with("collection"))
            .unwrap_or(false);
        if is_collection && path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Run `work` over every input, in parallel when asked, keeping input order.
///
/// A panic in `work` is recorded as that item's error.
fn run_items<W, F>(inputs: &[PathBuf], parallel: bool, work: W, on_item: F) -> BatchSummary
where
    W: Fn(&Path) -> Result<PathBuf> + Sync,
    F: Fn(&ItemOutcome) + Sync,
{
    let start = Instant::now();
    let timed = |input: &PathBuf| {
        let item_start = Instant::now();
        let outcome = ItemOutcome {
            input: input.clone(),
            result: catch_panic(|| work(input.as_path())),
            elapsed: item_start.elapsed(),
        };
        match &outcome.result {
            Ok(out) => log::info!(
                "{} -> {} ({:.2?})",
                input.display(),
                out.display(),
                outcome.elapsed
            ),
            Err(e) => log::error!("{}: {}", input.display(), e),
        }
        on_item(&outcome);
        outcome
    };

    let items: Vec<ItemOutcome> = if parallel {
        inputs.par_iter().map(timed).collect()
    } else {
        inputs.iter().map(timed).collect()
    };

    BatchSummary {
        items,
        elapsed: start.elapsed(),
    }
}

/// Writes `<stem>.json` outlines for a PDF or a directory of PDFs.
pub struct OutlineBatch {
    assembler: OutlineAssembler,
    loader: Box<dyn SourceLoader>,
    format: JsonFormat,
}

impl OutlineBatch {
    /// Create a batch reading PDFs from disk.
    pub fn new(options: OutlineOptions) -> Self {
        Self {
            assembler: OutlineAssembler::new(options),
            loader: Box::new(PdfLoader),
            format: JsonFormat::Pretty,
        }
    }

    /// Read documents through another loader.
    pub fn with_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Set the output JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Outline one document and write it into `output_dir`.
    pub fn process_file(&self, pdf: &Path, output_dir: &Path) -> Result<PathBuf> {
        let source = self.loader.open(pdf)?;
        let outline = self.assembler.assemble(source.as_ref())?;

        let stem = pdf.file_stem().unwrap_or_default().to_string_lossy();
        let out = output_dir.join(format!("{}.json", stem));
        write_json(&out, &outline, self.format)?;
        Ok(out)
    }

    /// Process every PDF found under `input`.
    pub fn run(&self, input: &Path, output_dir: &Path) -> Result<BatchSummary> {
        self.run_with_progress(input, output_dir, |_| {})
    }

    /// Process every PDF found under `input`, calling `on_item` as each finishes.
    pub fn run_with_progress<F>(&self, input: &Path, output_dir: &Path, on_item: F) -> Result<BatchSummary>
    where
        F: Fn(&ItemOutcome) + Sync,
    {
        let pdfs = find_pdfs(input)?;
        self.run_files(&pdfs, output_dir, on_item)
    }

    /// Process the given PDF files.
    pub fn run_files<F>(&self, pdfs: &[PathBuf], output_dir: &Path, on_item: F) -> Result<BatchSummary>
    where
        F: Fn(&ItemOutcome) + Sync,
    {
        fs::create_dir_all(output_dir)?;
        log::info!("Extracting outlines from {} documents", pdfs.len());

        Ok(run_items(
            pdfs,
            self.assembler.options().parallel,
            |pdf| self.process_file(pdf, output_dir),
            on_item,
        ))
    }
}

impl Default for OutlineBatch {
    fn default() -> Self {
        Self::new(OutlineOptions::default())
    }
}

/// Writes a ranking report into each collection directory.
pub struct RankBatch {
    ranker: SectionRanker,
    loader: Box<dyn SourceLoader>,
    format: JsonFormat,
}

impl RankBatch {
    /// Create a batch reading PDFs from disk.
    pub fn new(options: RankOptions) -> Self {
        Self {
            ranker: SectionRanker::new(options),
            loader: Box::new(PdfLoader),
            format: JsonFormat::Wide,
        }
    }

    /// Read documents through another loader.
    pub fn with_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Set the output JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Rank one collection and write its report next to the manifest.
    pub fn process_collection(&self, dir: &Path) -> Result<PathBuf> {
        let report = self.ranker.rank_collection(dir, self.loader.as_ref())?;
        let out = dir.join(&self.ranker.options().layout.output_name);
        write_json(&out, &report, self.format)?;
        Ok(out)
    }

    /// Rank every collection directory under `base`.
    pub fn run(&self, base: &Path) -> Result<BatchSummary> {
        self.run_with_progress(base, |_| {})
    }

    /// Rank every collection directory under `base`, calling `on_item` as each finishes.
    pub fn run_with_progress<F>(&self, base: &Path, on_item: F) -> Result<BatchSummary>
    where
        F: Fn(&ItemOutcome) + Sync,
    {
        let collections = find_collections(base)?;
        log::info!("Ranking {} collections", collections.len());
        Ok(self.run_collections(&collections, on_item))
    }

    /// Rank the given collection directories.
    pub fn run_collections<F>(&self, collections: &[PathBuf], on_item: F) -> BatchSummary
    where
        F: Fn(&ItemOutcome) + Sync,
    {
        run_items(
            collections,
            self.ranker.options().parallel,
            |dir| self.process_collection(dir),
            on_item,
        )
    }
}

impl Default for RankBatch {
    fn default() -> Self {
        Self::new(RankOptions::default())
    }
}
