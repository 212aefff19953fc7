//! docsift CLI - PDF outline extraction and section ranking

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::{
    find_collections, find_pdfs, BatchSummary, ItemOutcome, JsonFormat, OutlineBatch,
    OutlineOptions, RankBatch, RankOptions,
};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF outlines and rank document sections for a persona", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a title and heading outline for each PDF
    Outline {
        /// Input PDF file or directory of PDFs
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory receiving one JSON file per PDF
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Only look at the first N pages for headings
        #[arg(long, env = "DOCSIFT_MAX_PAGES")]
        max_pages: Option<u32>,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Rank the sections of every collection under a directory
    Rank {
        /// Directory containing "Collection*" subdirectories
        #[arg(value_name = "BASE_DIR", required_unless_present = "collection")]
        base_dir: Option<PathBuf>,

        /// Rank a single collection directory instead
        #[arg(long, value_name = "DIR", conflicts_with = "base_dir")]
        collection: Option<PathBuf>,

        /// Number of sections to keep per collection
        #[arg(long, env = "DOCSIFT_TOP_K", default_value_t = 5)]
        top_k: usize,

        /// Comma-separated title keywords that boost a section
        #[arg(long, env = "DOCSIFT_KEYWORDS", value_delimiter = ',')]
        keywords: Vec<String>,

        /// Only read the first N pages of each document
        #[arg(long, env = "DOCSIFT_MAX_PAGES")]
        max_pages: Option<u32>,

        /// Process collections one at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output_dir,
            max_pages,
            sequential,
            compact,
        } => cmd_outline(&input, &output_dir, max_pages, sequential, compact),
        Commands::Rank {
            base_dir,
            collection,
            top_k,
            keywords,
            max_pages,
            sequential,
            compact,
        } => {
            let options = rank_options(top_k, &keywords, max_pages, sequential);
            cmd_rank(base_dir.as_deref(), collection.as_deref(), options, compact)
        }
        Commands::Version => {
            cmd_version();
            Ok(true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn json_format(compact: bool, pretty: JsonFormat) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        pretty
    }
}

fn rank_options(
    top_k: usize,
    keywords: &[String],
    max_pages: Option<u32>,
    sequential: bool,
) -> RankOptions {
    let mut options = RankOptions::new().with_top_k(top_k).with_parallel(!sequential);
    let keywords: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if !keywords.is_empty() {
        options = options.with_priority_keywords(keywords);
    }
    if let Some(pages) = max_pages {
        options = options.with_max_pages(pages);
    }
    options
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

fn tick(pb: &ProgressBar, item: &ItemOutcome) {
    let name = item.input.file_name().unwrap_or_default().to_string_lossy();
    pb.set_message(name.into_owned());
    pb.inc(1);
}

/// Print the per-item results; returns whether every item succeeded.
fn report(summary: &BatchSummary) -> bool {
    println!();
    for item in &summary.items {
        match &item.result {
            Ok(out) => println!(
                "  {} {} {}",
                "✓".green(),
                out.display(),
                format!("({:.2?})", item.elapsed).dimmed()
            ),
            Err(e) => println!("  {} {}: {}", "✗".red(), item.input.display(), e),
        }
    }

    println!(
        "\n{} {} succeeded, {} failed in {:.2?}",
        "Done!".green().bold(),
        summary.succeeded(),
        summary.failed(),
        summary.elapsed
    );
    summary.is_success()
}

fn cmd_outline(
    input: &Path,
    output_dir: &Path,
    max_pages: Option<u32>,
    sequential: bool,
    compact: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut options = OutlineOptions::new().with_parallel(!sequential);
    if let Some(pages) = max_pages {
        options = options.with_max_pages(pages);
    }

    let pdfs = find_pdfs(input)?;
    if pdfs.is_empty() {
        println!("{} {}", "No PDF files found in".yellow(), input.display());
        return Ok(true);
    }

    let batch = OutlineBatch::new(options).with_format(json_format(compact, JsonFormat::Pretty));
    let pb = progress_bar(pdfs.len());
    let summary = batch.run_files(&pdfs, output_dir, |item| tick(&pb, item))?;
    pb.finish_and_clear();

    Ok(report(&summary))
}

fn cmd_rank(
    base_dir: Option<&Path>,
    collection: Option<&Path>,
    options: RankOptions,
    compact: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let collections = match (collection, base_dir) {
        (Some(dir), _) => vec![dir.to_path_buf()],
        (None, Some(base)) => find_collections(base)?,
        (None, None) => return Err("either BASE_DIR or --collection is required".into()),
    };
    if collections.is_empty() {
        println!("{}", "No collection directories found".yellow());
        return Ok(true);
    }

    let batch = RankBatch::new(options).with_format(json_format(compact, JsonFormat::Wide));
    let pb = progress_bar(collections.len());
    let summary = batch.run_collections(&collections, |item| tick(&pb, item));
    pb.finish_and_clear();

    Ok(report(&summary))
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and persona-driven section ranking");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docsift".dimmed());
    println!("License: MIT");
}
