//! Extraction Benchmark Suite
//!
//! Scores web content extractors against a ground-truth corpus of news
//! articles in which annotators marked optional paragraphs. Scoring itself
//! lives in [`eval_core`]; this crate handles the files around it.
//!
//! # Features
//!
//! - Run configured extractors over archived HTML pages (`scrape`)
//! - Score extraction collections with paragraph match, WER and ROUGE-LSum
//!   (`score`), one TSV table per scorer
//! - Page complexity of the ground-truth corpus (`complexity`)
//! - Per-scraper and per-publisher summaries of score tables (`analysis`)
//!
//! # Example
//!
//! ```no_run
//! use eval_core::ScorerRegistry;
//! use extraction_benchmark::{
//!     dataset::{load_articles, load_extractions},
//!     runner::{write_score_tables, ConsoleProgress, ScoreRunner},
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reference = load_articles("data/ground_truth.json")?;
//!     let extractions = load_extractions("data/extractions")?;
//!
//!     let registry = ScorerRegistry::builtin();
//!     let runner = ScoreRunner::new(registry.select(&[])?, Some(4));
//!     let outcomes = runner.run(&reference, &extractions, &ConsoleProgress::new("scorings"))?;
//!
//!     write_score_tables("results", &outcomes)?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod complexity;
pub mod config;
pub mod dataset;
pub mod extractors;
pub mod reporting;
pub mod runner;

pub use config::Config;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::analysis::{run_analysis, summarize_by_publisher, summarize_by_scraper, ScoreAnalysis};
    pub use crate::complexity::{dataset_complexity, page_complexity};
    pub use crate::config::{Config, ExtractorConfig, OptionalParagraphCap, OutputMode};
    pub use crate::dataset::{load_articles, load_extractions, LoadError, TsvTable};
    pub use crate::extractors::{CommandExtractor, ExtractError, ExtractRequest, Extractor, ExtractorRegistry};
    pub use crate::reporting::{print_console_report, JsonSummary};
    pub use crate::runner::{ConsoleProgress, ProgressCallback, RunError, ScoreRunner, ScrapeRunner};
    pub use eval_core::{Article, ArticleSet, ScoreRequest, Scorer, ScorerRegistry};
}
