//! Summaries of score and complexity tables

pub mod summary;

pub use summary::{
    complexity_summary, mean, publisher_of, quantile, rank_rows, ranking_column, sample_std,
    summarize_by_publisher, summarize_by_scraper, COMPLEXITY_STATISTICS,
};

use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::{LoadError, TsvTable};
use crate::runner::SCORE_INDEX;

/// Summaries derived from one scorer table
#[derive(Debug, Clone)]
pub struct ScoreAnalysis {
    /// Table name, the file stem of the scorer TSV
    pub name: String,
    pub by_scraper: TsvTable,
    pub by_publisher: TsvTable,
}

impl ScoreAnalysis {
    pub fn from_table(name: impl Into<String>, table: &TsvTable) -> Self {
        Self {
            name: name.into(),
            by_scraper: summarize_by_scraper(table),
            by_publisher: summarize_by_publisher(table),
        }
    }
}

/// Everything the `analysis` command produced
#[derive(Debug, Default)]
pub struct AnalysisOutput {
    pub scores: Vec<ScoreAnalysis>,
    pub complexity: Option<TsvTable>,
    pub written: Vec<PathBuf>,
}

/// Log a warning when `table` contains undefined values.
pub fn warn_on_nan(name: &str, table: &TsvTable) {
    for (column, metric) in table.columns.iter().enumerate() {
        let missing = table.rows.iter().filter(|row| row.values[column].is_nan()).count();
        if missing > 0 {
            tracing::warn!(
                "{}: {} of {} values of '{}' are NaN",
                name,
                missing,
                table.len(),
                metric
            );
        }
    }
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Summarize scorer tables and an optional complexity table into `output_directory`.
pub fn run_analysis(
    output_directory: &Path,
    complexity: Option<&Path>,
    scores: &[PathBuf],
) -> Result<AnalysisOutput, LoadError> {
    fs::create_dir_all(output_directory).map_err(|e| LoadError::io(output_directory, e))?;
    let mut output = AnalysisOutput::default();

    for path in scores {
        let name = table_name(path);
        let table = TsvTable::read_from_file(path, SCORE_INDEX.len())?;
        tracing::info!("Loaded {} rows from {}", table.len(), path.display());
        warn_on_nan(&name, &table);

        let analysis = ScoreAnalysis::from_table(&name, &table);

        let scraper_path = output_directory.join(format!("{}_scraper_summary.tsv", name));
        analysis.by_scraper.write_to_file(&scraper_path)?;
        output.written.push(scraper_path);

        let publisher_path = output_directory.join(format!("{}_publisher_summary.tsv", name));
        analysis.by_publisher.write_to_file(&publisher_path)?;
        output.written.push(publisher_path);

        output.scores.push(analysis);
    }

    if let Some(path) = complexity {
        let table = TsvTable::read_from_file(path, 1)?;
        warn_on_nan(&table_name(path), &table);

        let summary = complexity_summary(&table);
        let summary_path = output_directory.join("complexity_summary.tsv");
        summary.write_to_file(&summary_path)?;
        output.written.push(summary_path);
        output.complexity = Some(summary);
    }

    Ok(output)
}
