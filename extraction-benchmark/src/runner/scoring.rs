//! Dataset scoring driver

use std::fs;
use std::path::{Path, PathBuf};

use eval_core::{ArticleSet, ScoreRequest, Scorer};
use indexmap::IndexMap;

use super::{ProgressCallback, RunError};
use crate::dataset::{LoadError, TsvTable};

/// Key columns of every combined score table
pub const SCORE_INDEX: [&str; 2] = ["scraper", "article"];

/// Combined table of one scorer over every scraper
#[derive(Debug, Clone)]
pub struct ScorerOutcome {
    pub scorer: String,
    pub table: TsvTable,
}

/// Scores every extraction collection with every selected scorer.
pub struct ScoreRunner<'a> {
    scorers: Vec<&'a dyn Scorer>,
    max_optional_paragraphs: Option<usize>,
}

impl<'a> ScoreRunner<'a> {
    pub fn new(scorers: Vec<&'a dyn Scorer>, max_optional_paragraphs: Option<usize>) -> Self {
        Self {
            scorers,
            max_optional_paragraphs,
        }
    }

    /// Run scorers (outer) over scrapers (inner), failing on the first key mismatch.
    pub fn run(
        &self,
        reference: &ArticleSet,
        extractions: &IndexMap<String, ArticleSet>,
        progress: &dyn ProgressCallback,
    ) -> Result<Vec<ScorerOutcome>, RunError> {
        let total = self.scorers.len() * extractions.len();
        let mut completed = 0;
        progress.on_progress(completed, total);

        let mut outcomes = Vec::with_capacity(self.scorers.len());
        for scorer in &self.scorers {
            let mut combined = TsvTable::new(SCORE_INDEX, scorer.metrics().iter().copied());

            for (scraper, hypothesis) in extractions {
                progress.on_item_start(scorer.name(), scraper);

                let request = ScoreRequest::new(reference, hypothesis, self.max_optional_paragraphs);
                let table = match scorer.score(&request) {
                    Ok(table) => table,
                    Err(e) => {
                        progress.on_item_complete(scorer.name(), scraper, false);
                        tracing::warn!("{} failed for scraper {}: {}", scorer.name(), scraper, e);
                        return Err(e.into());
                    }
                };

                for (article, values) in table.rows {
                    combined.push(vec![scraper.clone(), article], values);
                }

                progress.on_item_complete(scorer.name(), scraper, true);
                completed += 1;
                progress.on_progress(completed, total);
            }

            tracing::info!("{}: scored {} rows", scorer.name(), combined.len());
            outcomes.push(ScorerOutcome {
                scorer: scorer.name().to_string(),
                table: combined,
            });
        }

        Ok(outcomes)
    }
}

/// Write `<directory>/<scorer>.tsv` for every outcome
pub fn write_score_tables<P: AsRef<Path>>(
    directory: P,
    outcomes: &[ScorerOutcome],
) -> Result<Vec<PathBuf>, LoadError> {
    let directory = directory.as_ref();
    fs::create_dir_all(directory).map_err(|e| LoadError::io(directory, e))?;

    outcomes
        .iter()
        .map(|outcome| {
            let path = directory.join(format!("{}.tsv", outcome.scorer));
            outcome.table.write_to_file(&path)?;
            Ok(path)
        })
        .collect()
}
