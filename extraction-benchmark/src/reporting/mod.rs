//! Results reporting

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::{ranking_column, summarize_by_scraper};
use crate::config::OptionalParagraphCap;
use crate::dataset::TsvTable;
use crate::runner::ScorerOutcome;

/// JSON summary export of a `score` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub run_id: String,
    pub timestamp: String,
    pub total_articles: usize,
    pub max_optional_paragraphs: OptionalParagraphCap,
    pub scrapers: Vec<String>,
    pub scorers: Vec<ScorerSummary>,
}

/// Scraper ranking under one scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerSummary {
    pub scorer: String,
    pub table_file: String,
    /// Metric the ranking is based on, if the scorer has one
    pub ranked_by: Option<String>,
    pub rankings: Vec<ScraperRanking>,
}

/// Scraper position in a ranking; `mean` is in percent, absent when undefined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperRanking {
    pub scraper: String,
    pub mean: Option<f64>,
}

impl JsonSummary {
    /// Create from the combined scorer tables
    pub fn from_outcomes(
        run_id: impl Into<String>,
        outcomes: &[ScorerOutcome],
        total_articles: usize,
        max_optional_paragraphs: OptionalParagraphCap,
    ) -> Self {
        let mut scrapers: Vec<String> = Vec::new();
        for outcome in outcomes {
            for row in &outcome.table.rows {
                if !scrapers.contains(&row.keys[0]) {
                    scrapers.push(row.keys[0].clone());
                }
            }
        }

        let scorers = outcomes
            .iter()
            .map(|outcome| {
                let summary = summarize_by_scraper(&outcome.table);
                let column = ranking_column(&summary).map(|(column, _)| column);
                let rankings = summary
                    .rows
                    .iter()
                    .map(|row| ScraperRanking {
                        scraper: row.keys[0].clone(),
                        mean: column.map(|c| row.values[c]).filter(|v| !v.is_nan()),
                    })
                    .collect();

                ScorerSummary {
                    scorer: outcome.scorer.clone(),
                    table_file: format!("{}.tsv", outcome.scorer),
                    ranked_by: column.map(|c| summary.columns[c].clone()),
                    rankings,
                }
            })
            .collect();

        Self {
            run_id: run_id.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            total_articles,
            max_optional_paragraphs,
            scrapers,
            scorers,
        }
    }

    /// Write to JSON file
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

/// Print a per-scraper summary table, best scraper first
pub fn print_console_report(name: &str, summary: &TsvTable) {
    println!("\n=== {} ===\n", name);

    println!("Scraper Rankings:");
    println!("{:-<50}", "");

    for (i, row) in summary.rows.iter().enumerate() {
        let metrics: Vec<String> = summary
            .columns
            .chunks(2)
            .zip(row.values.chunks(2))
            .map(|(names, values)| {
                let metric = names[0].trim_end_matches("_mean");
                match values {
                    [mean, std] if !std.is_nan() => format!("{}: {:.2} ± {:.2}", metric, mean, std),
                    [mean, ..] => format!("{}: {:.2}", metric, mean),
                    [] => metric.to_string(),
                }
            })
            .collect();
        println!("  {}. {} - {}", i + 1, row.keys.join(" / "), metrics.join(", "));
    }

    println!("\n{:=<50}", "");
}

/// Print the box-plot statistics of the complexity columns
pub fn print_complexity_report(summary: &TsvTable) {
    println!("\n=== Page Complexity ===\n");
    println!("{:<42} {}", "", summary.columns.join("  "));
    println!("{:-<50}", "");

    for row in &summary.rows {
        let values: Vec<String> = row.values.iter().map(|v| format!("{:.3}", v)).collect();
        println!("{:<42} {}", row.keys[0], values.join("  "));
    }

    println!("\n{:=<50}", "");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::SCORE_INDEX;

    fn outcome() -> ScorerOutcome {
        let mut table = TsvTable::new(SCORE_INDEX, ["precision", "recall", "f1_score"]);
        table.push(vec!["bte".into(), "ap_0001".into()], vec![0.5, 0.5, 0.5]);
        table.push(vec!["fundus".into(), "ap_0001".into()], vec![1.0, 1.0, 1.0]);
        table.push(vec!["empty".into(), "ap_0001".into()], vec![f64::NAN, 0.0, f64::NAN]);
        ScorerOutcome {
            scorer: "paragraph_match".to_string(),
            table,
        }
    }

    #[test]
    fn test_summary_rankings() {
        let summary = JsonSummary::from_outcomes("run-1", &[outcome()], 1, OptionalParagraphCap::Limit(4));
        assert_eq!(summary.scrapers, vec!["bte", "fundus", "empty"]);

        let scorer = &summary.scorers[0];
        assert_eq!(scorer.table_file, "paragraph_match.tsv");
        assert_eq!(scorer.ranked_by.as_deref(), Some("f1_score_mean"));
        let order: Vec<&str> = scorer.rankings.iter().map(|r| r.scraper.as_str()).collect();
        assert_eq!(order, vec!["fundus", "bte", "empty"]);
        assert_eq!(scorer.rankings[0].mean, Some(100.0));
        assert_eq!(scorer.rankings[2].mean, None);
    }

    #[test]
    fn test_write_summary_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = JsonSummary::from_outcomes("run-2", &[outcome()], 1, OptionalParagraphCap::Unlimited);
        summary.write_to_file(&path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["run_id"], "run-2");
        assert_eq!(value["max_optional_paragraphs"], "unlimited");
        assert_eq!(value["scorers"][0]["rankings"][2]["mean"], serde_json::Value::Null);
    }
}
