//! Scrape driver: runs extractors over the ground-truth pages

use std::fs;
use std::path::{Path, PathBuf};

use eval_core::{publisher_identifier, ArticleSet};

use super::{ProgressCallback, RunError};
use crate::dataset::{load_html, write_articles, LoadError};
use crate::extractors::{parse_crawl_date, ExtractRequest, Extractor};

/// Runs every selected extractor over every ground-truth article.
pub struct ScrapeRunner<'a> {
    extractors: Vec<(&'a str, &'a dyn Extractor)>,
    html_directory: PathBuf,
}

impl<'a> ScrapeRunner<'a> {
    pub fn new(extractors: Vec<(&'a str, &'a dyn Extractor)>, html_directory: impl Into<PathBuf>) -> Self {
        Self {
            extractors,
            html_directory: html_directory.into(),
        }
    }

    /// Scrape and write `<output_directory>/<scraper>.json` per extractor.
    pub fn run(
        &self,
        ground_truth: &ArticleSet,
        output_directory: &Path,
        progress: &dyn ProgressCallback,
    ) -> Result<Vec<PathBuf>, RunError> {
        fs::create_dir_all(output_directory).map_err(|e| LoadError::io(output_directory, e))?;

        let total = self.extractors.len() * ground_truth.len();
        let mut completed = 0;
        progress.on_progress(completed, total);

        let mut written = Vec::with_capacity(self.extractors.len());
        for (scraper, extractor) in &self.extractors {
            tracing::info!("Scraping {} articles with {}", ground_truth.len(), scraper);

            let scraped = scrape_articles(scraper, *extractor, ground_truth, &self.html_directory, |article, success| {
                progress.on_item_complete(scraper, article, success);
                if success {
                    completed += 1;
                    progress.on_progress(completed, total);
                }
            })?;

            let path = output_directory.join(format!("{}.json", scraper));
            write_articles(&path, &scraped)?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Extract every article of `ground_truth` with one extractor.
///
/// `on_article` is called after each article with its id and whether it succeeded.
pub fn scrape_articles(
    scraper: &str,
    extractor: &dyn Extractor,
    ground_truth: &ArticleSet,
    html_directory: &Path,
    mut on_article: impl FnMut(&str, bool),
) -> Result<ArticleSet, RunError> {
    let mut scraped = ArticleSet::new();

    for (article_id, article) in ground_truth {
        let result = load_html(html_directory, article_id)
            .map_err(RunError::from)
            .and_then(|html| {
                let crawl_date = parse_crawl_date(&article.crawl_date).map_err(|source| scrape_error(scraper, article_id, source))?;
                let request = ExtractRequest {
                    url: &article.url,
                    html: &html,
                    publisher: publisher_identifier(article_id),
                    crawl_date,
                };
                extractor
                    .extract(&request)
                    .map_err(|source| scrape_error(scraper, article_id, source))
            });

        match result {
            Ok(body) => {
                on_article(article_id, true);
                scraped.insert(article_id.clone(), article.with_body(body));
            }
            Err(e) => {
                on_article(article_id, false);
                return Err(e);
            }
        }
    }

    Ok(scraped)
}

fn scrape_error(scraper: &str, article: &str, source: crate::extractors::ExtractError) -> RunError {
    RunError::Scrape {
        scraper: scraper.to_string(),
        article: article.to_string(),
        source,
    }
}
