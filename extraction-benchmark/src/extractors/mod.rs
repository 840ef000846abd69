//! Extractor collaborators
//!
//! An extractor turns one HTML page into a list of paragraphs. The benchmark
//! never implements extraction itself: every extractor is an external program
//! configured in `[extractors.<name>]` and run through [`CommandExtractor`].

pub mod command;

pub use command::CommandExtractor;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

use crate::config::Config;

/// Input for a single extraction
#[derive(Debug, Clone)]
pub struct ExtractRequest<'a> {
    pub url: &'a str,
    pub html: &'a str,
    /// Article id up to the first `_`
    pub publisher: &'a str,
    pub crawl_date: NaiveDateTime,
}

/// Error types for extractor operations
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("unreadable output from '{command}': {message}")]
    Output { command: String, message: String },

    #[error("IO error while running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid crawl date '{0}'")]
    CrawlDate(String),

    #[error("unknown extractor '{name}' (available: {available})")]
    UnknownExtractor { name: String, available: String },
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Trait for content extractors
pub trait Extractor: Send + Sync {
    /// Extract the main-content paragraphs of a page
    fn extract(&self, request: &ExtractRequest<'_>) -> ExtractResult<Vec<String>>;
}

/// Collapses whitespace inside every paragraph and drops empty paragraphs.
#[derive(Debug, Clone)]
pub struct Normalized<E> {
    inner: E,
}

impl<E: Extractor> Normalized<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: Extractor> Extractor for Normalized<E> {
    fn extract(&self, request: &ExtractRequest<'_>) -> ExtractResult<Vec<String>> {
        Ok(normalize_paragraphs(self.inner.extract(request)?))
    }
}

/// Whitespace-normalize paragraphs, dropping the ones left empty
pub fn normalize_paragraphs(paragraphs: Vec<String>) -> Vec<String> {
    paragraphs
        .into_iter()
        .map(|paragraph| paragraph.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

/// Parse an ISO-8601 crawl date (date, date-time, with or without offset).
pub fn parse_crawl_date(value: &str) -> ExtractResult<NaiveDateTime> {
    let value = value.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time.naive_local());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"] {
        if let Ok(date_time) = DateTime::parse_from_str(value, format) {
            return Ok(date_time.naive_local());
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(date_time);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ExtractError::CrawlDate(value.to_string()))
}

/// Explicit name -> extractor table
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: IndexMap<String, Box<dyn Extractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every enabled `[extractors.<name>]` entry, normalized
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        for (name, extractor) in config.enabled_extractors() {
            registry.register(
                name,
                Box::new(Normalized::new(CommandExtractor::from_config(extractor))),
            );
        }
        tracing::debug!("Registered extractors: {}", registry.names().join(", "));
        registry
    }

    /// Add an extractor, replacing any extractor of the same name
    pub fn register(&mut self, name: impl Into<String>, extractor: Box<dyn Extractor>) {
        self.extractors.insert(name.into(), extractor);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Extractor> {
        self.extractors.get(name).map(|extractor| extractor.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.extractors.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Resolve `names` in order, or every registered extractor when `names` is empty.
    pub fn select(&self, names: &[String]) -> ExtractResult<Vec<(&str, &dyn Extractor)>> {
        if names.is_empty() {
            return Ok(self
                .extractors
                .iter()
                .map(|(name, extractor)| (name.as_str(), extractor.as_ref()))
                .collect());
        }

        names
            .iter()
            .map(|name| {
                self.extractors
                    .get_key_value(name.as_str())
                    .map(|(key, extractor)| (key.as_str(), extractor.as_ref()))
                    .ok_or_else(|| ExtractError::UnknownExtractor {
                        name: name.clone(),
                        available: self.names().join(", "),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    struct Fixed(Vec<&'static str>);

    impl Extractor for Fixed {
        fn extract(&self, _request: &ExtractRequest<'_>) -> ExtractResult<Vec<String>> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    fn request(html: &str) -> ExtractRequest<'_> {
        ExtractRequest {
            url: "https://example.com",
            html,
            publisher: "example",
            crawl_date: parse_crawl_date("2023-05-01 12:00:00").unwrap(),
        }
    }

    #[test]
    fn test_normalized_collapses_and_drops() {
        let extractor = Normalized::new(Fixed(vec!["  Hello \n  world ", "", "   ", "\tLast\tone"]));
        let paragraphs = extractor.extract(&request("")).unwrap();
        assert_eq!(paragraphs, vec!["Hello world", "Last one"]);
    }

    #[test]
    fn test_parse_crawl_date_forms() {
        let plain = parse_crawl_date("2023-07-12 08:30:00").unwrap();
        assert_eq!((plain.year(), plain.month(), plain.day(), plain.hour()), (2023, 7, 12, 8));

        assert!(parse_crawl_date("2023-07-12T08:30:00.123").is_ok());
        assert!(parse_crawl_date("2023-07-12T08:30:00+02:00").is_ok());
        assert!(parse_crawl_date("2023-07-12 08:30:00+02:00").is_ok());
        assert_eq!(parse_crawl_date("2023-07-12").unwrap().hour(), 0);
        assert!(matches!(parse_crawl_date("yesterday"), Err(ExtractError::CrawlDate(_))));
    }

    #[test]
    fn test_registry_select() {
        let mut registry = ExtractorRegistry::new();
        registry.register("fixed_a", Box::new(Fixed(vec!["a"])));
        registry.register("fixed_b", Box::new(Fixed(vec!["b"])));

        assert!(!registry.is_empty());
        let all = registry.select(&[]).unwrap();
        assert_eq!(all.iter().map(|(n, _)| *n).collect::<Vec<_>>(), vec!["fixed_a", "fixed_b"]);

        let picked = registry.select(&["fixed_b".to_string()]).unwrap();
        assert_eq!(picked[0].1.extract(&request("")).unwrap(), vec!["b"]);

        let err = registry.select(&["missing".to_string()]).err().unwrap();
        assert!(err.to_string().contains("fixed_a, fixed_b"));
    }

    #[test]
    fn test_registry_from_config_skips_disabled() {
        let registry = ExtractorRegistry::from_config(&Config::sample());
        assert_eq!(registry.names(), vec!["trafilatura"]);

        assert!(ExtractorRegistry::from_config(&Config::default()).is_empty());
    }
}
