//! Article collections shared by ground truth and extractions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One evaluated web page.
///
/// Ground truth and extractor output share this shape; only the meaning of
/// `body` differs (annotated reference paragraphs vs. extracted paragraphs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    /// Paragraphs in document order
    pub body: Vec<String>,
    /// ISO-8601 crawl timestamp, kept verbatim
    pub crawl_date: String,
}

impl Article {
    pub fn new<I, S>(url: impl Into<String>, body: I, crawl_date: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            url: url.into(),
            body: body.into_iter().map(Into::into).collect(),
            crawl_date: crawl_date.into(),
        }
    }

    /// Same article with a different body
    pub fn with_body(&self, body: Vec<String>) -> Self {
        Self {
            url: self.url.clone(),
            body,
            crawl_date: self.crawl_date.clone(),
        }
    }
}

/// Articles keyed by identifier, iterated in key order.
pub type ArticleSet = BTreeMap<String, Article>;

/// Publisher part of an article identifier (`"APNews_0007.html.gz"` -> `"APNews"`).
pub fn publisher_identifier(article_id: &str) -> &str {
    article_id.split('_').next().unwrap_or(article_id)
}
