//! Scorers and the scorer registry
//!
//! Every scorer follows the same policy: enumerate the reference variants of
//! an article, score the extracted body against each one and keep the best.
//! Only the per-variant metric and the direction of "best" differ.

mod paragraph_match;
mod rouge_lsum;
mod table;
mod word_error_rate;

pub use paragraph_match::ParagraphMatch;
pub use rouge_lsum::RougeLSum;
pub use table::ScoreTable;
pub use word_error_rate::WordErrorRate;

use indexmap::IndexMap;

use crate::article::ArticleSet;

/// Errors raised while scoring
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error(
        "reference and hypothesis articles differ: missing in hypothesis {missing_in_hypothesis:?}, \
         missing in reference {missing_in_reference:?}"
    )]
    KeyMismatch {
        missing_in_hypothesis: Vec<String>,
        missing_in_reference: Vec<String>,
    },

    #[error("unknown scorer '{name}' (available: {available})")]
    UnknownScorer { name: String, available: String },

    #[error("scorer '{scorer}' returned {found} values for article '{article_id}', expected {expected}")]
    MetricCount {
        scorer: String,
        article_id: String,
        expected: usize,
        found: usize,
    },
}

/// Input of a scorer invocation
#[derive(Debug, Clone, Copy)]
pub struct ScoreRequest<'a> {
    pub reference: &'a ArticleSet,
    pub hypothesis: &'a ArticleSet,
    /// Above this many optional paragraphs only two variants are tried; `None` never caps
    pub max_optional_paragraphs: Option<usize>,
}

impl<'a> ScoreRequest<'a> {
    pub fn new(
        reference: &'a ArticleSet,
        hypothesis: &'a ArticleSet,
        max_optional_paragraphs: Option<usize>,
    ) -> Self {
        Self {
            reference,
            hypothesis,
            max_optional_paragraphs,
        }
    }

    /// Fail unless both collections cover exactly the same articles.
    pub fn check_keys(&self) -> Result<(), ScoreError> {
        let missing_in_hypothesis: Vec<String> = self
            .reference
            .keys()
            .filter(|key| !self.hypothesis.contains_key(*key))
            .cloned()
            .collect();
        let missing_in_reference: Vec<String> = self
            .hypothesis
            .keys()
            .filter(|key| !self.reference.contains_key(*key))
            .cloned()
            .collect();

        if missing_in_hypothesis.is_empty() && missing_in_reference.is_empty() {
            Ok(())
        } else {
            Err(ScoreError::KeyMismatch {
                missing_in_hypothesis,
                missing_in_reference,
            })
        }
    }
}

/// A named scoring function over article collections.
pub trait Scorer: Send + Sync {
    /// Registry key, also the output table name
    fn name(&self) -> &'static str;

    /// Column names of the values returned by [`Scorer::score_article`]
    fn metrics(&self) -> &'static [&'static str];

    /// Score one extracted body against one annotated reference body.
    fn score_article(
        &self,
        reference: &[String],
        hypothesis: &[String],
        max_optional_paragraphs: Option<usize>,
    ) -> Vec<f64>;

    /// Score every article of the request.
    fn score(&self, request: &ScoreRequest<'_>) -> Result<ScoreTable, ScoreError> {
        request.check_keys()?;

        let mut table = ScoreTable::new(self.metrics());
        for (article_id, reference) in request.reference {
            let Some(hypothesis) = request.hypothesis.get(article_id) else {
                continue;
            };
            let values = self.score_article(
                &reference.body,
                &hypothesis.body,
                request.max_optional_paragraphs,
            );
            if values.len() != self.metrics().len() {
                return Err(ScoreError::MetricCount {
                    scorer: self.name().to_string(),
                    article_id: article_id.clone(),
                    expected: self.metrics().len(),
                    found: values.len(),
                });
            }
            table.insert(article_id.clone(), values);
        }

        tracing::debug!(scorer = self.name(), articles = table.len(), "scored articles");
        Ok(table)
    }
}

/// Which end of a metric is better
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Objective {
    /// True when `candidate` beats `incumbent`. NaN never wins and always loses.
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        if candidate.is_nan() {
            return false;
        }
        if incumbent.is_nan() {
            return true;
        }
        match self {
            Objective::Maximize => candidate > incumbent,
            Objective::Minimize => candidate < incumbent,
        }
    }

    /// First best candidate by `key`; ties keep the earlier candidate.
    pub fn select<T>(self, candidates: impl IntoIterator<Item = T>, key: impl Fn(&T) -> f64) -> Option<T> {
        let mut best: Option<(T, f64)> = None;
        for candidate in candidates {
            let value = key(&candidate);
            let replace = match &best {
                None => true,
                Some((_, incumbent)) => self.improves(value, *incumbent),
            };
            if replace {
                best = Some((candidate, value));
            }
        }
        best.map(|(candidate, _)| candidate)
    }
}

/// Explicit name -> scorer table
pub struct ScorerRegistry {
    scorers: IndexMap<&'static str, Box<dyn Scorer>>,
}

impl ScorerRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            scorers: IndexMap::new(),
        }
    }

    /// Registry holding paragraph_match, rouge_lsum and wer
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ParagraphMatch));
        registry.register(Box::new(RougeLSum));
        registry.register(Box::new(WordErrorRate));
        registry
    }

    /// Add a scorer, replacing any scorer of the same name
    pub fn register(&mut self, scorer: Box<dyn Scorer>) {
        self.scorers.insert(scorer.name(), scorer);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Scorer> {
        self.scorers.get(name).map(|scorer| scorer.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.scorers.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Scorer> {
        self.scorers.values().map(|scorer| scorer.as_ref())
    }

    /// Resolve `names` in order, or every registered scorer when `names` is empty.
    pub fn select(&self, names: &[String]) -> Result<Vec<&dyn Scorer>, ScoreError> {
        if names.is_empty() {
            return Ok(self.iter().collect());
        }

        names
            .iter()
            .map(|name| {
                self.get(name).ok_or_else(|| ScoreError::UnknownScorer {
                    name: name.clone(),
                    available: self.names().join(", "),
                })
            })
            .collect()
    }
}

impl Default for ScorerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
