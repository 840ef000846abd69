//! Scoring core for web content extraction evaluation
//!
//! Ground-truth articles carry paragraphs that annotators marked as optional
//! by wrapping them in `[` and `]`. This crate enumerates every acceptable
//! rendering of such a reference body, scores an extraction against each of
//! them and keeps the best score per article.
//!
//! # Components
//!
//! - [`optional`]: marker detection and stripping
//! - [`variants`]: lazy enumeration of reference variants, with a two-variant
//!   fallback above a configurable optional-paragraph cap
//! - [`confusion`]: multiset confusion matrix with NaN-safe precision, recall
//!   and F1
//! - [`text_metrics`]: word error rate and ROUGE-LSum
//! - [`scorers`]: the [`Scorer`] trait, the built-in scorers and their registry
//!
//! # Example
//!
//! ```
//! use eval_core::{Article, ArticleSet, ScoreRequest, ScorerRegistry};
//!
//! let mut reference = ArticleSet::new();
//! reference.insert(
//!     "publisher_0001".to_string(),
//!     Article::new("https://example.com/a", ["Intro", "[Read more]", "Body"], "2024-01-01 10:00:00"),
//! );
//! let mut hypothesis = ArticleSet::new();
//! hypothesis.insert(
//!     "publisher_0001".to_string(),
//!     Article::new("https://example.com/a", ["Intro", "Body"], "2024-01-01 10:00:00"),
//! );
//!
//! let registry = ScorerRegistry::builtin();
//! let scorer = registry.get("paragraph_match").unwrap();
//! let table = scorer
//!     .score(&ScoreRequest::new(&reference, &hypothesis, Some(4)))
//!     .unwrap();
//!
//! assert_eq!(table.get("publisher_0001", "f1_score"), Some(1.0));
//! ```

pub mod article;
pub mod confusion;
pub mod optional;
pub mod scorers;
pub mod text_metrics;
pub mod variants;

pub use article::{publisher_identifier, Article, ArticleSet};
pub use confusion::ConfusionMatrix;
pub use optional::{is_optional, optional_indices, prepare_body, strip_marker};
pub use scorers::{
    Objective, ParagraphMatch, RougeLSum, ScoreError, ScoreRequest, ScoreTable, Scorer,
    ScorerRegistry, WordErrorRate,
};
pub use variants::{reference_variants, variant_count, ReferenceVariants};
