use super::{Objective, Scorer};
use crate::confusion::ConfusionMatrix;
use crate::variants::reference_variants;

/// Paragraph-level precision, recall and F1.
///
/// Paragraphs are compared as whole strings; the reference variant with the
/// highest F1 is kept. A variant matched exactly (no false positives or
/// negatives) ranks as F1 = 1 even when both sides are empty, so an empty
/// extraction of an all-optional reference selects the empty variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphMatch;

impl ParagraphMatch {
    /// Confusion matrix of the best-matching reference variant
    pub fn best_matrix(
        &self,
        reference: &[String],
        hypothesis: &[String],
        max_optional_paragraphs: Option<usize>,
    ) -> ConfusionMatrix {
        let candidates = reference_variants(reference, max_optional_paragraphs)
            .map(|variant| ConfusionMatrix::from_evaluation(variant.iter(), hypothesis.iter()));

        // There is always at least one variant; the default only covers the type.
        Objective::Maximize
            .select(candidates, selection_key)
            .unwrap_or_default()
    }
}

fn selection_key(matrix: &ConfusionMatrix) -> f64 {
    if matrix.false_positives == 0 && matrix.false_negatives == 0 {
        1.0
    } else {
        matrix.f1_score()
    }
}

impl Scorer for ParagraphMatch {
    fn name(&self) -> &'static str {
        "paragraph_match"
    }

    fn metrics(&self) -> &'static [&'static str] {
        &["precision", "recall", "f1_score"]
    }

    fn score_article(
        &self,
        reference: &[String],
        hypothesis: &[String],
        max_optional_paragraphs: Option<usize>,
    ) -> Vec<f64> {
        let matrix = self.best_matrix(reference, hypothesis, max_optional_paragraphs);
        vec![matrix.precision(), matrix.recall(), matrix.f1_score()]
    }
}
