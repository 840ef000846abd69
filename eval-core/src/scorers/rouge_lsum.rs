use super::{Objective, Scorer};
use crate::text_metrics::{rouge_lsum, RougeScore};
use crate::variants::reference_variants;

/// ROUGE-LSum with one paragraph per summary sentence; the variant with the
/// highest F-measure is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct RougeLSum;

impl RougeLSum {
    pub fn best_score(
        &self,
        reference: &[String],
        hypothesis: &[String],
        max_optional_paragraphs: Option<usize>,
    ) -> RougeScore {
        let hypothesis = hypothesis.join("\n");
        let candidates = reference_variants(reference, max_optional_paragraphs)
            .map(|variant| rouge_lsum(&variant.join("\n"), &hypothesis));

        Objective::Maximize
            .select(candidates, |score| score.fmeasure)
            .unwrap_or_default()
    }
}

impl Scorer for RougeLSum {
    fn name(&self) -> &'static str {
        "rouge_lsum"
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
        let score = self.best_score(reference, hypothesis, max_optional_paragraphs);
        vec![score.precision, score.recall, score.fmeasure]
    }
}
