use super::{Objective, Scorer};
use crate::text_metrics::word_error_rate;
use crate::variants::reference_variants;

/// Word error rate over the whole body, paragraphs joined by blank lines.
/// Lower is better, so the variant with the smallest WER is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordErrorRate;

impl WordErrorRate {
    pub fn best_wer(
        &self,
        reference: &[String],
        hypothesis: &[String],
        max_optional_paragraphs: Option<usize>,
    ) -> f64 {
        let hypothesis = hypothesis.join("\n\n");
        let candidates = reference_variants(reference, max_optional_paragraphs)
            .map(|variant| word_error_rate(&variant.join("\n\n"), &hypothesis));

        Objective::Minimize
            .select(candidates, |wer| *wer)
            .unwrap_or(f64::NAN)
    }
}

impl Scorer for WordErrorRate {
    fn name(&self) -> &'static str {
        "wer"
    }

    fn metrics(&self) -> &'static [&'static str] {
        &["wer"]
    }

    fn score_article(
        &self,
        reference: &[String],
        hypothesis: &[String],
        max_optional_paragraphs: Option<usize>,
    ) -> Vec<f64> {
        vec![self.best_wer(reference, hypothesis, max_optional_paragraphs)]
    }
}
