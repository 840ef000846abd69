//! Multiset confusion matrix

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Overlap counts between a reference and a hypothesis collection.
///
/// Built from multisets: order is ignored, duplicates count individually.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    /// Tracked for completeness; no derived metric uses it.
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Compare two collections as multisets.
    pub fn from_evaluation<T, R, H>(reference: R, hypothesis: H) -> Self
    where
        T: Eq + Hash,
        R: IntoIterator<Item = T>,
        H: IntoIterator<Item = T>,
    {
        let reference_counts = count(reference);
        let mut hypothesis_counts = count(hypothesis);

        let mut matrix = Self::default();
        for (item, reference_count) in reference_counts {
            let hypothesis_count = hypothesis_counts.remove(&item).unwrap_or(0);
            matrix.tally(reference_count, hypothesis_count);
        }
        // Items only the hypothesis produced
        for hypothesis_count in hypothesis_counts.into_values() {
            matrix.tally(0, hypothesis_count);
        }

        matrix
    }

    fn tally(&mut self, reference_count: usize, hypothesis_count: usize) {
        self.true_positives += reference_count.min(hypothesis_count);
        self.false_positives += hypothesis_count.saturating_sub(reference_count);
        self.false_negatives += reference_count.saturating_sub(hypothesis_count);
    }

    /// `tp / (tp + fp)`, NaN when nothing was predicted
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// `tp / (tp + fn)`, NaN when the reference is empty
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall.
    ///
    /// NaN when either input is NaN or both are zero.
    pub fn f1_score(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        let denominator = precision + recall;

        if denominator.is_nan() || denominator == 0.0 {
            f64::NAN
        } else {
            2.0 * precision * recall / denominator
        }
    }
}

fn count<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> HashMap<T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        numerator as f64 / denominator as f64
    }
}
