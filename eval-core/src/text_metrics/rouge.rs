//! Summary-level ROUGE-L (ROUGE-LSum)
//!
//! Each line is one sentence. For every reference sentence the union of its
//! longest common subsequences with all hypothesis sentences is taken, and the
//! matched tokens are clipped against the token counts of both texts so a
//! token cannot be credited more often than it occurs.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Precision, recall and F-measure of a ROUGE comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RougeScore {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

/// ROUGE-LSum of `hypothesis` against `reference`, sentences split on `\n`.
///
/// Both scores are zero when either side has no tokens.
pub fn rouge_lsum(reference: &str, hypothesis: &str) -> RougeScore {
    let reference = sentences(reference);
    let hypothesis = sentences(hypothesis);

    let reference_len: usize = reference.iter().map(Vec::len).sum();
    let hypothesis_len: usize = hypothesis.iter().map(Vec::len).sum();
    if reference_len == 0 || hypothesis_len == 0 {
        return RougeScore::default();
    }

    let mut reference_counts = token_counts(&reference);
    let mut hypothesis_counts = token_counts(&hypothesis);

    let mut hits = 0usize;
    for sentence in &reference {
        for token in union_lcs(sentence, &hypothesis) {
            let (Some(in_reference), Some(in_hypothesis)) =
                (reference_counts.get_mut(token), hypothesis_counts.get_mut(token))
            else {
                continue;
            };
            if *in_reference > 0 && *in_hypothesis > 0 {
                hits += 1;
                *in_reference -= 1;
                *in_hypothesis -= 1;
            }
        }
    }

    let precision = hits as f64 / hypothesis_len as f64;
    let recall = hits as f64 / reference_len as f64;
    let fmeasure = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    RougeScore {
        precision,
        recall,
        fmeasure,
    }
}

/// Lowercased ASCII alphanumeric tokens of every non-empty line
fn sentences(text: &str) -> Vec<Vec<String>> {
    text.split('\n')
        .map(tokenize)
        .filter(|tokens| !tokens.is_empty())
        .collect()
}

fn tokenize(sentence: &str) -> Vec<String> {
    let normalized: String = sentence
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { ' ' })
        .collect();
    normalized.split_whitespace().map(str::to_string).collect()
}

fn token_counts(sentences: &[Vec<String>]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for token in sentences.iter().flatten() {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Tokens of `reference` that lie on an LCS with any hypothesis sentence, in order
fn union_lcs<'a>(reference: &'a [String], hypothesis: &[Vec<String>]) -> Vec<&'a str> {
    let indices: BTreeSet<usize> = hypothesis
        .iter()
        .flat_map(|candidate| lcs_indices(reference, candidate))
        .collect();
    indices.into_iter().map(|i| reference[i].as_str()).collect()
}

/// Positions in `reference` of one longest common subsequence with `candidate`
fn lcs_indices(reference: &[String], candidate: &[String]) -> Vec<usize> {
    let rows = reference.len() + 1;
    let cols = candidate.len() + 1;

    let mut table = vec![0u32; rows * cols];
    for i in 1..rows {
        for j in 1..cols {
            table[i * cols + j] = if reference[i - 1] == candidate[j - 1] {
                table[(i - 1) * cols + j - 1] + 1
            } else {
                table[(i - 1) * cols + j].max(table[i * cols + j - 1])
            };
        }
    }

    let mut indices = Vec::new();
    let (mut i, mut j) = (reference.len(), candidate.len());
    while i > 0 && j > 0 {
        if reference[i - 1] == candidate[j - 1] {
            indices.push(i - 1);
            i -= 1;
            j -= 1;
        } else if table[i * cols + j - 1] > table[(i - 1) * cols + j] {
            j -= 1;
        } else {
            i -= 1;
        }
    }
    indices.reverse();
    indices
}
