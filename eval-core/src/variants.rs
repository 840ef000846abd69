//! Reference variant enumeration
//!
//! A reference body with `k` optional paragraphs has `2^k` acceptable
//! renderings: every subset of the optional paragraphs may be dropped, and the
//! survivors lose their markers. Enumeration is lazy so scorers can stop early
//! or fold over the variants without materialising all of them.
//!
//! Above `max_optional_paragraphs` only the two extremes are produced (keep
//! every optional paragraph, drop every optional paragraph).

use crate::optional::{optional_indices, prepare_body};

/// Number of variants [`reference_variants`] yields for `body`.
///
/// Saturates at `usize::MAX` for absurdly large uncapped bodies.
pub fn variant_count<S: AsRef<str>>(body: &[S], max_optional_paragraphs: Option<usize>) -> usize {
    plan_count(optional_indices(body).len(), max_optional_paragraphs)
}

fn plan_count(optional: usize, max_optional_paragraphs: Option<usize>) -> usize {
    match max_optional_paragraphs {
        Some(cap) if optional > cap => 2,
        _ => u32::try_from(optional)
            .ok()
            .and_then(|k| 1usize.checked_shl(k))
            .unwrap_or(usize::MAX),
    }
}

/// Enumerate the acceptable reference bodies of `body`.
///
/// Subsets of optional paragraphs are removed in order of increasing size and,
/// within one size, in lexicographic order of their indices. The first variant
/// therefore always keeps every paragraph; with the cap exceeded the order is
/// keep-all, drop-all.
pub fn reference_variants<S: AsRef<str>>(
    body: &[S],
    max_optional_paragraphs: Option<usize>,
) -> ReferenceVariants<'_, S> {
    let optional = optional_indices(body);
    let total = plan_count(optional.len(), max_optional_paragraphs);

    let state = match max_optional_paragraphs {
        Some(cap) if optional.len() > cap => {
            tracing::debug!(
                optional = optional.len(),
                cap,
                "optional paragraphs above cap, enumerating keep-all and drop-all only"
            );
            State::Extremes { emitted: 0 }
        }
        _ => State::Powerset {
            size: 0,
            combination: Some(Vec::new()),
        },
    };

    ReferenceVariants {
        body,
        optional,
        state,
        remaining: total,
    }
}

/// Lazy iterator returned by [`reference_variants`].
#[derive(Debug, Clone)]
pub struct ReferenceVariants<'a, S> {
    body: &'a [S],
    optional: Vec<usize>,
    state: State,
    remaining: usize,
}

#[derive(Debug, Clone)]
enum State {
    Extremes { emitted: u8 },
    /// `combination` holds positions into `optional`, strictly increasing.
    Powerset {
        size: usize,
        combination: Option<Vec<usize>>,
    },
}

impl<S: AsRef<str>> ReferenceVariants<'_, S> {
    /// Optional paragraph count of the underlying body
    pub fn optional_count(&self) -> usize {
        self.optional.len()
    }

    fn render(&self, positions: &[usize]) -> Vec<String> {
        let remove: Vec<usize> = positions.iter().map(|&p| self.optional[p]).collect();
        prepare_body(self.body, &remove)
    }
}

impl<S: AsRef<str>> Iterator for ReferenceVariants<'_, S> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let variant = match &mut self.state {
            State::Extremes { emitted } => {
                let variant = match *emitted {
                    0 => prepare_body(self.body, &[]),
                    1 => prepare_body(self.body, &self.optional),
                    _ => return None,
                };
                *emitted += 1;
                variant
            }
            State::Powerset { size, combination } => {
                let current = combination.take()?;
                let k = self.optional.len();

                let mut next = current.clone();
                *combination = if advance(&mut next, k) {
                    Some(next)
                } else if *size < k {
                    *size += 1;
                    Some((0..*size).collect())
                } else {
                    None
                };

                self.render(&current)
            }
        };

        self.remaining = self.remaining.saturating_sub(1);
        Some(variant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Step `combination` to the next same-size combination of `0..n` in
/// lexicographic order. Returns false when it was the last one.
fn advance(combination: &mut [usize], n: usize) -> bool {
    let size = combination.len();
    let Some(pivot) = (0..size).rev().find(|&i| combination[i] < n - size + i) else {
        return false;
    };

    combination[pivot] += 1;
    for i in pivot + 1..size {
        combination[i] = combination[i - 1] + 1;
    }
    true
}
