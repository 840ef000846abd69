use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-article metric values of one scorer run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub metrics: Vec<String>,
    /// Article id -> one value per metric, in `metrics` order
    pub rows: IndexMap<String, Vec<f64>>,
}

impl ScoreTable {
    pub fn new(metrics: &[&str]) -> Self {
        Self {
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
            rows: IndexMap::new(),
        }
    }

    /// # Panics
    ///
    /// If `values` does not hold exactly one value per metric.
    pub fn insert(&mut self, article_id: impl Into<String>, values: Vec<f64>) {
        assert_eq!(
            values.len(),
            self.metrics.len(),
            "score row width does not match metric count"
        );
        self.rows.insert(article_id.into(), values);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn metric_index(&self, metric: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m == metric)
    }

    /// Value of `metric` for `article_id`
    pub fn get(&self, article_id: &str, metric: &str) -> Option<f64> {
        let column = self.metric_index(metric)?;
        self.rows.get(article_id).and_then(|values| values.get(column).copied())
    }

    /// All values of `metric`, in row order
    pub fn column(&self, metric: &str) -> Option<Vec<f64>> {
        let column = self.metric_index(metric)?;
        Some(self.rows.values().map(|values| values[column]).collect())
    }

    /// True if any cell is NaN
    pub fn has_nan(&self) -> bool {
        self.rows.values().flatten().any(|v| v.is_nan())
    }
}
