//! Aggregation of per-article score tables

use std::cmp::Ordering;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::dataset::TsvTable;

static ARTICLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\d+(?:\.html(?:\.gz)?)?$").expect("valid regex"));

/// Statistics reported per complexity column, in column order
pub const COMPLEXITY_STATISTICS: [&str; 6] = ["min", "q1", "median", "q3", "max", "mean"];

/// Publisher of an article id (`"APNews_0007.html.gz"` -> `"APNews"`)
pub fn publisher_of(article_id: &str) -> String {
    ARTICLE_SUFFIX.replace(article_id, "").into_owned()
}

/// Mean of the non-NaN values; NaN when there are none
pub fn mean(values: &[f64]) -> f64 {
    let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if present.is_empty() {
        return f64::NAN;
    }
    present.iter().sum::<f64>() / present.len() as f64
}

/// Sample standard deviation of the non-NaN values; NaN below two values
pub fn sample_std(values: &[f64]) -> f64 {
    let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if present.len() < 2 {
        return f64::NAN;
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    let variance = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (present.len() - 1) as f64;
    variance.sqrt()
}

/// Linearly interpolated quantile of the non-NaN values
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if present.is_empty() {
        return f64::NAN;
    }
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let position = q.clamp(0.0, 1.0) * (present.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    present[lower] + (present[upper] - present[lower]) * (position - lower as f64)
}

/// Percent with two decimals
fn percent(value: f64) -> f64 {
    (value * 100.0 * 100.0).round() / 100.0
}

/// Mean and standard deviation of every metric, grouped by the given key columns.
///
/// Output columns are `<metric>_mean` and `<metric>_std`, scaled to percent and
/// rounded to two decimals.
fn summarize<F>(table: &TsvTable, index: &[&str], key_of: F) -> TsvTable
where
    F: Fn(&[String]) -> Vec<String>,
{
    let columns = table
        .columns
        .iter()
        .flat_map(|metric| [format!("{}_mean", metric), format!("{}_std", metric)]);
    let mut summary = TsvTable::new(index.iter().copied(), columns);

    let mut groups: IndexMap<Vec<String>, Vec<usize>> = IndexMap::new();
    for (position, row) in table.rows.iter().enumerate() {
        groups.entry(key_of(&row.keys)).or_default().push(position);
    }

    for (keys, positions) in groups {
        let mut values = Vec::with_capacity(table.columns.len() * 2);
        for column in 0..table.columns.len() {
            let cells: Vec<f64> = positions.iter().map(|&p| table.rows[p].values[column]).collect();
            values.push(percent(mean(&cells)));
            values.push(percent(sample_std(&cells)));
        }
        summary.push(keys, values);
    }

    summary
}

/// Per-scraper summary, best scraper first.
///
/// Ranked by `f1_score` mean (descending) or, for tables without it, `wer`
/// mean (ascending).
pub fn summarize_by_scraper(table: &TsvTable) -> TsvTable {
    let scraper = table.index_position("scraper").unwrap_or(0);
    let mut summary = summarize(table, &["scraper"], |keys| vec![keys[scraper].clone()]);
    rank_rows(&mut summary);
    summary
}

/// Per scraper and publisher summary, sorted by scraper then publisher, descending.
pub fn summarize_by_publisher(table: &TsvTable) -> TsvTable {
    let scraper = table.index_position("scraper").unwrap_or(0);
    let article = table.index_position("article").unwrap_or(1);
    let mut summary = summarize(table, &["scraper", "publisher"], |keys| {
        vec![keys[scraper].clone(), publisher_of(&keys[article])]
    });
    summary.rows.sort_by(|a, b| b.keys.cmp(&a.keys));
    summary
}

/// Sort summary rows best-first by the table's ranking metric; NaN last.
pub fn rank_rows(summary: &mut TsvTable) {
    let Some((column, descending)) = ranking_column(summary) else {
        return;
    };

    summary.rows.sort_by(|a, b| {
        let (x, y) = (a.values[column], b.values[column]);
        match (x.is_nan(), y.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) if descending => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        }
    });
}

/// Column used to rank a summary and whether higher is better
pub fn ranking_column(summary: &TsvTable) -> Option<(usize, bool)> {
    if let Some(column) = summary.column_index("f1_score_mean") {
        return Some((column, true));
    }
    summary.column_index("wer_mean").map(|column| (column, false))
}

/// Box-plot statistics of every complexity column
pub fn complexity_summary(table: &TsvTable) -> TsvTable {
    let mut summary = TsvTable::new(["complexity"], COMPLEXITY_STATISTICS);

    for (column, name) in table.columns.iter().enumerate() {
        let values: Vec<f64> = table.rows.iter().map(|row| row.values[column]).collect();
        summary.push(
            vec![name.clone()],
            vec![
                quantile(&values, 0.0),
                quantile(&values, 0.25),
                quantile(&values, 0.5),
                quantile(&values, 0.75),
                quantile(&values, 1.0),
                mean(&values),
            ],
        );
    }

    summary
}
