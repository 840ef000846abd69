//! HTML page complexity
//!
//! The complexity of a page is `1 - |ground-truth tokens| / |DOM text tokens|`,
//! clipped to `[0, 1]`: the share of visible page text that is not part of
//! the annotated article. Script and style contents do not count as text.

use std::path::Path;
use std::sync::LazyLock;

use eval_core::{optional_indices, prepare_body, ArticleSet};
use regex::Regex;
use scraper::{Html, Selector};

use crate::dataset::{load_html, LoadError, TsvTable};

static WORD_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").expect("valid selector"));

/// Column names of the complexity table
pub const COMPLEXITY_COLUMNS: [&str; 2] = [
    "complexity_without_optional_paragraphs",
    "complexity_with_optional_paragraphs",
];

/// Number of word tokens in `text`
pub fn count_word_tokens(text: &str) -> usize {
    WORD_TOKEN.find_iter(text).count()
}

/// Text content of `<body>`, without `<script>` and `<style>` contents.
///
/// Text nodes are joined with single spaces.
pub fn dom_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    for node in root.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|element| matches!(element.name(), "script" | "style"))
                .unwrap_or(false)
        });
        if !hidden {
            text.push_str(fragment);
            text.push(' ');
        }
    }
    text
}

/// Complexity of one page given its ground-truth text; NaN when the page has no text.
pub fn page_complexity(html: &str, ground_truth_text: &str) -> f64 {
    let dom_tokens = count_word_tokens(&dom_text(html));
    if dom_tokens == 0 {
        return f64::NAN;
    }

    let truth_tokens = count_word_tokens(ground_truth_text);
    (1.0 - truth_tokens as f64 / dom_tokens as f64).clamp(0.0, 1.0)
}

/// Complexity without and with the optional paragraphs of `body`
pub fn article_complexity(html: &str, body: &[String]) -> (f64, f64) {
    let without = prepare_body(body, &optional_indices(body)).join(" ");
    let with = prepare_body(body, &[]).join(" ");
    (page_complexity(html, &without), page_complexity(html, &with))
}

/// Complexity table of a ground-truth collection, one row per article in id order.
pub fn dataset_complexity(ground_truth: &ArticleSet, html_directory: &Path) -> Result<TsvTable, LoadError> {
    let mut table = TsvTable::new(["article"], COMPLEXITY_COLUMNS);

    for (article_id, article) in ground_truth {
        let html = load_html(html_directory, article_id)?;
        let (without, with) = article_complexity(&html, &article.body);
        if without.is_nan() {
            tracing::warn!("{} has no DOM text; complexity undefined", article_id);
        }
        table.push(vec![article_id.clone()], vec![without, with]);
    }

    tracing::info!("Computed complexity for {} articles", table.len());
    Ok(table)
}
