//! CLI integration tests for the extraction-benchmark binary.
//!
//! Tests run the binary through `std::process::Command` inside temporary
//! directories, covering scoring, analysis, complexity, configuration and
//! exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

// =============================================================================
// Fixtures
// =============================================================================

const GROUND_TRUTH: &str = r#"{
    "APNews_0001.html": {
        "url": "https://apnews.com/article/1",
        "body": ["Alpha beta gamma", "[Read more]", "Delta epsilon"],
        "crawl_date": "2023-07-12 08:30:00"
    },
    "Zeit_0002.html": {
        "url": "https://zeit.de/article/2",
        "body": ["Eins zwei drei"],
        "crawl_date": "2023-07-13 09:00:00"
    }
}"#;

const GOOD: &str = r#"{
    "APNews_0001.html": {
        "url": "https://apnews.com/article/1",
        "body": ["Alpha beta gamma", "Delta epsilon"],
        "crawl_date": "2023-07-12 08:30:00"
    },
    "Zeit_0002.html": {
        "url": "https://zeit.de/article/2",
        "body": ["Eins zwei drei"],
        "crawl_date": "2023-07-13 09:00:00"
    }
}"#;

const POOR: &str = r#"{
    "APNews_0001.html": {
        "url": "https://apnews.com/article/1",
        "body": ["Alpha beta gamma"],
        "crawl_date": "2023-07-12 08:30:00"
    },
    "Zeit_0002.html": {
        "url": "https://zeit.de/article/2",
        "body": ["Something else"],
        "crawl_date": "2023-07-13 09:00:00"
    }
}"#;

const PAGE: &str = "<html><body><nav>Home Sport</nav><p>Alpha beta gamma</p><p>Read more</p><p>Delta epsilon</p></body></html>";

// =============================================================================
// Helper Functions
// =============================================================================

fn benchmark_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_extraction-benchmark"))
}

/// Run inside `dir` so no configuration file is picked up implicitly
fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(benchmark_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute extraction-benchmark binary")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Expected exit code 0, got {:?}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn assert_failure(output: &Output) {
    assert_eq!(
        output.status.code(),
        Some(1),
        "Expected exit code 1, got {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Ground truth plus a `good` and a `poor` extraction collection
fn dataset() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ground_truth.json"), GROUND_TRUTH).unwrap();
    fs::create_dir(dir.path().join("extractions")).unwrap();
    fs::write(dir.path().join("extractions").join("good.json"), GOOD).unwrap();
    fs::write(dir.path().join("extractions").join("poor.json"), POOR).unwrap();
    fs::create_dir(dir.path().join("html")).unwrap();
    fs::write(dir.path().join("html").join("APNews_0001.html"), PAGE).unwrap();
    fs::write(dir.path().join("html").join("Zeit_0002.html"), "<html><body></body></html>").unwrap();
    dir
}

fn score(dir: &Path, extra: &[&str]) -> Output {
    let mut args = vec![
        "score",
        "-t",
        "ground_truth.json",
        "-e",
        "extractions",
        "-o",
        "scores",
    ];
    args.extend_from_slice(extra);
    run_in(dir, &args)
}

// =============================================================================
// score
// =============================================================================

#[test]
fn score_writes_one_table_per_scorer() {
    let dir = dataset();
    let output = score(dir.path(), &[]);
    assert_success(&output);

    let scores = dir.path().join("scores");
    for scorer in ["paragraph_match", "rouge_lsum", "wer"] {
        assert!(scores.join(format!("{}.tsv", scorer)).exists(), "missing {}", scorer);
    }
    assert!(scores.join("summary.json").exists());

    let stdout = stdout_str(&output);
    assert!(stdout.contains("Progress: 6/6 scorings complete"));
    assert!(stdout.contains("=== paragraph_match ==="));
    assert!(stdout.contains("1. good"));
}

#[test]
fn score_table_contents() {
    let dir = dataset();
    assert_success(&score(dir.path(), &["--scorers", "wer,paragraph_match"]));

    let wer = fs::read_to_string(dir.path().join("scores").join("wer.tsv")).unwrap();
    let lines: Vec<&str> = wer.lines().collect();
    assert_eq!(lines[0], "scraper\tarticle\twer");
    assert_eq!(lines[1], "good\tAPNews_0001.html\t0");
    assert_eq!(lines[3], "poor\tAPNews_0001.html\t0.4");
    assert_eq!(lines[4], "poor\tZeit_0002.html\t1");

    // Nothing in common: F1 undefined, written as an empty cell
    let paragraph_match = fs::read_to_string(dir.path().join("scores").join("paragraph_match.tsv")).unwrap();
    assert!(paragraph_match.contains("poor\tZeit_0002.html\t0\t0\t\n"));
    assert!(!dir.path().join("scores").join("rouge_lsum.tsv").exists());
}

#[test]
fn score_summary_json() {
    let dir = dataset();
    assert_success(&score(dir.path(), &["--scorers", "paragraph_match", "--max-optional-paragraphs", "unlimited"]));

    let content = fs::read_to_string(dir.path().join("scores").join("summary.json")).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(summary["total_articles"], 2);
    assert_eq!(summary["max_optional_paragraphs"], "unlimited");
    assert_eq!(summary["scorers"][0]["scorer"], "paragraph_match");
    assert_eq!(summary["scorers"][0]["rankings"][0]["scraper"], "good");
    assert_eq!(summary["scorers"][0]["rankings"][0]["mean"], 100.0);
}

#[test]
fn score_scraper_filter() {
    let dir = dataset();
    assert_success(&score(dir.path(), &["--scorers", "wer", "--scrapers", "poor"]));

    let wer = fs::read_to_string(dir.path().join("scores").join("wer.tsv")).unwrap();
    assert!(!wer.contains("good"));
    assert_eq!(wer.lines().count(), 3);

    let output = score(dir.path(), &["--scrapers", "missing"]);
    assert_failure(&output);
    assert!(stderr_str(&output).contains("missing"));
}

#[test]
fn score_key_mismatch_fails() {
    let dir = dataset();
    fs::write(
        dir.path().join("extractions").join("partial.json"),
        r#"{"APNews_0001.html": {"url": "u", "body": ["Alpha"], "crawl_date": "2023-07-12"}}"#,
    )
    .unwrap();

    let output = score(dir.path(), &["--scorers", "wer"]);
    assert_failure(&output);
    assert!(stderr_str(&output).contains("Zeit_0002.html"));
}

#[test]
fn score_rejects_bad_arguments() {
    let dir = dataset();
    assert_failure(&score(dir.path(), &["--scorers", "bleu"]));
    assert!(!score(dir.path(), &["--max-optional-paragraphs", "many"]).status.success());

    let output = run_in(dir.path(), &["score", "-t", "absent.json", "-e", "extractions"]);
    assert_failure(&output);
    assert!(stderr_str(&output).contains("absent.json"));
}

// =============================================================================
// analysis
// =============================================================================

#[test]
fn analysis_summarizes_scores() {
    let dir = dataset();
    assert_success(&score(dir.path(), &["--scorers", "paragraph_match,wer"]));

    let output = run_in(
        dir.path(),
        &[
            "analysis",
            "-o",
            "analysis",
            "--scores",
            "scores/paragraph_match.tsv",
            "scores/wer.tsv",
        ],
    );
    assert_success(&output);

    let analysis = dir.path().join("analysis");
    assert!(analysis.join("paragraph_match_scraper_summary.tsv").exists());
    assert!(analysis.join("paragraph_match_publisher_summary.tsv").exists());
    assert!(analysis.join("wer_publisher_summary.tsv").exists());

    let by_scraper = fs::read_to_string(analysis.join("wer_scraper_summary.tsv")).unwrap();
    let lines: Vec<&str> = by_scraper.lines().collect();
    assert_eq!(lines[0], "scraper\twer_mean\twer_std");
    assert_eq!(lines[1], "good\t0\t0");
    assert!(lines[2].starts_with("poor\t70\t"));

    let by_publisher = fs::read_to_string(analysis.join("wer_publisher_summary.tsv")).unwrap();
    assert_eq!(by_publisher.lines().nth(1), Some("poor\tZeit\t100\t"));

    // The poor scraper shares nothing with one article
    assert!(stderr_str(&output).contains("NaN"));
    assert!(stdout_str(&output).contains("=== wer ==="));
}

#[test]
fn analysis_needs_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &["analysis", "-o", "out"]);
    assert_failure(&output);
    assert!(stderr_str(&output).contains("nothing to analyze"));
}

// =============================================================================
// complexity
// =============================================================================

#[test]
fn complexity_table_and_summary() {
    let dir = dataset();
    let output = run_in(
        dir.path(),
        &["complexity", "-t", "ground_truth.json", "-d", "html", "-o", "complexity.tsv"],
    );
    assert_success(&output);

    let table = fs::read_to_string(dir.path().join("complexity.tsv")).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines[0],
        "article\tcomplexity_without_optional_paragraphs\tcomplexity_with_optional_paragraphs"
    );
    // 9 page tokens; 5 truth tokens without "Read more", 7 with it
    assert!(lines[1].starts_with("APNews_0001.html\t0.444"));
    assert!(lines[2].starts_with("Zeit_0002.html\t\t"));

    let output = run_in(dir.path(), &["analysis", "-o", "analysis", "--complexity", "complexity.tsv"]);
    assert_success(&output);
    let summary = fs::read_to_string(dir.path().join("analysis").join("complexity_summary.tsv")).unwrap();
    assert!(summary.starts_with("complexity\tmin\tq1\tmedian\tq3\tmax\tmean\n"));
    assert!(stdout_str(&output).contains("Page Complexity"));
}

#[test]
fn complexity_missing_html_fails() {
    let dir = dataset();
    fs::remove_file(dir.path().join("html").join("Zeit_0002.html")).unwrap();
    let output = run_in(dir.path(), &["complexity", "-t", "ground_truth.json", "-d", "html"]);
    assert_failure(&output);
    assert!(stderr_str(&output).contains("Zeit_0002.html"));
}

// =============================================================================
// scrape
// =============================================================================

#[cfg(unix)]
#[test]
fn scrape_with_configured_command() {
    let dir = dataset();
    fs::write(dir.path().join("html").join("Zeit_0002.html"), "Eins   zwei\n\ndrei\n").unwrap();
    fs::write(
        dir.path().join("bench.toml"),
        "[extractors.cat]\ncommand = \"cat\"\n\n[extractors.off]\ncommand = \"false\"\nenabled = false\n",
    )
    .unwrap();

    let output = run_in(
        dir.path(),
        &["-c", "bench.toml", "scrape", "-t", "ground_truth.json", "-d", "html", "-o", "scraped"],
    );
    assert_success(&output);
    assert!(stdout_str(&output).contains("Scrapers: cat"));

    let content = fs::read_to_string(dir.path().join("scraped").join("cat.json")).unwrap();
    let scraped: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(scraped["Zeit_0002.html"]["body"], serde_json::json!(["Eins zwei", "drei"]));
    assert_eq!(scraped["Zeit_0002.html"]["crawl_date"], "2023-07-13 09:00:00");
    assert!(!dir.path().join("scraped").join("off.json").exists());
}

#[test]
fn scrape_unknown_scraper_fails() {
    let dir = dataset();
    fs::write(dir.path().join("bench.toml"), "[extractors.cat]\ncommand = \"cat\"\n").unwrap();
    let output = run_in(
        dir.path(),
        &["-c", "bench.toml", "scrape", "-t", "ground_truth.json", "-d", "html", "--scrapers", "nope"],
    );
    assert_failure(&output);
    assert!(stderr_str(&output).contains("nope"));
}

#[test]
fn scrape_without_enabled_extractors_fails() {
    let dir = dataset();
    fs::write(
        dir.path().join("bench.toml"),
        "[extractors.off]\ncommand = \"cat\"\nenabled = false\n",
    )
    .unwrap();
    let output = run_in(
        dir.path(),
        &["-c", "bench.toml", "scrape", "-t", "ground_truth.json", "-d", "html"],
    );
    assert_failure(&output);
    assert!(stderr_str(&output).contains("no extractors enabled"));
}

// =============================================================================
// list-scorers / init-config
// =============================================================================

#[test]
fn list_scorers_shows_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &["list-scorers"]);
    assert_success(&output);
    let stdout = stdout_str(&output);
    assert!(stdout.contains("Available Scorers (3)"));
    assert!(stdout.contains("paragraph_match | precision, recall, f1_score"));
    assert!(stdout.contains("wer | wer"));
}

#[test]
fn init_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &["init-config"]);
    assert_success(&output);

    let path = dir.path().join("config").join("benchmark.toml");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("max_optional_paragraphs = 4"));
    assert!(content.contains("[extractors.trafilatura]"));

    // A written config is picked up again
    assert_success(&run_in(dir.path(), &["-c", "config/benchmark.toml", "list-scorers"]));
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.toml"), "[scoring]\nmax_optional_paragraphs = \"lots\"\n").unwrap();
    let output = run_in(dir.path(), &["-c", "bad.toml", "list-scorers"]);
    assert_failure(&output);
}

#[test]
fn no_subcommand_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &[]);
    assert!(!output.status.success());
    assert!(stderr_str(&output).contains("Usage"));
}
