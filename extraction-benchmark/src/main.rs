//! Extraction Benchmark CLI

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use eval_core::ScorerRegistry;
use tracing_subscriber::EnvFilter;

use extraction_benchmark::{
    analysis::{run_analysis, summarize_by_scraper},
    complexity::dataset_complexity,
    config::{Config, OptionalParagraphCap},
    dataset::{load_articles, load_extractions},
    extractors::ExtractorRegistry,
    reporting::{print_complexity_report, print_console_report, JsonSummary},
    runner::{write_score_tables, ConsoleProgress, ScoreRunner, ScrapeRunner},
};

#[derive(Parser)]
#[command(name = "extraction-benchmark")]
#[command(about = "Evaluate web content extractors against annotated ground truth")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute page complexity of the ground-truth corpus
    Complexity {
        /// Ground-truth article collection (JSON)
        #[arg(short = 't', long)]
        ground_truth: PathBuf,

        /// Directory with the archived HTML pages
        #[arg(short = 'd', long)]
        html_dir: PathBuf,

        /// Output TSV file (default: <results_dir>/complexity.tsv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run extractors over the archived HTML pages
    Scrape {
        /// Ground-truth article collection (JSON)
        #[arg(short = 't', long)]
        ground_truth: PathBuf,

        /// Directory with the archived HTML pages
        #[arg(short = 'd', long)]
        html_dir: PathBuf,

        /// Output directory for extraction collections (default: <results_dir>/extractions)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated extractor list (default: all enabled)
        #[arg(long)]
        scrapers: Option<String>,
    },

    /// Score extraction collections against the ground truth
    Score {
        /// Ground-truth article collection (JSON)
        #[arg(short = 't', long)]
        ground_truth: PathBuf,

        /// Directory with one `<scraper>.json` collection per extractor
        #[arg(short, long)]
        extractions: PathBuf,

        /// Output directory for score tables (default: <results_dir>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated scorer list (default: config, then all)
        #[arg(long)]
        scorers: Option<String>,

        /// Comma-separated scraper list (default: every collection)
        #[arg(long)]
        scrapers: Option<String>,

        /// Optional paragraphs above which only two reference variants are tried
        /// (a number or `unlimited`)
        #[arg(long)]
        max_optional_paragraphs: Option<OptionalParagraphCap>,
    },

    /// Summarize score and complexity tables
    Analysis {
        /// Output directory for summary tables
        #[arg(short, long)]
        output: PathBuf,

        /// Complexity table written by `complexity`
        #[arg(long)]
        complexity: Option<PathBuf>,

        /// Score tables written by `score`
        #[arg(long, num_args = 1..)]
        scores: Vec<PathBuf>,
    },

    /// List available scorers
    ListScorers,

    /// Generate sample configuration
    InitConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config/benchmark.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("extraction_benchmark=debug,eval_core=debug,info")
    } else {
        EnvFilter::new("extraction_benchmark=info,eval_core=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default(),
    };

    match cli.command {
        Commands::Complexity {
            ground_truth,
            html_dir,
            output,
        } => {
            let output = output.unwrap_or_else(|| Path::new(&config.output.results_dir).join("complexity.tsv"));
            compute_complexity(&ground_truth, &html_dir, &output)?;
        }

        Commands::Scrape {
            ground_truth,
            html_dir,
            output,
            scrapers,
        } => {
            let output = output.unwrap_or_else(|| Path::new(&config.output.results_dir).join("extractions"));
            run_scrape(&config, &ground_truth, &html_dir, &output, scrapers)?;
        }

        Commands::Score {
            ground_truth,
            extractions,
            output,
            scorers,
            scrapers,
            max_optional_paragraphs,
        } => {
            run_score(
                &config,
                &ground_truth,
                &extractions,
                output,
                scorers,
                scrapers,
                max_optional_paragraphs,
            )?;
        }

        Commands::Analysis {
            output,
            complexity,
            scores,
        } => {
            analyze_tables(&output, complexity.as_deref(), &scores)?;
        }

        Commands::ListScorers => {
            list_scorers();
        }

        Commands::InitConfig { output } => {
            init_config(output)?;
        }
    }

    Ok(())
}

/// Split a comma-separated CLI list
fn split_list(arg: Option<String>) -> Vec<String> {
    arg.map(|s| {
        s.split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn compute_complexity(ground_truth: &Path, html_dir: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let articles = load_articles(ground_truth)?;
    println!("=== Page Complexity ===");
    println!("Articles: {}", articles.len());

    let table = dataset_complexity(&articles, html_dir)?;

    ensure_parent(output)?;
    table.write_to_file(output)?;
    println!("Complexity table written to: {}", output.display());
    Ok(())
}

fn run_scrape(
    config: &Config,
    ground_truth: &Path,
    html_dir: &Path,
    output: &Path,
    scrapers_arg: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let articles = load_articles(ground_truth)?;
    let registry = ExtractorRegistry::from_config(config);
    if registry.is_empty() {
        return Err("no extractors enabled; run init-config and enable one".into());
    }
    let selected = registry.select(&split_list(scrapers_arg))?;

    let names: Vec<&str> = selected.iter().map(|(name, _)| *name).collect();
    println!("=== Scrape ===");
    println!("Scrapers: {}", names.join(", "));
    println!("Articles: {}", articles.len());
    println!();

    let runner = ScrapeRunner::new(selected, html_dir);
    let written = runner.run(&articles, output, &ConsoleProgress::new("articles"))?;

    for path in written {
        println!("Extractions written to: {}", path.display());
    }
    Ok(())
}

fn run_score(
    config: &Config,
    ground_truth: &Path,
    extractions_dir: &Path,
    output: Option<PathBuf>,
    scorers_arg: Option<String>,
    scrapers_arg: Option<String>,
    max_optional_paragraphs: Option<OptionalParagraphCap>,
) -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Utc::now();
    let run_id = started_at.format("%Y%m%d-%H%M%S").to_string();

    let reference = load_articles(ground_truth)?;
    let mut extractions = load_extractions(extractions_dir)?;

    let scrapers = split_list(scrapers_arg);
    if !scrapers.is_empty() {
        if let Some(missing) = scrapers.iter().find(|name| !extractions.contains_key(*name)) {
            return Err(format!(
                "no extraction collection for scraper '{}' in {}",
                missing,
                extractions_dir.display()
            )
            .into());
        }
        extractions.retain(|name, _| scrapers.contains(name));
    }

    if extractions.is_empty() {
        return Err(format!("no extraction collections found in {}", extractions_dir.display()).into());
    }

    let mut scorer_names = split_list(scorers_arg);
    if scorer_names.is_empty() {
        scorer_names = config.scoring.scorers.clone();
    }
    let registry = ScorerRegistry::builtin();
    let scorers = registry.select(&scorer_names)?;

    let cap = max_optional_paragraphs.unwrap_or(config.scoring.max_optional_paragraphs);

    println!("=== Extraction Benchmark ===");
    println!("Run ID: {}", run_id);
    println!(
        "Scorers: {}",
        scorers.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
    );
    println!(
        "Scrapers: {}",
        extractions.keys().cloned().collect::<Vec<_>>().join(", ")
    );
    println!("Articles: {}", reference.len());
    println!("Max optional paragraphs: {}", cap);
    println!();

    let runner = ScoreRunner::new(scorers, cap.as_option());
    let outcomes = runner.run(&reference, &extractions, &ConsoleProgress::new("scorings"))?;

    for outcome in &outcomes {
        print_console_report(&outcome.scorer, &summarize_by_scraper(&outcome.table));
    }

    let output_dir = output.unwrap_or_else(|| PathBuf::from(&config.output.results_dir));
    for path in write_score_tables(&output_dir, &outcomes)? {
        println!("Score table written to: {}", path.display());
    }

    if config.output.write_summary_json {
        let json_path = output_dir.join("summary.json");
        let summary = JsonSummary::from_outcomes(&run_id, &outcomes, reference.len(), cap);
        summary.write_to_file(&json_path)?;
        println!("JSON summary written to: {}", json_path.display());
    }

    Ok(())
}

fn analyze_tables(
    output: &Path,
    complexity: Option<&Path>,
    scores: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    if complexity.is_none() && scores.is_empty() {
        return Err("nothing to analyze: pass --scores and/or --complexity".into());
    }

    let analysis = run_analysis(output, complexity, scores)?;

    for table in &analysis.scores {
        print_console_report(&table.name, &table.by_scraper);
    }
    if let Some(summary) = &analysis.complexity {
        print_complexity_report(summary);
    }

    for path in &analysis.written {
        println!("Summary written to: {}", path.display());
    }
    Ok(())
}

fn list_scorers() {
    let registry = ScorerRegistry::builtin();
    let names = registry.names();

    println!("Available Scorers ({}):", names.len());
    println!("{:-<60}", "");

    for scorer in registry.iter() {
        println!("  {} | {}", scorer.name(), scorer.metrics().join(", "));
    }
}

fn init_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::sample();

    ensure_parent(&output)?;

    config.save_toml(&output)?;
    println!("Configuration written to: {}", output.display());
    Ok(())
}
