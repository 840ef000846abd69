//! Article collection and HTML loading

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use eval_core::ArticleSet;
use flate2::read::GzDecoder;
use indexmap::IndexMap;
use serde::Serialize;

use super::LoadError;

/// Load an article collection (`{id: {url, body, crawl_date}}`), sorted by id.
pub fn load_articles<P: AsRef<Path>>(path: P) -> Result<ArticleSet, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let articles: ArticleSet = serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Loaded {} articles from {}", articles.len(), path.display());
    Ok(articles)
}

/// Write an article collection as pretty JSON with four-space indentation.
pub fn write_articles<P: AsRef<Path>>(path: P, articles: &ArticleSet) -> Result<(), LoadError> {
    let path = path.as_ref();
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    articles
        .serialize(&mut serializer)
        .map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    fs::write(path, buffer).map_err(|e| LoadError::io(path, e))
}

/// Load every `*.json` collection in `directory`, keyed by file stem in name order.
pub fn load_extractions<P: AsRef<Path>>(directory: P) -> Result<IndexMap<String, ArticleSet>, LoadError> {
    let directory = directory.as_ref();
    let entries = fs::read_dir(directory).map_err(|e| LoadError::io(directory, e))?;

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| LoadError::io(directory, e))?.path();
        if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                files.push((stem.to_string(), path.clone()));
            }
        }
    }
    files.sort();

    let mut extractions = IndexMap::new();
    for (scraper, path) in files {
        extractions.insert(scraper, load_articles(&path)?);
    }

    tracing::info!(
        "Loaded {} extraction collections from {}",
        extractions.len(),
        directory.display()
    );
    Ok(extractions)
}

/// Read the HTML page of `article_id`, gunzipping names ending in `.gz`.
pub fn load_html<P: AsRef<Path>>(html_directory: P, article_id: &str) -> Result<String, LoadError> {
    let path = html_directory.as_ref().join(article_id);
    let mut file = fs::File::open(&path).map_err(|e| LoadError::io(&path, e))?;

    let mut bytes = Vec::new();
    if article_id.ends_with(".gz") {
        GzDecoder::new(file)
            .read_to_end(&mut bytes)
            .map_err(|e| LoadError::io(&path, e))?;
    } else {
        file.read_to_end(&mut bytes)
            .map_err(|e| LoadError::io(&path, e))?;
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
