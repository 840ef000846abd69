//! External-program extractor

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use super::{ExtractError, ExtractRequest, ExtractResult, Extractor};
use crate::config::{ExtractorConfig, OutputMode};

/// Runs a program per article with the HTML on stdin and parses its stdout.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    command: String,
    args: Vec<String>,
    output: OutputMode,
    field: Option<String>,
}

impl CommandExtractor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            output: OutputMode::Lines,
            field: None,
        }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            output: config.output,
            field: config.field.clone(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output(mut self, output: OutputMode, field: Option<&str>) -> Self {
        self.output = output;
        self.field = field.map(String::from);
        self
    }

    /// Arguments with `{url}`, `{publisher}` and `{crawl_date}` filled in
    pub fn render_args(&self, request: &ExtractRequest<'_>) -> Vec<String> {
        let crawl_date = request.crawl_date.format("%Y-%m-%dT%H:%M:%S").to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{url}", request.url)
                    .replace("{publisher}", request.publisher)
                    .replace("{crawl_date}", &crawl_date)
            })
            .collect()
    }

    fn parse_output(&self, stdout: &str) -> ExtractResult<Vec<String>> {
        match self.output {
            OutputMode::Lines => Ok(stdout.lines().map(String::from).collect()),
            OutputMode::JsonArray => serde_json::from_str(stdout).map_err(|e| self.output_error(e.to_string())),
            OutputMode::JsonField => {
                let field = self
                    .field
                    .as_deref()
                    .ok_or_else(|| self.output_error("json_field output requires a `field`"))?;
                let mut value: serde_json::Value =
                    serde_json::from_str(stdout).map_err(|e| self.output_error(e.to_string()))?;
                let paragraphs = value
                    .get_mut(field)
                    .map(serde_json::Value::take)
                    .ok_or_else(|| self.output_error(format!("missing field '{}'", field)))?;
                serde_json::from_value(paragraphs).map_err(|e| self.output_error(e.to_string()))
            }
        }
    }

    fn output_error(&self, message: impl Into<String>) -> ExtractError {
        ExtractError::Output {
            command: self.command.clone(),
            message: message.into(),
        }
    }
}

impl Extractor for CommandExtractor {
    fn extract(&self, request: &ExtractRequest<'_>) -> ExtractResult<Vec<String>> {
        let args = self.render_args(request);
        tracing::debug!("Running {} {:?} for {}", self.command, args, request.url);

        let mut child = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExtractError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        // stdin is written while stdout is drained
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.output_error("stdin unavailable"))?;
        let html = request.html.to_owned();
        let writer = thread::spawn(move || stdin.write_all(html.as_bytes()));

        let output = child.wait_with_output().map_err(|source| ExtractError::Io {
            command: self.command.clone(),
            source,
        })?;

        match writer.join() {
            Ok(Ok(())) => {}
            // The program may not read stdin at all (e.g. it fetches `{url}` itself)
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Ok(Err(source)) => {
                return Err(ExtractError::Io {
                    command: self.command.clone(),
                    source,
                })
            }
            Err(_) => return Err(self.output_error("stdin writer panicked")),
        }

        if !output.status.success() {
            return Err(ExtractError::Failed {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        self.parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}
