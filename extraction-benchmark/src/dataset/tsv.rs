//! Tab-separated result tables
//!
//! Every table has one or more string key columns followed by float value
//! columns. NaN is written as an empty cell; an empty cell or a literal `NaN`
//! reads back as NaN.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::LoadError;

/// Parse failure inside a TSV document
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct TsvError {
    pub line: usize,
    pub message: String,
}

impl TsvError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsvRow {
    pub keys: Vec<String>,
    pub values: Vec<f64>,
}

/// A table of key columns and float columns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TsvTable {
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<TsvRow>,
}

impl TsvTable {
    pub fn new<I, C>(index: I, columns: C) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            index: index.into_iter().map(Into::into).collect(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// # Panics
    ///
    /// If the row does not have one key per index column and one value per
    /// value column.
    pub fn push(&mut self, keys: Vec<String>, values: Vec<f64>) {
        assert_eq!(keys.len(), self.index.len(), "row key count does not match index columns");
        assert_eq!(values.len(), self.columns.len(), "row value count does not match value columns");
        self.rows.push(TsvRow { keys, values });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn index_position(&self, name: &str) -> Option<usize> {
        self.index.iter().position(|c| c == name)
    }

    /// All values of a value column, in row order
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let position = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row.values[position]).collect())
    }

    /// True if any value cell is NaN
    pub fn has_nan(&self) -> bool {
        self.rows.iter().flat_map(|row| &row.values).any(|v| v.is_nan())
    }

    /// Render as TSV with a header line
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        let header: Vec<&str> = self
            .index
            .iter()
            .chain(self.columns.iter())
            .map(String::as_str)
            .collect();
        out.push_str(&header.join("\t"));
        out.push('\n');

        for row in &self.rows {
            let mut cells: Vec<String> = row.keys.iter().map(|k| sanitize(k)).collect();
            cells.extend(row.values.iter().map(|v| format_value(*v)));
            let _ = writeln!(out, "{}", cells.join("\t"));
        }
        out
    }

    /// Parse TSV text whose first `index_columns` columns are keys
    pub fn from_tsv_str(content: &str, index_columns: usize) -> Result<Self, TsvError> {
        let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

        let (_, header) = lines.next().ok_or_else(|| TsvError::new(1, "missing header"))?;
        let header: Vec<&str> = header.split('\t').collect();
        if header.len() < index_columns {
            return Err(TsvError::new(
                1,
                format!("expected at least {} key columns, found {}", index_columns, header.len()),
            ));
        }

        let mut table = TsvTable::new(
            header[..index_columns].iter().copied(),
            header[index_columns..].iter().copied(),
        );
        for (number, line) in lines {
            let cells: Vec<&str> = line.split('\t').collect();
            if cells.len() != header.len() {
                return Err(TsvError::new(
                    number + 1,
                    format!("expected {} cells, found {}", header.len(), cells.len()),
                ));
            }

            let keys = cells[..index_columns].iter().map(|k| k.to_string()).collect();
            let values = cells[index_columns..]
                .iter()
                .map(|cell| parse_value(cell).map_err(|message| TsvError::new(number + 1, message)))
                .collect::<Result<Vec<f64>, TsvError>>()?;
            table.push(keys, values);
        }

        Ok(table)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P, index_columns: usize) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_tsv_str(&content, index_columns).map_err(|source| LoadError::Tsv {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        fs::write(path, self.to_tsv()).map_err(|e| LoadError::io(path, e))
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn parse_value(cell: &str) -> Result<f64, String> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", cell))
}

/// Keys never contain tabs or line breaks
fn sanitize(key: &str) -> String {
    key.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TsvTable {
        let mut table = TsvTable::new(["scraper", "article"], ["precision", "f1_score"]);
        table.push(vec!["fundus".into(), "ap_0001".into()], vec![1.0, 0.5]);
        table.push(vec!["fundus".into(), "ap_0002".into()], vec![f64::NAN, 0.25]);
        table
    }

    #[test]
    fn test_nan_written_as_empty_cell() {
        let text = sample().to_tsv();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "scraper\tarticle\tprecision\tf1_score");
        assert_eq!(lines[1], "fundus\tap_0001\t1\t0.5");
        assert_eq!(lines[2], "fundus\tap_0002\t\t0.25");
    }

    #[test]
    #[should_panic(expected = "row value count")]
    fn test_push_rejects_wrong_value_count() {
        let mut table = sample();
        table.push(vec!["fundus".into(), "ap_0003".into()], vec![1.0]);
    }

    #[test]
    #[should_panic(expected = "row key count")]
    fn test_push_rejects_wrong_key_count() {
        let mut table = sample();
        table.push(vec!["ap_0003".into()], vec![1.0, 1.0]);
    }

    #[test]
    fn test_parse_reads_nan_forms() {
        let text = "article\tc\nx_1\t\nx_2\tNaN\nx_3\t0.75\n";
        let table = TsvTable::from_tsv_str(text, 1).unwrap();
        assert_eq!(table.index, vec!["article"]);
        let values = table.column("c").unwrap();
        assert!(values[0].is_nan());
        assert!(values[1].is_nan());
        assert_eq!(values[2], 0.75);
        assert!(table.has_nan());
    }

    #[test]
    fn test_written_table_parses_back() {
        let table = sample();
        let parsed = TsvTable::from_tsv_str(&table.to_tsv(), 2).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.rows[0], table.rows[0]);
        assert!(parsed.rows[1].values[0].is_nan());
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = TsvTable::from_tsv_str("a\tb\nk\tnot-a-number\n", 1).unwrap_err();
        assert_eq!(err.line, 2);

        let err = TsvTable::from_tsv_str("a\tb\nk\n", 1).unwrap_err();
        assert!(err.message.contains("expected 2 cells"));

        assert!(TsvTable::from_tsv_str("", 1).is_err());
    }

    #[test]
    fn test_file_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wer.tsv");
        sample().write_to_file(&path).unwrap();

        let loaded = TsvTable::read_from_file(&path, 2).unwrap();
        assert_eq!(loaded.columns, vec!["precision", "f1_score"]);
        assert!(matches!(
            TsvTable::read_from_file(dir.path().join("missing.tsv"), 2),
            Err(LoadError::Io { .. })
        ));
    }
}
