use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::dataset::{Cell, Dataset, Row, PROPERTY_LABEL_COLUMN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" | "tsv" => Some(Self::Csv),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<InputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(InputFormat::Json);
    }
    if lower.ends_with(".csv") || lower.ends_with(".tsv") {
        return Some(InputFormat::Csv);
    }
    None
}

/// Delimiter implied by the file name, if any.
pub fn infer_delimiter_from_path(path: &str) -> Option<u8> {
    if path.trim().to_lowercase().ends_with(".tsv") {
        Some(b'\t')
    } else {
        None
    }
}

/// Delimiter implied by an explicit format name, if any.
pub fn delimiter_for_format(value: &str) -> Option<u8> {
    match value.trim().to_lowercase().as_str() {
        "tsv" => Some(b'\t'),
        _ => None,
    }
}

/// An explicit format wins over the file extension; JSON is the fallback.
pub fn resolve_format(explicit: Option<&str>, path: &str) -> Result<InputFormat, InputError> {
    match explicit {
        Some(value) => InputFormat::parse(value).ok_or_else(|| InputError::UnknownFormat {
            value: value.to_string(),
        }),
        None => Ok(infer_format_from_path(path).unwrap_or(InputFormat::Json)),
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("unknown input format '{value}', expected json, csv or tsv")]
    UnknownFormat { value: String },

    #[error("failed to open input file: {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON dataset: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV dataset: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    #[error("CSV header has no '{column}' column")]
    MissingColumn { column: &'static str },
}

/// Reads a top-level JSON array of flat objects.
pub fn load_json<R: Read>(reader: R) -> Result<Dataset, InputError> {
    serde_json::from_reader(reader).map_err(|source| InputError::Json { source })
}

/// Reads CSV with a header row. Each cell's type is inferred on its own.
///
/// A header without the property label column is rejected even when no
/// records follow it. A completely empty input is an empty dataset.
pub fn load_csv<R: Read>(reader: R, delimiter: u8) -> Result<Dataset, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| InputError::Csv { source })?
        .clone();
    if !headers.is_empty() && !headers.iter().any(|h| h == PROPERTY_LABEL_COLUMN) {
        return Err(InputError::MissingColumn {
            column: PROPERTY_LABEL_COLUMN,
        });
    }

    let mut dataset = Dataset::default();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(|source| InputError::Csv { source })?;
        if record.len() != headers.len() {
            log::warn!(
                "csv record {} has {} field(s), header has {}",
                idx + 1,
                record.len(),
                headers.len()
            );
        }
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(column, raw)| (column, infer_cell(raw)))
            .collect();
        dataset.push(row);
    }
    Ok(dataset)
}

/// `-` reads standard input.
pub fn load_path(path: &str, format: InputFormat, delimiter: u8) -> Result<Dataset, InputError> {
    if path == "-" {
        let stdin = io::stdin();
        return load_reader(stdin.lock(), format, delimiter);
    }
    let file = File::open(Path::new(path)).map_err(|source| InputError::Open {
        path: path.to_string(),
        source,
    })?;
    load_reader(BufReader::new(file), format, delimiter)
}

fn load_reader<R: Read>(
    reader: R,
    format: InputFormat,
    delimiter: u8,
) -> Result<Dataset, InputError> {
    let dataset = match format {
        InputFormat::Json => load_json(reader)?,
        InputFormat::Csv => load_csv(reader, delimiter)?,
    };
    log::info!("loaded {} row(s)", dataset.len());
    Ok(dataset)
}

fn infer_cell(raw: &str) -> Cell {
    let value = raw.trim();
    if value.is_empty() {
        return Cell::Null;
    }
    if let Ok(v) = value.parse::<i64>() {
        return Cell::Int(v);
    }
    if let Ok(v) = value.parse::<u64>() {
        return Cell::UInt(v);
    }
    if !looks_numeric(value) {
        return match value {
            "true" | "True" | "TRUE" => Cell::Bool(true),
            "false" | "False" | "FALSE" => Cell::Bool(false),
            _ => Cell::Text(raw.to_string()),
        };
    }
    if let Ok(v) = value.parse::<f64>() {
        return if v.is_finite() {
            Cell::Float(v)
        } else {
            Cell::Null
        };
    }
    Cell::Text(raw.to_string())
}

/// Digit or `.` after an optional sign. Keeps `nan` and `inf` as text.
fn looks_numeric(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    unsigned
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.')
}
