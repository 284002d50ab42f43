use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::{Cardholder, EnrichedTransaction, EnrichmentError, Transaction};

/// Encoding of an input record file.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RecordFormat {
    /// Comma separated with a header row.
    Csv,
    /// One JSON object per line.
    JsonLines
}

impl RecordFormat {
    /// Picks the format from a file name or object key extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();

        match extension.as_str() {
            "csv" => Some(RecordFormat::Csv),
            "json" | "jsonl" | "ndjson" => Some(RecordFormat::JsonLines),
            _ => None
        }
    }
}

pub fn read_transactions<R: Read>(reader: R, format: RecordFormat) -> Result<Vec<Transaction>, EnrichmentError> {
    read_records(reader, format)
}

pub fn read_cardholders<R: Read>(reader: R, format: RecordFormat) -> Result<Vec<Cardholder>, EnrichmentError> {
    read_records(reader, format)
}

/// Writes enriched rows as CSV with a header row. Missing cardholder columns
/// are written as empty fields.
pub fn write_enriched<W: Write>(writer: W, rows: &[EnrichedTransaction]) -> Result<(), EnrichmentError> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    for row in rows {
        writer.serialize(row).map_err(|error| EnrichmentError::Io(error.into()))?;
    }

    writer.flush()?;

    Ok(())
}

fn read_records<R: Read, T: DeserializeOwned>(reader: R, format: RecordFormat) -> Result<Vec<T>, EnrichmentError> {
    match format {
        RecordFormat::Csv => read_csv(reader),
        RecordFormat::JsonLines => read_json_lines(reader)
    }
}

fn read_csv<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, EnrichmentError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(BufReader::new(reader));

    let headers = reader.headers().map_err(|error| csv_error("header", error))?.clone();
    let mut records = Vec::new();

    for (position, result) in reader.records().enumerate() {
        let record = result.map_err(|error| csv_error(position + 1, error))?;

        //NOTE: Fields go through as text; csv would otherwise infer floats and round decimals
        let fields: Map<String, Value> = headers.iter()
            .zip(record.iter())
            .map(|(name, field)| (name.to_string(), Value::String(field.to_string())))
            .collect();

        let parsed = serde_json::from_value(Value::Object(fields))
            .map_err(|error| EnrichmentError::schema_violation(position + 1, error))?;

        records.push(parsed);
    }

    Ok(records)
}

fn csv_error(row: impl ToString, error: csv::Error) -> EnrichmentError {
    if error.is_io_error() {
        EnrichmentError::Io(error.into())
    } else {
        EnrichmentError::schema_violation(row, error)
    }
}

fn read_json_lines<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, EnrichmentError> {
    let mut records = Vec::new();

    //NOTE: Blank lines are skipped but still counted so reported rows match line numbers
    for (position, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;

        if line.trim().is_empty() {
            continue;
        }

        let record = serde_json::from_str(&line)
            .map_err(|error| EnrichmentError::schema_violation(position + 1, error))?;

        records.push(record);
    }

    Ok(records)
}
