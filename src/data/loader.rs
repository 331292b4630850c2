use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Cell, Dataset, RawRow};
use crate::config::ColumnNames;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural problems with an input file.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tweet dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one tweet per line (the usual export)
/// * `.json`    – `[{ "Month": "...", "RawTweet": "...", ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path, columns: &ColumnNames) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => read_csv(path, columns)?,
        "json" => read_json(path, columns)?,
        "parquet" | "pq" => read_parquet(path, columns)?,
        other => return Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    };

    Ok(Dataset::load(rows))
}

// ---------------------------------------------------------------------------
// Column lookup
// ---------------------------------------------------------------------------

/// Positions of the six used columns inside a header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    category: usize,
    text: usize,
    sentiment: usize,
    subjectivity: usize,
    dim1: usize,
    dim2: usize,
}

impl ColumnIndex {
    fn resolve<F>(columns: &ColumnNames, position: F) -> Result<Self, SchemaError>
    where
        F: Fn(&str) -> Option<usize>,
    {
        let find = |name: &str| {
            position(name).ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
        };
        Ok(ColumnIndex {
            category: find(&columns.category)?,
            text: find(&columns.text)?,
            sentiment: find(&columns.sentiment)?,
            subjectivity: find(&columns.subjectivity)?,
            dim1: find(&columns.dim1)?,
            dim2: find(&columns.dim2)?,
        })
    }

    fn row<F>(&self, cell: F) -> RawRow
    where
        F: Fn(usize) -> Cell,
    {
        RawRow {
            category: cell(self.category),
            text: cell(self.text),
            sentiment: cell(self.sentiment),
            subjectivity: cell(self.subjectivity),
            dim1: cell(self.dim1),
            dim2: cell(self.dim2),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Rows with too few fields are accepted; missing cells read as null.
/// Bytes that are not valid UTF-8 decode to U+FFFD instead of failing the row.
fn read_csv(path: &Path, columns: &ColumnNames) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.byte_headers().context("reading CSV headers")?.clone();

    let index = ColumnIndex::resolve(columns, |name| {
        headers.iter().position(|h| h == name.as_bytes())
    })?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(index.row(|i| csv_cell(record.get(i))));
    }
    Ok(rows)
}

fn csv_cell(field: Option<&[u8]>) -> Cell {
    match field {
        None | Some(b"") => Cell::Null,
        Some(bytes) => Cell::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). Keys absent from
/// an object read as null.
fn read_json(path: &Path, columns: &ColumnNames) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let names = [
        &columns.category,
        &columns.text,
        &columns.sentiment,
        &columns.subjectivity,
        &columns.dim1,
        &columns.dim2,
    ];
    let index = ColumnIndex::resolve(columns, |name| names.iter().position(|n| *n == name))?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(index.row(|col| obj.get(names[col].as_str()).map_or(Cell::Null, json_to_cell)))
        })
        .collect()
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Null,
        other => Cell::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path, columns: &ColumnNames) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let schema = builder.schema().clone();
    let index = ColumnIndex::resolve(columns, |name| schema.index_of(name).ok())?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(index.row(|col| extract_cell(batch.column(col), row)));
        }
    }
    Ok(rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Cell::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Cell::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::Bool(col.as_boolean().value(row)),
        other => {
            log::debug!("Unsupported parquet column type {other:?}, reading as null");
            Cell::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "Month,RawTweet,Sentiment,Subjectivity,Dimension 1,Dimension 2";

    fn write_temp(suffix: &str, contents: impl AsRef<[u8]>) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_ref()).expect("write temp file");
        file
    }

    #[test]
    fn csv_with_quoted_fields() {
        let csv = format!(
            "{HEADER}\n\
             Jan,\"['hello', 'world']\",0.5,0.5,1.0,2.0\n\
             Feb,\"multi\nline &amp; text\",-0.9,0.1,3.0,4.0\n"
        );
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path(), &ColumnNames::default()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].text, "hello");
        assert_eq!(ds.records()[1].text, "multi line & text");
        assert_eq!(ds.categories(), ["Feb", "Jan"]);
    }

    #[test]
    fn csv_drops_rows_with_bad_scores() {
        let csv = format!(
            "{HEADER}\n\
             Jan,a,0.5,0.5,1,1\n\
             Jan,b,,0.5,1,1\n\
             Jan,c,0.1,n/a,1,1\n\
             Jan,d,0.2,0.3,1,1\n"
        );
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path(), &ColumnNames::default()).unwrap();
        let ids: Vec<usize> = ds.records().iter().map(|r| r.index).collect();
        assert_eq!(ids, vec![0, 3]);
    }

    #[test]
    fn csv_short_row_reads_missing_cells_as_null() {
        let csv = format!("{HEADER}\nJan,text,0.5,0.5\n");
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path(), &ColumnNames::default()).unwrap();
        assert_eq!(ds.len(), 1);
        assert!(ds.records()[0].x.is_nan());
    }

    #[test]
    fn csv_invalid_utf8_row_still_loads() {
        let mut csv = format!("{HEADER}\nJan,plain,0.1,0.5,1,1\n").into_bytes();
        csv.extend_from_slice(b"Jan,caf\xe9 au lait,0.2,0.5,1,1\n");
        csv.extend_from_slice(b"Feb,after,0.3,0.5,1,1\n");
        let file = write_temp(".csv", csv);
        let ds = load_file(file.path(), &ColumnNames::default()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[1].text, "caf\u{FFFD} au lait");
        assert_eq!(ds.records()[2].text, "after");
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let file = write_temp(".csv", "Month,RawTweet,Sentiment\nJan,a,0.1\n");
        let err = load_file(file.path(), &ColumnNames::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::MissingColumn("Subjectivity".into()))
        );
    }

    #[test]
    fn custom_column_names() {
        let columns = ColumnNames {
            category: "week".into(),
            text: "body".into(),
            sentiment: "pol".into(),
            subjectivity: "subj".into(),
            dim1: "u".into(),
            dim2: "v".into(),
        };
        let file = write_temp(".csv", "body,week,pol,subj,u,v\nhi,W1,0.1,0.2,0,0\n");
        let ds = load_file(file.path(), &columns).unwrap();
        assert_eq!(ds.records()[0].category, "W1");
        assert_eq!(ds.records()[0].text, "hi");
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path(), &ColumnNames::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::UnsupportedExtension("xlsx".into()))
        );
    }

    #[test]
    fn json_records() {
        let json = r#"[
            {"Month": "Jan", "RawTweet": "b'hey\\nyou'", "Sentiment": 0.25,
             "Subjectivity": 1, "Dimension 1": 0.5, "Dimension 2": -0.5},
            {"Month": "Jan", "RawTweet": null, "Sentiment": "bad",
             "Subjectivity": 0.5, "Dimension 1": 0, "Dimension 2": 0},
            {"Month": "Feb", "Sentiment": -1, "Subjectivity": 0}
        ]"#;
        let file = write_temp(".json", json);
        let ds = load_file(file.path(), &ColumnNames::default()).unwrap();

        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.text, "hey you");
        assert_eq!(first.subjectivity, 1.0);
        let last = &ds.records()[1];
        assert_eq!(last.index, 2);
        assert_eq!(last.text, "");
    }

    #[test]
    fn json_must_be_an_array() {
        let file = write_temp(".json", r#"{"Month": "Jan"}"#);
        assert!(load_file(file.path(), &ColumnNames::default()).is_err());
    }

    #[test]
    fn parquet_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Month", DataType::Utf8, false),
            Field::new("RawTweet", DataType::Utf8, true),
            Field::new("Sentiment", DataType::Float64, true),
            Field::new("Subjectivity", DataType::Float64, false),
            Field::new("Dimension 1", DataType::Float64, false),
            Field::new("Dimension 2", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Jan", "Feb", "Jan"])),
                Arc::new(StringArray::from(vec![Some("['a &lt; b']"), None, Some("c")])),
                Arc::new(Float64Array::from(vec![Some(0.1), Some(0.2), None])),
                Arc::new(Float64Array::from(vec![0.3, 0.4, 0.5])),
                Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])),
                Arc::new(Float64Array::from(vec![4.0, 5.0, 6.0])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let out = std::fs::File::create(file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path(), &ColumnNames::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].text, "a < b");
        assert_eq!(ds.records()[1].text, "");
        assert_eq!((ds.records()[1].x, ds.records()[1].y), (2.0, 5.0));
    }
}
