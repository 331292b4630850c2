use std::collections::BTreeSet;
use std::fmt;

use super::clean::normalize;

// ---------------------------------------------------------------------------
// Cell – a single raw value produced by a loader
// ---------------------------------------------------------------------------

/// A dynamically-typed source cell. CSV yields only `String`/`Null`; JSON and
/// Parquet may carry native numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::String(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Null => Ok(()),
        }
    }
}

impl Cell {
    /// Interpret the cell as a number. Strings are parsed after trimming;
    /// `NaN` never comes back as a value.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Cell::Float(v) => *v,
            Cell::Integer(i) => *i as f64,
            Cell::String(s) => s.trim().parse::<f64>().ok()?,
            Cell::Bool(_) | Cell::Null => return None,
        };
        (!v.is_nan()).then_some(v)
    }

    /// Interpret the cell as text; `None` for null and empty cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::String(s) if s.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// RawRow – the columns of one source row that the dashboard uses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub category: Cell,
    pub text: Cell,
    pub sentiment: Cell,
    pub subjectivity: Cell,
    pub dim1: Cell,
    pub dim2: Cell,
}

// ---------------------------------------------------------------------------
// Record – one cleaned, scored tweet
// ---------------------------------------------------------------------------

/// A single scored record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Original row position; stable id used by the chart and selection.
    pub index: usize,
    pub category: String,
    /// Expected in [-1, 1].
    pub sentiment: f64,
    /// Expected in [0, 1].
    pub subjectivity: f64,
    /// Projection coordinates; NaN when the source cell did not parse.
    pub x: f64,
    pub y: f64,
    /// Normalised display text.
    pub text: String,
}

impl Record {
    /// Build a record from a raw row, or `None` if either score is not a
    /// number.
    pub fn from_raw(index: usize, row: &RawRow) -> Option<Self> {
        let sentiment = row.sentiment.as_f64()?;
        let subjectivity = row.subjectivity.as_f64()?;
        Some(Record {
            index,
            category: row.category.to_string(),
            sentiment,
            subjectivity,
            x: row.dim1.as_f64().unwrap_or(f64::NAN),
            y: row.dim2.as_f64().unwrap_or(f64::NAN),
            text: normalize(row.text.as_text().as_deref()),
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with its sorted category index.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    categories: Vec<String>,
    /// Rows dropped because a score did not parse.
    dropped: usize,
}

impl Dataset {
    /// Turn raw rows into records, dropping rows with unparseable scores.
    pub fn load(rows: impl IntoIterator<Item = RawRow>) -> Self {
        let mut dropped = 0;
        let records: Vec<Record> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let rec = Record::from_raw(i, &row);
                if rec.is_none() {
                    dropped += 1;
                }
                rec
            })
            .collect();

        let categories: Vec<String> = records
            .iter()
            .map(|r| r.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if dropped > 0 {
            log::debug!("Dropped {dropped} rows with non-numeric scores");
        }

        Dataset {
            records,
            categories,
            dropped,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct categories, sorted ascending.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
