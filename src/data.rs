use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use crate::types::{CategoryId, CellValue, ColumnName};

/// Discrete sentiment label derived from a polarity score.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Every sentiment in canonical column order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Stable label used in exports and charts.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Position of this sentiment in canonical column order.
    pub const fn ordinal(&self) -> usize {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Negative => 1,
            Sentiment::Neutral => 2,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar date of a record, or the marker for a missing/unparseable date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordDate {
    /// Date parsed from the source's date column.
    Parsed(NaiveDate),
    /// Date column absent, empty, or not recognized by the lenient parser.
    Unparseable,
}

impl RecordDate {
    /// Return the parsed date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            RecordDate::Parsed(date) => Some(*date),
            RecordDate::Unparseable => None,
        }
    }

    /// True when a calendar date is available.
    pub fn is_parsed(&self) -> bool {
        matches!(self, RecordDate::Parsed(_))
    }
}

impl From<Option<NaiveDate>> for RecordDate {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(RecordDate::Unparseable, RecordDate::Parsed)
    }
}

/// One source row as produced by the loader, before classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Free-text cell; `None` when the cell is empty.
    pub text: Option<String>,
    /// Category label of the source this row came from.
    pub category: CategoryId,
    /// Calendar date of the post.
    pub date: RecordDate,
    /// All original cells keyed by header, in source column order.
    pub fields: IndexMap<ColumnName, CellValue>,
}

impl RawRecord {
    /// Attach a sentiment label, producing the immutable labeled record.
    pub fn label(self, sentiment: Sentiment, polarity: Option<f64>) -> Record {
        Record {
            text: self.text,
            category: self.category,
            date: self.date,
            sentiment,
            polarity,
            fields: self.fields,
        }
    }
}

/// Canonical labeled record: one social-media post with its derived sentiment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Free-text cell; `None` when the cell is empty.
    pub text: Option<String>,
    /// Category label of the source this row came from.
    pub category: CategoryId,
    /// Calendar date of the post.
    pub date: RecordDate,
    /// Derived sentiment label.
    pub sentiment: Sentiment,
    /// Polarity returned by the scorer, `None` when the scorer was skipped or failed.
    pub polarity: Option<f64>,
    /// All original cells keyed by header, in source column order.
    pub fields: IndexMap<ColumnName, CellValue>,
}
