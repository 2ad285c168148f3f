//! Record loading: one tabular source in, typed rows plus per-source problems out.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::data::{RawRecord, RecordDate};
use crate::source::utilities::date_helpers::parse_lenient_date;
use crate::source::{ColumnMapping, TabularSource};
use crate::types::{CategoryId, ColumnName, SourceId};

/// Which declared column a [`LoadProblem::MissingColumn`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ColumnRole {
    Text,
    Date,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Text => f.write_str("text"),
            ColumnRole::Date => f.write_str("date"),
        }
    }
}

/// Recoverable condition found while loading one source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum LoadProblem {
    /// A declared column is not in the source header.
    ///
    /// A missing text column means the source contributes zero records; a
    /// missing date column leaves every record with an unparseable date.
    MissingColumn {
        source_id: SourceId,
        column: ColumnName,
        role: ColumnRole,
        available: Vec<ColumnName>,
    },
    /// The source could not be opened or parsed; it contributes zero records.
    SourceUnreadable { source_id: SourceId, cause: String },
    /// Some rows had a missing or unrecognized date; they are kept with the
    /// unparseable marker.
    DateParseFailure {
        source_id: SourceId,
        column: ColumnName,
        rows: usize,
    },
}

impl LoadProblem {
    /// Source the problem belongs to.
    pub fn source_id(&self) -> &str {
        match self {
            LoadProblem::MissingColumn { source_id, .. }
            | LoadProblem::SourceUnreadable { source_id, .. }
            | LoadProblem::DateParseFailure { source_id, .. } => source_id,
        }
    }

    /// True when the problem prevented the source from contributing records.
    pub fn is_source_fatal(&self) -> bool {
        match self {
            LoadProblem::MissingColumn { role, .. } => *role == ColumnRole::Text,
            LoadProblem::SourceUnreadable { .. } => true,
            LoadProblem::DateParseFailure { .. } => false,
        }
    }
}

impl fmt::Display for LoadProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadProblem::MissingColumn {
                source_id,
                column,
                role,
                available,
            } => write!(
                f,
                "source '{source_id}': {role} column '{column}' not found (available: {})",
                available.join(", ")
            ),
            LoadProblem::SourceUnreadable { source_id, cause } => {
                write!(f, "source '{source_id}' is unreadable: {cause}")
            }
            LoadProblem::DateParseFailure {
                source_id,
                column,
                rows,
            } => write!(
                f,
                "source '{source_id}': {rows} row(s) with a missing or unparseable '{column}' value"
            ),
        }
    }
}

/// Rows and problems produced by loading one source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceLoad {
    /// One record per source row, in source order.
    pub records: Vec<RawRecord>,
    /// Recoverable problems found while loading.
    pub problems: Vec<LoadProblem>,
}

/// Turns a tabular source into typed rows labeled with a fixed category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLoader {
    mapping: ColumnMapping,
}

impl RecordLoader {
    /// Create a loader for the given column mapping.
    pub fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    /// Column mapping applied to every source this loader reads.
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Load every row of `source` as a record of `category`.
    ///
    /// Never fails: unreadable sources and missing text columns yield zero
    /// records and exactly one problem.
    pub fn load<T>(&self, source: &T, category: &str) -> SourceLoad
    where
        T: TabularSource + ?Sized,
    {
        let source_id = source.id().to_string();
        let table = match source.read_table() {
            Ok(table) => table,
            Err(err) => {
                warn!("[sentiment:loader] skipping '{}': {}", source_id, err);
                return SourceLoad {
                    records: Vec::new(),
                    problems: vec![LoadProblem::SourceUnreadable {
                        source_id,
                        cause: err.to_string(),
                    }],
                };
            }
        };

        let resolved = self.mapping.resolve(&table.headers);
        let Some(text_idx) = resolved.text else {
            warn!(
                "[sentiment:loader] skipping '{}': text column '{}' not found",
                source_id, self.mapping.text_column
            );
            return SourceLoad {
                records: Vec::new(),
                problems: vec![LoadProblem::MissingColumn {
                    source_id,
                    column: self.mapping.text_column.clone(),
                    role: ColumnRole::Text,
                    available: table.headers.clone(),
                }],
            };
        };

        let mut problems = Vec::new();
        if let Some(date_column) = &self.mapping.date_column
            && resolved.date.is_none()
        {
            warn!(
                "[sentiment:loader] '{}': date column '{}' not found, dates left unparseable",
                source_id, date_column
            );
            problems.push(LoadProblem::MissingColumn {
                source_id: source_id.clone(),
                column: date_column.clone(),
                role: ColumnRole::Date,
                available: table.headers.clone(),
            });
        }

        let export_headers = self.mapping.export_headers(&table.headers, &resolved);
        let mut unparseable_dates = 0usize;
        let records: Vec<RawRecord> = table
            .row_views_as(&export_headers)
            .map(|row| {
                let date = match resolved.date {
                    Some(idx) => {
                        let date = RecordDate::from(row.cell(idx).and_then(parse_lenient_date));
                        if !date.is_parsed() {
                            unparseable_dates += 1;
                        }
                        date
                    }
                    None => RecordDate::Unparseable,
                };
                RawRecord {
                    text: row.non_blank_cell(text_idx).map(str::to_string),
                    category: CategoryId::from(category),
                    date,
                    fields: row.fields(),
                }
            })
            .collect();

        if unparseable_dates > 0
            && let Some(date_column) = &self.mapping.date_column
        {
            debug!(
                "[sentiment:loader] '{}': {} of {} dates unparseable",
                source_id,
                unparseable_dates,
                records.len()
            );
            problems.push(LoadProblem::DateParseFailure {
                source_id: source_id.clone(),
                column: date_column.clone(),
                rows: unparseable_dates,
            });
        }

        debug!(
            "[sentiment:loader] loaded '{}' as '{}': {} rows",
            source_id,
            category,
            records.len()
        );
        SourceLoad { records, problems }
    }
}
