//! Tabular source interfaces.
//!
//! Ownership model:
//! - `TabularSource` yields one fully-read `SourceTable` per call.
//! - `RowView` borrows a single row of that table with header-aware lookups.
//! - The loader owns validation; sources only report whether they could be read.

use std::sync::Arc;

use crate::errors::PipelineError;
use crate::types::{CellValue, ColumnName, SourceId};

/// Row/column lookup helpers.
pub mod row_view;
/// Source implementation modules.
pub mod sources;
/// Utility helpers used by source implementations.
pub mod utilities;

pub use row_view::{ColumnMapping, ResolvedColumns, RowView};
pub use sources::csv_source::{CsvSource, CsvSourceConfig};

/// Fully materialized table: a header row plus data rows.
///
/// Rows may be shorter than the header; missing trailing cells read as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceTable {
    /// Column names in source order.
    pub headers: Vec<ColumnName>,
    /// Data rows in source order.
    pub rows: Vec<Vec<CellValue>>,
}

impl SourceTable {
    /// Build a table from string-like headers and rows.
    pub fn new<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<ColumnName>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows as header-aware views.
    pub fn row_views(&self) -> impl Iterator<Item = RowView<'_>> {
        self.row_views_as(&self.headers)
    }

    /// Iterate rows as views keyed by `headers` instead of the table's own.
    pub fn row_views_as<'a>(
        &'a self,
        headers: &'a [ColumnName],
    ) -> impl Iterator<Item = RowView<'a>> {
        self.rows
            .iter()
            .enumerate()
            .map(move |(index, values)| RowView::new(index, headers, values))
    }
}

/// Generic "load labeled records from a delimited source" capability.
///
/// Implementations read their whole content on each call; there is no
/// streaming or paging contract.
pub trait TabularSource: Send + Sync {
    /// Stable source identifier used in problems and logs.
    fn id(&self) -> &str;
    /// Read the full table, or fail when the source cannot be opened or parsed.
    fn read_table(&self) -> Result<SourceTable, PipelineError>;
}

impl<T: TabularSource + ?Sized> TabularSource for Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn read_table(&self) -> Result<SourceTable, PipelineError> {
        (**self).read_table()
    }
}

impl<T: TabularSource + ?Sized> TabularSource for Box<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn read_table(&self) -> Result<SourceTable, PipelineError> {
        (**self).read_table()
    }
}

/// Simple in-memory source useful for tests and prototyping.
#[derive(Clone, Debug)]
pub struct InMemorySource {
    id: SourceId,
    table: Arc<SourceTable>,
}

impl InMemorySource {
    /// Create an in-memory source from a prebuilt table.
    pub fn new(id: impl Into<SourceId>, table: SourceTable) -> Self {
        Self {
            id: id.into(),
            table: Arc::new(table),
        }
    }
}

impl TabularSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn read_table(&self) -> Result<SourceTable, PipelineError> {
        Ok((*self.table).clone())
    }
}

/// Source that always fails to read; stands in for a missing or corrupt export.
#[derive(Clone, Debug)]
pub struct UnreadableSource {
    id: SourceId,
    reason: String,
}

impl UnreadableSource {
    /// Create a source that reports `reason` on every read.
    pub fn new(id: impl Into<SourceId>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

impl TabularSource for UnreadableSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn read_table(&self) -> Result<SourceTable, PipelineError> {
        Err(PipelineError::SourceUnavailable {
            source_id: self.id.clone(),
            reason: self.reason.clone(),
        })
    }
}
