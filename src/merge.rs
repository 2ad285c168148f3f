//! Ordered union of per-source labeled records and the merged CSV export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use indexmap::IndexSet;
use tracing::info;

use crate::constants::columns::{
    CATEGORY_COLUMN, DERIVED_COLUMNS, PARSED_DATE_COLUMN, POLARITY_COLUMN, SENTIMENT_COLUMN,
};
use crate::constants::config::EXPORT_DATE_FORMAT;
use crate::data::Record;
use crate::errors::PipelineError;
use crate::types::{CategoryId, ColumnName};

/// Labeled records from every source, in declared source order.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedDataset {
    records: Vec<Record>,
    source_columns: IndexSet<ColumnName>,
}

/// Concatenate per-source record sets in the order given.
///
/// No sorting and no deduplication: identical texts from different rows are
/// all kept. Fails with [`PipelineError::EmptyDataset`] when the union is empty.
pub fn merge<I>(per_source: I) -> Result<MergedDataset, PipelineError>
where
    I: IntoIterator<Item = Vec<Record>>,
{
    let mut sources = 0usize;
    let mut records = Vec::new();
    for batch in per_source {
        sources += 1;
        records.extend(batch);
    }
    if records.is_empty() {
        return Err(PipelineError::EmptyDataset { sources });
    }
    let source_columns = records
        .iter()
        .flat_map(|record| record.fields.keys().cloned())
        .collect();
    Ok(MergedDataset {
        records,
        source_columns,
    })
}

impl MergedDataset {
    /// All records in merged order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a dataset produced by [`merge`].
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in merged order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Records of one category, in merged order.
    pub fn filter_category(&self, category: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .collect()
    }

    /// Categories in first-appearance order.
    pub fn categories(&self) -> Vec<CategoryId> {
        let categories: IndexSet<&str> = self
            .records
            .iter()
            .map(|record| record.category.as_str())
            .collect();
        categories.into_iter().map(str::to_string).collect()
    }

    /// Export header: every source column in first-appearance order, then the
    /// derived columns. A source column sharing a derived column's name is
    /// replaced by the derived value.
    pub fn export_columns(&self) -> Vec<ColumnName> {
        self.source_columns
            .iter()
            .filter(|column| !DERIVED_COLUMNS.contains(&column.as_str()))
            .cloned()
            .chain(DERIVED_COLUMNS.iter().map(|column| column.to_string()))
            .collect()
    }

    /// Write the merged dataset as CSV to `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), PipelineError> {
        let columns = self.export_columns();
        let mut out = Writer::from_writer(writer);
        out.write_record(&columns)?;
        for record in &self.records {
            let row = columns.iter().map(|column| match column.as_str() {
                CATEGORY_COLUMN => record.category.clone(),
                SENTIMENT_COLUMN => record.sentiment.to_string(),
                POLARITY_COLUMN => record
                    .polarity
                    .map(|polarity| polarity.to_string())
                    .unwrap_or_default(),
                PARSED_DATE_COLUMN => record
                    .date
                    .date()
                    .map(|date| date.format(EXPORT_DATE_FORMAT).to_string())
                    .unwrap_or_default(),
                other => record.fields.get(other).cloned().unwrap_or_default(),
            });
            out.write_record(row)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write the merged dataset as CSV to `path`.
    ///
    /// An unwritable destination is reported as [`PipelineError::Export`].
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), PipelineError> {
        let path = path.as_ref();
        let export_error = |reason: String| PipelineError::Export {
            destination: path.display().to_string(),
            reason,
        };
        let file = File::create(path).map_err(|err| export_error(err.to_string()))?;
        self.write_to(file).map_err(|err| export_error(err.to_string()))?;
        info!(
            "[sentiment:export] wrote {} records to {}",
            self.records.len(),
            path.display()
        );
        Ok(())
    }
}
