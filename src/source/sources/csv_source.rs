use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder};
use tracing::debug;

use crate::errors::PipelineError;
use crate::source::{SourceTable, TabularSource};
use crate::types::{CellValue, SourceId};

/// Configuration for a delimited-file source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvSourceConfig {
    /// Stable source identifier used in problems and logs.
    pub source_id: SourceId,
    /// Path of the delimited file.
    pub path: PathBuf,
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Allow rows whose length differs from the header.
    pub flexible: bool,
}

impl CsvSourceConfig {
    /// Create a comma-delimited, flexible config for `path`.
    pub fn new(source_id: impl Into<SourceId>, path: impl Into<PathBuf>) -> Self {
        Self {
            source_id: source_id.into(),
            path: path.into(),
            delimiter: b',',
            flexible: true,
        }
    }

    /// Override the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Override whether ragged rows are accepted.
    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }
}

/// Delimited-file source. Cells that are not valid UTF-8 are decoded lossily.
#[derive(Clone, Debug)]
pub struct CsvSource {
    config: CsvSourceConfig,
}

impl CsvSource {
    /// Create a source from configuration.
    pub fn new(config: CsvSourceConfig) -> Self {
        Self { config }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn unavailable(&self, reason: impl std::fmt::Display) -> PipelineError {
        PipelineError::SourceUnavailable {
            source_id: self.config.source_id.clone(),
            reason: format!("{}: {reason}", self.config.path.display()),
        }
    }
}

impl TabularSource for CsvSource {
    fn id(&self) -> &str {
        &self.config.source_id
    }

    fn read_table(&self) -> Result<SourceTable, PipelineError> {
        let file = File::open(&self.config.path).map_err(|err| self.unavailable(err))?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .flexible(self.config.flexible)
            .from_reader(file);

        let headers = decode_record(reader.byte_headers().map_err(|err| self.unavailable(err))?);
        if headers.is_empty() {
            return Err(self.unavailable("no header row"));
        }
        let mut rows = Vec::new();
        let mut record = ByteRecord::new();
        loop {
            match reader.read_byte_record(&mut record) {
                Ok(true) => rows.push(decode_record(&record)),
                Ok(false) => break,
                Err(err) => return Err(self.unavailable(err)),
            }
        }
        debug!(
            "[sentiment:source] read '{}' from {} ({} columns, {} rows)",
            self.config.source_id,
            self.config.path.display(),
            headers.len(),
            rows.len()
        );
        Ok(SourceTable { headers, rows })
    }
}

fn decode_record(record: &ByteRecord) -> Vec<CellValue> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}
