use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::ThresholdMode;
use crate::constants::columns::DEFAULT_TEXT_COLUMN;
use crate::constants::config::{DEFAULT_MERGED_OUTPUT, DEFAULT_SOURCES};
use crate::errors::PipelineError;
use crate::source::ColumnMapping;
use crate::types::{CategoryId, ColumnName, PathString};

fn default_text_column() -> ColumnName {
    DEFAULT_TEXT_COLUMN.to_string()
}

fn default_merged_output() -> PathString {
    DEFAULT_MERGED_OUTPUT.to_string()
}

/// One configured source: a category label plus where and how to read it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Disaster category assigned to every row of this source.
    pub label: CategoryId,
    /// Path of the delimited export.
    pub locator: PathString,
    /// Free-text column name.
    #[serde(default = "default_text_column")]
    pub text_column: ColumnName,
    /// Optional date column name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_column: Option<ColumnName>,
}

impl SourceSpec {
    /// Create a source entry with no date column.
    pub fn new(
        label: impl Into<CategoryId>,
        locator: impl Into<PathString>,
        text_column: impl Into<ColumnName>,
    ) -> Self {
        Self {
            label: label.into(),
            locator: locator.into(),
            text_column: text_column.into(),
            date_column: None,
        }
    }

    /// Declare a date column.
    pub fn with_date_column(mut self, date_column: impl Into<ColumnName>) -> Self {
        self.date_column = Some(date_column.into());
        self
    }

    /// Column mapping for this source.
    pub fn column_mapping(&self, case_sensitive: bool) -> ColumnMapping {
        ColumnMapping::new(self.text_column.clone())
            .with_optional_date_column(self.date_column.clone())
            .with_case_sensitive(case_sensitive)
    }
}

/// Top-level pipeline configuration, passed explicitly into each run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Sources in declaration order; this order is kept in the merged dataset.
    pub sources: Vec<SourceSpec>,
    /// Polarity threshold rule.
    #[serde(default)]
    pub threshold_mode: ThresholdMode,
    /// Destination of the merged labeled dataset.
    #[serde(default = "default_merged_output")]
    pub merged_output: PathString,
    /// Match declared column names case-sensitively.
    #[serde(default)]
    pub case_sensitive_columns: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES
                .iter()
                .map(|(label, locator)| SourceSpec::new(*label, *locator, DEFAULT_TEXT_COLUMN))
                .collect(),
            threshold_mode: ThresholdMode::default(),
            merged_output: default_merged_output(),
            case_sensitive_columns: false,
        }
    }
}

impl PipelineConfig {
    /// Replace the source list.
    pub fn with_sources(mut self, sources: Vec<SourceSpec>) -> Self {
        self.sources = sources;
        self
    }

    /// Override the threshold rule.
    pub fn with_threshold_mode(mut self, threshold_mode: ThresholdMode) -> Self {
        self.threshold_mode = threshold_mode;
        self
    }

    /// Override the merged output destination.
    pub fn with_merged_output(mut self, merged_output: impl Into<PathString>) -> Self {
        self.merged_output = merged_output.into();
        self
    }

    /// Override column-name case sensitivity.
    pub fn with_case_sensitive_columns(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive_columns = case_sensitive;
        self
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self, PipelineError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|err| {
            PipelineError::Configuration(format!(
                "cannot read config '{}': {err}",
                path.as_ref().display()
            ))
        })?;
        Self::from_json_str(&raw)
    }

    /// Reject blank or duplicate labels and blank column names.
    ///
    /// Labels must be unique so category aggregates stay comparable.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let mut seen = HashSet::new();
        for spec in &self.sources {
            if spec.label.trim().is_empty() {
                return Err(PipelineError::Configuration(format!(
                    "source '{}' has an empty label",
                    spec.locator
                )));
            }
            if !seen.insert(spec.label.as_str()) {
                return Err(PipelineError::Configuration(format!(
                    "duplicate source label '{}'",
                    spec.label
                )));
            }
            if spec.text_column.trim().is_empty() {
                return Err(PipelineError::Configuration(format!(
                    "source '{}' has an empty text column",
                    spec.label
                )));
            }
            if spec
                .date_column
                .as_deref()
                .is_some_and(|column| column.trim().is_empty())
            {
                return Err(PipelineError::Configuration(format!(
                    "source '{}' has an empty date column",
                    spec.label
                )));
            }
        }
        if self.merged_output.trim().is_empty() {
            return Err(PipelineError::Configuration(
                "merged output destination is empty".to_string(),
            ));
        }
        Ok(())
    }
}
