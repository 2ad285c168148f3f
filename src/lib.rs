#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Sentiment aggregation views by category and by date.
pub mod aggregate;
/// CLI runner shared by the `disaster-sentiment` binary.
pub mod app;
/// Polarity-to-sentiment classification.
pub mod classifier;
/// Pipeline configuration types.
pub mod config;
/// Centralized constants used across loading, classification and export.
pub mod constants;
/// Record and sentiment types.
pub mod data;
/// Typed source loading and per-source problem reporting.
pub mod loader;
/// Ordered merge of labeled records and CSV export.
pub mod merge;
/// Sentiment share summaries.
pub mod metrics;
/// End-to-end pipeline runs.
pub mod pipeline;
/// Chart requests and presentation sinks.
pub mod presentation;
/// Polarity scorer trait and built-in scorers.
pub mod scoring;
/// Tabular source traits and built-in sources.
pub mod source;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;

pub use aggregate::{
    AggregateView, CategoryView, DateCategoryView, DateTrend, by_category_sentiment,
    by_date_category, pivot_categories,
};
pub use classifier::{Classifier, ThresholdMode, Verdict};
pub use config::{PipelineConfig, SourceSpec};
pub use data::{RawRecord, Record, RecordDate, Sentiment};
pub use errors::{PipelineError, ScoringFailure};
pub use loader::{ColumnRole, LoadProblem, RecordLoader, SourceLoad};
pub use merge::{MergedDataset, merge};
pub use metrics::{CategorySummary, SentimentShare, SentimentSummary, summarize};
pub use pipeline::{PipelineReport, PreparedSource, SourceReport, run_pipeline, run_sources};
pub use presentation::{ChartKind, ChartRequest, PresentationSink, Series, TextTableSink};
pub use scoring::{DeadlineScorer, FixedScorer, LexiconScorer, PolarityScorer};
pub use source::{
    ColumnMapping, CsvSource, CsvSourceConfig, InMemorySource, SourceTable, TabularSource,
    UnreadableSource,
};
pub use types::{CategoryId, CellValue, ColumnName, PathString, SourceId};
