//! End-to-end run: load and label every source in parallel, merge in
//! declared order, then build the aggregate views.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::{
    CategoryView, DateCategoryView, DateTrend, by_category_sentiment, by_date_category,
    pivot_categories,
};
use crate::classifier::{Classifier, ThresholdMode};
use crate::config::PipelineConfig;
use crate::data::Record;
use crate::errors::PipelineError;
use crate::loader::{LoadProblem, RecordLoader};
use crate::merge::{MergedDataset, merge};
use crate::metrics::{SentimentSummary, summarize};
use crate::scoring::PolarityScorer;
use crate::source::{ColumnMapping, CsvSource, CsvSourceConfig, TabularSource};
use crate::types::{CategoryId, SourceId};

type DynSource = Box<dyn TabularSource + 'static>;

/// A source bound to the category it feeds and the loader that reads it.
pub struct PreparedSource {
    category: CategoryId,
    loader: RecordLoader,
    source: DynSource,
}

impl PreparedSource {
    /// Bind `source` to `category` using `mapping` to locate columns.
    pub fn new(
        category: impl Into<CategoryId>,
        mapping: ColumnMapping,
        source: impl TabularSource + 'static,
    ) -> Self {
        Self {
            category: category.into(),
            loader: RecordLoader::new(mapping),
            source: Box::new(source),
        }
    }

    /// Category assigned to every record of this source.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Identifier of the underlying source.
    pub fn source_id(&self) -> &str {
        self.source.id()
    }
}

/// Per-source outcome of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    /// Source identifier.
    pub source_id: SourceId,
    /// Category assigned to the source's records.
    pub category: CategoryId,
    /// Records contributed to the merged dataset.
    pub records: usize,
    /// Records whose scoring failed and were labeled `Neutral`.
    pub scoring_failures: usize,
    /// Load problems of this source.
    pub problems: Vec<LoadProblem>,
}

/// Everything one run produced.
#[derive(Clone, Debug)]
pub struct PipelineReport {
    /// Merged labeled records in declared source order.
    pub dataset: MergedDataset,
    /// Category × sentiment counts over every record.
    pub by_category: CategoryView,
    /// (date, category) × sentiment counts over records with a parsed date.
    pub by_date_category: DateCategoryView,
    /// One entry per source, in declared order.
    pub sources: Vec<SourceReport>,
    /// All load problems, in declared source order.
    pub problems: Vec<LoadProblem>,
}

impl PipelineReport {
    /// Posts per day per category.
    pub fn trend(&self) -> DateTrend {
        pivot_categories(&self.by_date_category)
    }

    /// Per-category sentiment shares.
    pub fn summary(&self) -> Option<SentimentSummary> {
        summarize(&self.by_category)
    }

    /// Total scoring failures across sources.
    pub fn scoring_failures(&self) -> usize {
        self.sources.iter().map(|source| source.scoring_failures).sum()
    }
}

/// Build one CSV-backed source per configured entry, in declared order.
pub fn prepare_sources(config: &PipelineConfig) -> Vec<PreparedSource> {
    config
        .sources
        .iter()
        .map(|spec| {
            let source = CsvSource::new(CsvSourceConfig::new(
                spec.label.clone(),
                spec.locator.clone(),
            ));
            PreparedSource::new(
                spec.label.clone(),
                spec.column_mapping(config.case_sensitive_columns),
                source,
            )
        })
        .collect()
}

/// Validate `config` and run it against its CSV sources.
///
/// The merged dataset is returned, not written; call
/// [`MergedDataset::write_csv`] with `config.merged_output` to export it.
pub fn run_pipeline<S>(config: &PipelineConfig, scorer: &S) -> Result<PipelineReport, PipelineError>
where
    S: PolarityScorer + ?Sized,
{
    config.validate()?;
    run_sources(&prepare_sources(config), config.threshold_mode, scorer)
}

struct LabeledSource {
    records: Vec<Record>,
    report: SourceReport,
}

fn label_source<S>(prepared: &PreparedSource, classifier: Classifier, scorer: &S) -> LabeledSource
where
    S: PolarityScorer + ?Sized,
{
    let load = prepared
        .loader
        .load(prepared.source.as_ref(), &prepared.category);
    let mut scoring_failures = 0usize;
    let records: Vec<Record> = load
        .records
        .into_iter()
        .map(|raw| {
            let (record, failure) = classifier.label(raw, scorer);
            if failure.is_some() {
                scoring_failures += 1;
            }
            record
        })
        .collect();
    if scoring_failures > 0 {
        warn!(
            "[sentiment:pipeline] '{}': {} record(s) fell back to Neutral after scoring failures",
            prepared.source_id(),
            scoring_failures
        );
    }
    debug!(
        "[sentiment:pipeline] '{}' labeled {} record(s) as {}",
        prepared.source_id(),
        records.len(),
        prepared.category
    );
    LabeledSource {
        report: SourceReport {
            source_id: prepared.source_id().to_string(),
            category: prepared.category.clone(),
            records: records.len(),
            scoring_failures,
            problems: load.problems,
        },
        records,
    }
}

/// Load, label, merge and aggregate already-prepared sources.
///
/// Sources are processed in parallel; results are collected back in the
/// order given, so the merged dataset and every view are deterministic.
pub fn run_sources<S>(
    sources: &[PreparedSource],
    mode: ThresholdMode,
    scorer: &S,
) -> Result<PipelineReport, PipelineError>
where
    S: PolarityScorer + ?Sized,
{
    let classifier = Classifier::new(mode);
    info!(
        "[sentiment:pipeline] processing {} source(s) with {:?} thresholds",
        sources.len(),
        mode
    );
    let labeled: Vec<LabeledSource> = sources
        .par_iter()
        .map(|prepared| label_source(prepared, classifier, scorer))
        .collect();

    let mut reports = Vec::with_capacity(labeled.len());
    let mut batches = Vec::with_capacity(labeled.len());
    for source in labeled {
        reports.push(source.report);
        batches.push(source.records);
    }
    let problems: Vec<LoadProblem> = reports
        .iter()
        .flat_map(|report| report.problems.iter().cloned())
        .collect();

    let dataset = match merge(batches) {
        Ok(dataset) => dataset,
        Err(err) => {
            warn!(
                "[sentiment:pipeline] no records from {} source(s) ({} problem(s))",
                sources.len(),
                problems.len()
            );
            return Err(err);
        }
    };
    let by_category = by_category_sentiment(dataset.records());
    let by_date_category = by_date_category(dataset.records());
    info!(
        "[sentiment:pipeline] merged {} record(s) across {} categories, {} dated",
        dataset.len(),
        by_category.len(),
        by_date_category.total()
    );
    Ok(PipelineReport {
        dataset,
        by_category,
        by_date_category,
        sources: reports,
        problems,
    })
}
