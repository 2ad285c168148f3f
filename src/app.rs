use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};
use tracing::error;

use crate::classifier::ThresholdMode;
use crate::config::{PipelineConfig, SourceSpec};
use crate::constants::columns::DEFAULT_TEXT_COLUMN;
use crate::errors::PipelineError;
use crate::pipeline::{PipelineReport, run_pipeline};
use crate::presentation::{
    PresentationSink, TextTableSink, comparison_chart, distribution_charts, trend_chart,
};
use crate::scoring::{LexiconScorer, PolarityScorer};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThresholdArg {
    Strict,
    #[value(alias = "dead-zone")]
    Deadzone,
}

impl From<ThresholdArg> for ThresholdMode {
    fn from(value: ThresholdArg) -> Self {
        match value {
            ThresholdArg::Strict => ThresholdMode::Strict,
            ThresholdArg::Deadzone => ThresholdMode::DeadZone,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "disaster-sentiment",
    disable_help_subcommand = true,
    about = "Classify and aggregate sentiment of disaster-related posts",
    long_about = "Label each post of every configured source as Positive, Negative or Neutral, merge all sources into one CSV, and print per-category and per-day summaries.",
    after_help = "Without --config or --source the realtime Flood, Earthquake and Landslide exports in the working directory are used."
)]
/// CLI for `disaster-sentiment`.
///
/// Common usage:
/// - Run the default realtime exports: no arguments
/// - Use a JSON config: `--config sources.json`
/// - Repeat `--source LABEL=PATH` to replace the configured sources in order
struct Cli {
    #[arg(long, value_name = "PATH", help = "JSON pipeline configuration file")]
    config: Option<PathBuf>,
    #[arg(
        long = "source",
        value_name = "LABEL=PATH",
        value_parser = parse_source_arg,
        help = "Source override, repeat as needed in source order"
    )]
    sources: Vec<(String, String)>,
    #[arg(
        long = "text-column",
        value_name = "NAME",
        help = "Text column for every source"
    )]
    text_column: Option<String>,
    #[arg(
        long = "date-column",
        value_name = "NAME",
        help = "Date column for every source"
    )]
    date_column: Option<String>,
    #[arg(long = "threshold-mode", value_enum, help = "Polarity threshold rule")]
    threshold_mode: Option<ThresholdArg>,
    #[arg(long, value_name = "PATH", help = "Merged CSV destination")]
    output: Option<String>,
    #[arg(
        long = "case-sensitive-columns",
        help = "Match column names case-sensitively"
    )]
    case_sensitive_columns: bool,
}

/// How a CLI run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// At least one source produced records.
    Completed,
    /// Every source was empty or unusable.
    EmptyDataset,
    /// Help or version text was printed.
    InfoShown,
}

impl RunOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> u8 {
        match self {
            RunOutcome::Completed | RunOutcome::InfoShown => 0,
            RunOutcome::EmptyDataset => 2,
        }
    }
}

/// Run the CLI with the built-in lexicon scorer, printing results to `out`.
pub fn run_cli<I>(args_iter: I, out: &mut dyn Write) -> Result<RunOutcome, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    run_cli_with_scorer(args_iter, &LexiconScorer::default(), out)
}

/// Run the CLI with a caller-provided scorer.
///
/// `args_iter` excludes the program name. Configuration and argument errors
/// are returned; an empty dataset is an outcome, not an error.
pub fn run_cli_with_scorer<I, S>(
    args_iter: I,
    scorer: &S,
    out: &mut dyn Write,
) -> Result<RunOutcome, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
    S: PolarityScorer + ?Sized,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let Some(cli) = parse_cli::<Cli, _>(
        std::iter::once("disaster-sentiment".to_string()).chain(args_iter),
    )?
    else {
        return Ok(RunOutcome::InfoShown);
    };

    let config = build_config(cli)?;
    let report = match run_pipeline(&config, scorer) {
        Ok(report) => report,
        Err(PipelineError::EmptyDataset { sources }) => {
            writeln!(out, "No records loaded from {sources} source(s).")?;
            return Ok(RunOutcome::EmptyDataset);
        }
        Err(err) => return Err(err.into()),
    };

    print_report(&report, out)?;

    match report.dataset.write_csv(&config.merged_output) {
        Ok(()) => writeln!(
            out,
            "Merged {} record(s) into {}",
            report.dataset.len(),
            config.merged_output
        )?,
        Err(err) => {
            error!("[sentiment:export] {}", err);
            writeln!(out, "Export failed: {err}")?;
        }
    }
    Ok(RunOutcome::Completed)
}

fn build_config(cli: Cli) -> Result<PipelineConfig, PipelineError> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if !cli.sources.is_empty() {
        let text_column = cli.text_column.as_deref().unwrap_or(DEFAULT_TEXT_COLUMN);
        config.sources = cli
            .sources
            .iter()
            .map(|(label, locator)| SourceSpec::new(label.as_str(), locator.as_str(), text_column))
            .collect();
    }
    for spec in &mut config.sources {
        if let Some(text_column) = &cli.text_column {
            spec.text_column = text_column.clone();
        }
        if let Some(date_column) = &cli.date_column {
            spec.date_column = Some(date_column.clone());
        }
    }
    if let Some(mode) = cli.threshold_mode {
        config.threshold_mode = mode.into();
    }
    if let Some(output) = cli.output {
        config.merged_output = output;
    }
    if cli.case_sensitive_columns {
        config.case_sensitive_columns = true;
    }
    config.validate()?;
    Ok(config)
}

fn print_report(report: &PipelineReport, out: &mut dyn Write) -> Result<(), PipelineError> {
    if !report.problems.is_empty() {
        writeln!(out, "Problems:")?;
        for problem in &report.problems {
            writeln!(out, "  - {problem}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Sources:")?;
    for source in &report.sources {
        writeln!(
            out,
            "  {:<12} {:<24} records={:<6} scoring_failures={}",
            source.category, source.source_id, source.records, source.scoring_failures
        )?;
    }
    writeln!(out)?;

    if let Some(summary) = report.summary() {
        writeln!(out, "Summary ({} records):", summary.total)?;
        for category in &summary.categories {
            let shares: Vec<String> = category
                .shares
                .iter()
                .map(|share| format!("{} {} ({})", share.sentiment, share.count, share.percent_label()))
                .collect();
            writeln!(
                out,
                "  {:<12} {:>6}  {}",
                category.category,
                category.total,
                shares.join(", ")
            )?;
        }
        writeln!(out)?;
    }

    let mut sink = TextTableSink::new(out);
    for chart in distribution_charts(&report.by_category) {
        sink.render(&chart)?;
    }
    sink.render(&comparison_chart(&report.by_category))?;
    let trend = report.trend();
    if !trend.rows.is_empty() {
        sink.render(&trend_chart(&trend))?;
    }
    Ok(())
}

fn parse_source_arg(raw: &str) -> Result<(String, String), String> {
    let Some((label, locator)) = raw.split_once('=') else {
        return Err(format!("--source expects LABEL=PATH, got '{raw}'"));
    };
    let (label, locator) = (label.trim(), locator.trim());
    if label.is_empty() || locator.is_empty() {
        return Err(format!("--source expects LABEL=PATH, got '{raw}'"));
    }
    Ok((label.to_string(), locator.to_string()))
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
