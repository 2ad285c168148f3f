//! Chart requests built from aggregate views, and the sink that renders them.
//!
//! Rendering itself is an external concern; [`TextTableSink`] is the plain
//! text fallback used by the CLI.

use std::io::Write;

use serde::Serialize;

use crate::aggregate::{CategoryView, DateTrend};
use crate::constants::presentation::{
    CATEGORY_LEGEND, COMPARISON_TITLE, COMPARISON_X_LABEL, COUNT_Y_LABEL,
    DISTRIBUTION_TITLE_PREFIX, SENTIMENT_LEGEND, TREND_TITLE, TREND_X_LABEL,
};
use crate::errors::PipelineError;
use crate::metrics::format_percent;

/// Chart type requested from a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    /// Share of each point within a single series.
    Pie,
    /// One bar group per x value, one bar per series.
    GroupedBar,
    /// One line per series over ordered x values.
    Line,
}

/// Named series of `(label, value)` points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    /// Legend entry.
    pub name: String,
    /// Points in x order.
    pub points: Vec<(String, f64)>,
}

/// Request to render series as a chart of a given kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartRequest {
    /// Chart type.
    pub kind: ChartKind,
    /// Chart title.
    pub title: String,
    /// X-axis label, when the chart has axes.
    pub x_label: Option<String>,
    /// Y-axis label, when the chart has axes.
    pub y_label: Option<String>,
    /// Legend heading.
    pub legend_title: Option<String>,
    /// Series to draw.
    pub series: Vec<Series>,
}

/// Consumer of chart requests.
pub trait PresentationSink {
    /// Render one chart.
    fn render(&mut self, chart: &ChartRequest) -> Result<(), PipelineError>;
}

/// One pie per category with the share of each observed sentiment.
///
/// Sentiments with a zero count are left out of the pie.
pub fn distribution_charts(view: &CategoryView) -> Vec<ChartRequest> {
    view.rows()
        .map(|(category, counts)| ChartRequest {
            kind: ChartKind::Pie,
            title: format!("{DISTRIBUTION_TITLE_PREFIX} {category}"),
            x_label: None,
            y_label: None,
            legend_title: None,
            series: vec![Series {
                name: category.clone(),
                points: view
                    .columns()
                    .iter()
                    .zip(counts)
                    .filter(|(_, count)| **count > 0)
                    .map(|(sentiment, count)| (sentiment.to_string(), *count as f64))
                    .collect(),
            }],
        })
        .collect()
}

/// Grouped bars comparing sentiment counts across categories.
pub fn comparison_chart(view: &CategoryView) -> ChartRequest {
    let series = view
        .columns()
        .iter()
        .enumerate()
        .map(|(column, sentiment)| Series {
            name: sentiment.to_string(),
            points: view
                .rows()
                .map(|(category, counts)| (category.clone(), counts[column] as f64))
                .collect(),
        })
        .collect();
    ChartRequest {
        kind: ChartKind::GroupedBar,
        title: COMPARISON_TITLE.to_string(),
        x_label: Some(COMPARISON_X_LABEL.to_string()),
        y_label: Some(COUNT_Y_LABEL.to_string()),
        legend_title: Some(SENTIMENT_LEGEND.to_string()),
        series,
    }
}

/// One line per category with posts per day.
pub fn trend_chart(trend: &DateTrend) -> ChartRequest {
    let series = trend
        .categories
        .iter()
        .enumerate()
        .map(|(column, category)| Series {
            name: category.clone(),
            points: trend
                .rows
                .iter()
                .map(|(date, counts)| (date.to_string(), counts[column] as f64))
                .collect(),
        })
        .collect();
    ChartRequest {
        kind: ChartKind::Line,
        title: TREND_TITLE.to_string(),
        x_label: Some(TREND_X_LABEL.to_string()),
        y_label: Some(COUNT_Y_LABEL.to_string()),
        legend_title: Some(CATEGORY_LEGEND.to_string()),
        series,
    }
}

/// Renders charts as aligned text tables.
pub struct TextTableSink<W: Write> {
    out: W,
}

impl<W: Write> TextTableSink<W> {
    /// Render into `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_pie(&mut self, chart: &ChartRequest) -> std::io::Result<()> {
        for series in &chart.series {
            let total: f64 = series.points.iter().map(|(_, value)| value).sum();
            for (label, value) in &series.points {
                let share = if total > 0.0 { value / total } else { 0.0 };
                writeln!(self.out, "  {label:<12} {value:>8} {:>7}", format_percent(share))?;
            }
        }
        Ok(())
    }

    fn render_table(&mut self, chart: &ChartRequest) -> std::io::Result<()> {
        let Some(first) = chart.series.first() else {
            return Ok(());
        };
        let x_header = chart.x_label.as_deref().unwrap_or("");
        write!(self.out, "  {x_header:<14}")?;
        for series in &chart.series {
            write!(self.out, " {:>12}", series.name)?;
        }
        writeln!(self.out)?;
        for (idx, (label, _)) in first.points.iter().enumerate() {
            write!(self.out, "  {label:<14}")?;
            for series in &chart.series {
                let value = series.points.get(idx).map_or(0.0, |(_, value)| *value);
                write!(self.out, " {value:>12}")?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<W: Write> PresentationSink for TextTableSink<W> {
    fn render(&mut self, chart: &ChartRequest) -> Result<(), PipelineError> {
        writeln!(self.out, "== {} ==", chart.title)?;
        match chart.kind {
            ChartKind::Pie => self.render_pie(chart)?,
            ChartKind::GroupedBar | ChartKind::Line => self.render_table(chart)?,
        }
        writeln!(self.out)?;
        Ok(())
    }
}
