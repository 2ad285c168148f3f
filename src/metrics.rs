use serde::Serialize;

use crate::aggregate::CategoryView;
use crate::data::Sentiment;
use crate::types::CategoryId;

/// Share of one sentiment within a group of posts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SentimentShare {
    /// Sentiment being measured.
    pub sentiment: Sentiment,
    /// Posts with this sentiment.
    pub count: usize,
    /// Fraction of the group total in `[0, 1]`.
    pub share: f64,
}

impl SentimentShare {
    /// Share as a one-decimal percentage string, e.g. `33.3%`.
    pub fn percent_label(&self) -> String {
        format_percent(self.share)
    }
}

/// Sentiment distribution of one disaster category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategorySummary {
    /// Disaster category.
    pub category: CategoryId,
    /// Posts in the category.
    pub total: usize,
    /// One share per sentiment column, in canonical order.
    pub shares: Vec<SentimentShare>,
    /// Most frequent sentiment; ties resolve in canonical sentiment order.
    pub dominant: Option<Sentiment>,
}

/// Summary statistics across all categories.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SentimentSummary {
    /// Posts across every category.
    pub total: usize,
    /// Per-category summaries in category view order.
    pub categories: Vec<CategorySummary>,
    /// Shares across every category.
    pub overall: Vec<SentimentShare>,
}

/// Format a fraction as a one-decimal percentage.
pub fn format_percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn shares(columns: &[Sentiment], counts: &[usize]) -> Vec<SentimentShare> {
    let total: usize = counts.iter().sum();
    columns
        .iter()
        .zip(counts)
        .map(|(sentiment, count)| SentimentShare {
            sentiment: *sentiment,
            count: *count,
            share: if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64
            },
        })
        .collect()
}

fn dominant(shares: &[SentimentShare]) -> Option<Sentiment> {
    shares
        .iter()
        .filter(|entry| entry.count > 0)
        .fold(None::<&SentimentShare>, |best, entry| match best {
            Some(current) if current.count >= entry.count => Some(current),
            _ => Some(entry),
        })
        .map(|entry| entry.sentiment)
}

/// Compute per-category and overall sentiment shares from a category view.
///
/// Returns `None` for an empty view.
pub fn summarize(view: &CategoryView) -> Option<SentimentSummary> {
    if view.is_empty() {
        return None;
    }
    let columns = view.columns();
    let categories = view
        .rows()
        .map(|(category, counts)| {
            let shares = shares(columns, counts);
            CategorySummary {
                category: category.clone(),
                total: counts.iter().sum(),
                dominant: dominant(&shares),
                shares,
            }
        })
        .collect();
    Some(SentimentSummary {
        total: view.total(),
        categories,
        overall: shares(columns, &view.column_totals()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::by_category_sentiment;
    use crate::data::{Record, RecordDate};
    use indexmap::IndexMap;

    fn record(category: &str, sentiment: Sentiment) -> Record {
        Record {
            text: None,
            category: category.to_string(),
            date: RecordDate::Unparseable,
            sentiment,
            polarity: None,
            fields: IndexMap::new(),
        }
    }

    #[test]
    fn summarize_reports_balanced_shares() {
        let records = vec![
            record("Flood", Sentiment::Positive),
            record("Flood", Sentiment::Negative),
            record("Flood", Sentiment::Neutral),
        ];
        let summary = summarize(&by_category_sentiment(&records)).expect("summary");
        assert_eq!(summary.total, 3);
        let flood = &summary.categories[0];
        assert_eq!(flood.total, 3);
        assert!(flood.shares.iter().all(|entry| (entry.share - 1.0 / 3.0).abs() < 1e-9));
        assert_eq!(flood.shares[0].percent_label(), "33.3%");
        assert_eq!(flood.dominant, Some(Sentiment::Positive));
    }

    #[test]
    fn summarize_reports_imbalance_and_zero_rows() {
        let records = vec![
            record("Flood", Sentiment::Negative),
            record("Flood", Sentiment::Negative),
            record("Flood", Sentiment::Positive),
            record("Earthquake", Sentiment::Positive),
        ];
        let summary = summarize(&by_category_sentiment(&records)).expect("summary");
        let flood = &summary.categories[0];
        assert_eq!(flood.dominant, Some(Sentiment::Negative));
        let quake = &summary.categories[1];
        assert_eq!(quake.category, "Earthquake");
        assert_eq!(quake.shares[1].sentiment, Sentiment::Negative);
        assert_eq!(quake.shares[1].count, 0);
        assert_eq!(quake.shares[1].percent_label(), "0.0%");
        assert_eq!(summary.overall[0].count, 2);
        assert!((summary.overall[1].share - 0.5).abs() < 1e-9);
    }

    #[test]
    fn summarize_empty_view_is_none() {
        assert!(summarize(&by_category_sentiment(&[])).is_none());
    }
}
