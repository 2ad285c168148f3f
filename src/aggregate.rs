//! Count views over labeled records.
//!
//! Every view carries the same sentiment columns: the union of sentiments
//! observed across the *whole* input, in canonical order. Rows always hold a
//! count for every column, so combinations that never occurred read as `0`.

use std::collections::BTreeMap;
use std::hash::Hash;

use chrono::NaiveDate;
use indexmap::{Equivalent, IndexMap, IndexSet};
use serde::Serialize;

use crate::data::{Record, Sentiment};
use crate::types::CategoryId;

/// Count table keyed by `K` with one column per sentiment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateView<K: Hash + Eq> {
    columns: Vec<Sentiment>,
    rows: IndexMap<K, Vec<usize>>,
}

/// Category × sentiment counts.
pub type CategoryView = AggregateView<CategoryId>;
/// (date, category) × sentiment counts.
pub type DateCategoryView = AggregateView<(NaiveDate, CategoryId)>;

impl<K: Hash + Eq> AggregateView<K> {
    fn empty(columns: Vec<Sentiment>) -> Self {
        Self {
            columns,
            rows: IndexMap::new(),
        }
    }

    fn increment(&mut self, key: K, sentiment: Sentiment) {
        let width = self.columns.len();
        let Some(column) = self.columns.iter().position(|value| *value == sentiment) else {
            return;
        };
        self.rows.entry(key).or_insert_with(|| vec![0; width])[column] += 1;
    }

    /// Sentiment columns in canonical order.
    pub fn columns(&self) -> &[Sentiment] {
        &self.columns
    }

    /// Row keys in view order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.rows.keys()
    }

    /// Rows in view order; each count slice aligns with [`Self::columns`].
    pub fn rows(&self) -> impl Iterator<Item = (&K, &[usize])> {
        self.rows.iter().map(|(key, counts)| (key, counts.as_slice()))
    }

    /// Counts for one row.
    pub fn row<Q>(&self, key: &Q) -> Option<&[usize]>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.rows.get(key).map(Vec::as_slice)
    }

    /// Count for one cell; `0` for unknown rows or columns.
    pub fn count<Q>(&self, key: &Q, sentiment: Sentiment) -> usize
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let Some(column) = self.columns.iter().position(|value| *value == sentiment) else {
            return 0;
        };
        self.row(key).map_or(0, |counts| counts[column])
    }

    /// Sum of one row, `0` for unknown rows.
    pub fn row_total<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.row(key).map_or(0, |counts| counts.iter().sum())
    }

    /// Per-column sums aligned with [`Self::columns`].
    pub fn column_totals(&self) -> Vec<usize> {
        let mut totals = vec![0; self.columns.len()];
        for counts in self.rows.values() {
            for (total, count) in totals.iter_mut().zip(counts) {
                *total += count;
            }
        }
        totals
    }

    /// Sum of every cell.
    pub fn total(&self) -> usize {
        self.rows.values().flatten().sum()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the view has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Union of sentiments observed in `records`, in canonical order.
pub fn observed_sentiments(records: &[Record]) -> Vec<Sentiment> {
    let seen: IndexSet<Sentiment> = records.iter().map(|record| record.sentiment).collect();
    Sentiment::ALL
        .into_iter()
        .filter(|sentiment| seen.contains(sentiment))
        .collect()
}

/// Categories in first-appearance order.
fn category_order(records: &[Record]) -> IndexSet<&str> {
    records
        .iter()
        .map(|record| record.category.as_str())
        .collect()
}

/// Count records per category and sentiment.
///
/// Every record is counted, including those with an unparseable date.
/// Category rows follow first-appearance order.
pub fn by_category_sentiment(records: &[Record]) -> CategoryView {
    let mut view = AggregateView::empty(observed_sentiments(records));
    for record in records {
        view.increment(record.category.clone(), record.sentiment);
    }
    view
}

/// Count records per calendar date, category and sentiment.
///
/// Records with an unparseable date are excluded. Rows are sorted by date,
/// then by category first-appearance order. Columns still reflect every
/// sentiment observed in `records`, including the excluded ones.
pub fn by_date_category(records: &[Record]) -> DateCategoryView {
    let mut view = AggregateView::empty(observed_sentiments(records));
    for record in records {
        if let Some(date) = record.date.date() {
            view.increment((date, record.category.clone()), record.sentiment);
        }
    }
    let order = category_order(records);
    let rank = |category: &str| order.get_index_of(category).unwrap_or(usize::MAX);
    view.rows.sort_by(|(date_a, cat_a), _, (date_b, cat_b), _| {
        date_a
            .cmp(date_b)
            .then_with(|| rank(cat_a.as_str()).cmp(&rank(cat_b.as_str())))
    });
    view
}

/// Posts per day per category, with zero-filled gaps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DateTrend {
    /// Category columns in view order.
    pub categories: Vec<CategoryId>,
    /// Per-date counts aligned with `categories`.
    pub rows: BTreeMap<NaiveDate, Vec<usize>>,
}

impl DateTrend {
    /// Count for one date and category; `0` when absent.
    pub fn count(&self, date: NaiveDate, category: &str) -> usize {
        let Some(column) = self.categories.iter().position(|value| value == category) else {
            return 0;
        };
        self.rows.get(&date).map_or(0, |counts| counts[column])
    }
}

/// Collapse the sentiment axis of a date view into per-category totals.
pub fn pivot_categories(view: &DateCategoryView) -> DateTrend {
    let categories: IndexSet<CategoryId> =
        view.keys().map(|(_, category)| category.clone()).collect();
    let mut rows: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for ((date, category), counts) in view.rows() {
        let Some(column) = categories.get_index_of(category) else {
            continue;
        };
        rows.entry(*date)
            .or_insert_with(|| vec![0; categories.len()])[column] += counts.iter().sum::<usize>();
    }
    DateTrend {
        categories: categories.into_iter().collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RecordDate;
    use indexmap::IndexMap;

    fn record(category: &str, sentiment: Sentiment, date: Option<(i32, u32, u32)>) -> Record {
        Record {
            text: Some("post".to_string()),
            category: category.to_string(),
            date: RecordDate::from(date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))),
            sentiment,
            polarity: None,
            fields: IndexMap::new(),
        }
    }

    #[test]
    fn category_view_zero_fills_absent_combinations() {
        let records = vec![
            record("Flood", Sentiment::Positive, None),
            record("Flood", Sentiment::Negative, None),
            record("Earthquake", Sentiment::Negative, None),
        ];
        let view = by_category_sentiment(&records);

        assert_eq!(view.columns(), &[Sentiment::Positive, Sentiment::Negative]);
        assert_eq!(view.row("Earthquake"), Some(&[0, 1][..]));
        assert_eq!(view.count("Earthquake", Sentiment::Positive), 0);
        assert_eq!(view.count("Flood", Sentiment::Neutral), 0);
        assert_eq!(view.count("Landslide", Sentiment::Negative), 0);
        assert_eq!(view.keys().collect::<Vec<_>>(), vec!["Flood", "Earthquake"]);
        assert_eq!(view.total(), 3);
        assert_eq!(view.column_totals(), vec![1, 2]);
        assert_eq!(view.row_total("Flood"), 2);
    }

    #[test]
    fn date_view_excludes_unparseable_but_keeps_their_sentiments_as_columns() {
        let records = vec![
            record("Flood", Sentiment::Positive, Some((2024, 1, 6))),
            record("Landslide", Sentiment::Negative, Some((2024, 1, 5))),
            record("Flood", Sentiment::Negative, Some((2024, 1, 5))),
            record("Flood", Sentiment::Neutral, None),
        ];
        let view = by_date_category(&records);

        assert_eq!(view.columns(), &Sentiment::ALL);
        assert_eq!(view.total(), 3);
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let keys: Vec<_> = view.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                (day, "Flood".to_string()),
                (day, "Landslide".to_string()),
                (day.succ_opt().unwrap(), "Flood".to_string()),
            ]
        );
        assert_eq!(view.row(&(day, "Flood".to_string())), Some(&[0, 1, 0][..]));
    }

    #[test]
    fn same_day_records_are_counted_together() {
        let records = vec![
            record("Flood", Sentiment::Negative, Some((2024, 1, 5))),
            record("Flood", Sentiment::Negative, Some((2024, 1, 5))),
        ];
        let view = by_date_category(&records);
        assert_eq!(view.len(), 1);
        assert_eq!(view.total(), 2);
    }

    #[test]
    fn views_are_deterministic() {
        let records = vec![
            record("Flood", Sentiment::Positive, Some((2024, 1, 6))),
            record("Earthquake", Sentiment::Neutral, Some((2024, 1, 5))),
            record("Flood", Sentiment::Negative, None),
        ];
        assert_eq!(by_date_category(&records), by_date_category(&records));
        assert_eq!(by_category_sentiment(&records), by_category_sentiment(&records));
    }

    #[test]
    fn empty_input_yields_empty_views() {
        let view = by_category_sentiment(&[]);
        assert!(view.is_empty());
        assert!(view.columns().is_empty());
        assert_eq!(view.total(), 0);
    }

    #[test]
    fn pivot_sums_sentiments_per_category_and_zero_fills() {
        let records = vec![
            record("Flood", Sentiment::Positive, Some((2024, 1, 5))),
            record("Flood", Sentiment::Negative, Some((2024, 1, 5))),
            record("Landslide", Sentiment::Neutral, Some((2024, 1, 6))),
        ];
        let trend = pivot_categories(&by_date_category(&records));
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let next = day.succ_opt().unwrap();

        assert_eq!(trend.categories, vec!["Flood", "Landslide"]);
        assert_eq!(trend.rows.get(&day), Some(&vec![2, 0]));
        assert_eq!(trend.count(next, "Landslide"), 1);
        assert_eq!(trend.count(next, "Flood"), 0);
        assert_eq!(trend.count(next, "Earthquake"), 0);
    }
}
