use indexmap::{IndexMap, IndexSet};

use crate::types::{CellValue, ColumnName};

/// Borrowed view over one table row with header-aware lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowView<'a> {
    index: usize,
    headers: &'a [ColumnName],
    values: &'a [CellValue],
}

impl<'a> RowView<'a> {
    /// Wrap row `index` of a table with the given headers.
    pub fn new(index: usize, headers: &'a [ColumnName], values: &'a [CellValue]) -> Self {
        Self {
            index,
            headers,
            values,
        }
    }

    /// Zero-based data row index within the source.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw cell at column `idx`, or `None` when the row is shorter than the header.
    pub fn cell(&self, idx: usize) -> Option<&'a str> {
        self.values.get(idx).map(String::as_str)
    }

    /// Cell at column `idx` when it holds anything besides whitespace.
    pub fn non_blank_cell(&self, idx: usize) -> Option<&'a str> {
        self.cell(idx).filter(|value| !value.trim().is_empty())
    }

    /// All cells keyed by header in column order; missing trailing cells are empty.
    ///
    /// Extra cells beyond the header are kept under positional names (`column_<n>`).
    pub fn fields(&self) -> IndexMap<ColumnName, CellValue> {
        let width = self.headers.len().max(self.values.len());
        (0..width)
            .map(|idx| {
                let name = self
                    .headers
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| format!("column_{idx}"));
                let value = self.values.get(idx).cloned().unwrap_or_default();
                (name, value)
            })
            .collect()
    }
}

/// Declared text/date columns of one source and how to match them against headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Free-text column holding the post.
    pub text_column: ColumnName,
    /// Optional date column.
    pub date_column: Option<ColumnName>,
    /// Match header names case-sensitively when true.
    pub case_sensitive: bool,
}

/// Header positions resolved by [`ColumnMapping::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Position of the text column, `None` when absent.
    pub text: Option<usize>,
    /// Position of the date column, `None` when absent or not declared.
    pub date: Option<usize>,
}

impl ColumnMapping {
    /// Map the given text column with no date column, matching case-insensitively.
    pub fn new(text_column: impl Into<ColumnName>) -> Self {
        Self {
            text_column: text_column.into(),
            date_column: None,
            case_sensitive: false,
        }
    }

    /// Declare a date column.
    pub fn with_date_column(mut self, date_column: impl Into<ColumnName>) -> Self {
        self.date_column = Some(date_column.into());
        self
    }

    /// Set optional date column.
    pub fn with_optional_date_column(mut self, date_column: Option<ColumnName>) -> Self {
        self.date_column = date_column;
        self
    }

    /// Match header names case-sensitively when `case_sensitive` is true.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Locate the declared columns in `headers`.
    pub fn resolve(&self, headers: &[ColumnName]) -> ResolvedColumns {
        ResolvedColumns {
            text: self.position(headers, &self.text_column),
            date: self
                .date_column
                .as_deref()
                .and_then(|name| self.position(headers, name)),
        }
    }

    /// Position of the first header matching `name`.
    pub fn position(&self, headers: &[ColumnName], name: &str) -> Option<usize> {
        let wanted = self.normalize(name);
        headers
            .iter()
            .position(|header| self.normalize(header) == wanted)
    }

    /// Header names used for a source's exported fields.
    ///
    /// The resolved text and date columns take their declared names so every
    /// source exports them under one column. Other headers lose a leading BOM
    /// and surrounding whitespace. Repeated names get a numbered suffix
    /// (`note`, `note.1`, `note.2`) so no cell is overwritten.
    pub fn export_headers(
        &self,
        headers: &[ColumnName],
        resolved: &ResolvedColumns,
    ) -> Vec<ColumnName> {
        let named: Vec<ColumnName> = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                if Some(idx) == resolved.text {
                    self.text_column.clone()
                } else if Some(idx) == resolved.date
                    && let Some(date_column) = &self.date_column
                {
                    date_column.clone()
                } else {
                    header.trim_start_matches('\u{feff}').trim().to_string()
                }
            })
            .collect();
        dedup_names(named)
    }

    fn normalize(&self, value: &str) -> String {
        let trimmed = value.trim_start_matches('\u{feff}').trim();
        if self.case_sensitive {
            trimmed.to_string()
        } else {
            trimmed.to_lowercase()
        }
    }
}

fn dedup_names(names: Vec<ColumnName>) -> Vec<ColumnName> {
    let mut taken: IndexSet<ColumnName> = IndexSet::with_capacity(names.len());
    for name in &names {
        taken.insert(name.clone());
    }
    let mut emitted: IndexSet<ColumnName> = IndexSet::with_capacity(names.len());
    names
        .into_iter()
        .map(|name| {
            if emitted.insert(name.clone()) {
                return name;
            }
            let mut suffix = 1usize;
            loop {
                let candidate = format!("{name}.{suffix}");
                if !taken.contains(&candidate) && emitted.insert(candidate.clone()) {
                    return candidate;
                }
                suffix += 1;
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<ColumnName> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn resolve_matches_case_insensitively_by_default() {
        let headers = headers(&["\u{feff}Date", " Tweet ", "user"]);
        let mapping = ColumnMapping::new("tweet").with_date_column("date");
        assert_eq!(
            mapping.resolve(&headers),
            ResolvedColumns {
                text: Some(1),
                date: Some(0),
            }
        );
    }

    #[test]
    fn resolve_respects_case_sensitivity() {
        let headers = headers(&["Tweet"]);
        let mapping = ColumnMapping::new("tweet").with_case_sensitive(true);
        assert_eq!(mapping.resolve(&headers).text, None);
        assert_eq!(
            mapping.with_case_sensitive(false).resolve(&headers).text,
            Some(0)
        );
    }

    #[test]
    fn undeclared_date_column_resolves_to_none() {
        let headers = headers(&["tweet", "date"]);
        let mapping = ColumnMapping::new("tweet").with_optional_date_column(None);
        assert_eq!(mapping.resolve(&headers).date, None);
    }

    #[test]
    fn row_view_fields_pad_short_rows_and_name_extra_cells() {
        let headers = headers(&["tweet", "date"]);
        let short = vec!["banjir".to_string()];
        let view = RowView::new(3, &headers, &short);
        let fields = view.fields();
        assert_eq!(fields.get("tweet").map(String::as_str), Some("banjir"));
        assert_eq!(fields.get("date").map(String::as_str), Some(""));
        assert_eq!(view.index(), 3);

        let long = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let fields = RowView::new(0, &headers, &long).fields();
        assert_eq!(fields.get("column_2").map(String::as_str), Some("c"));
    }

    #[test]
    fn export_headers_use_declared_names_for_resolved_columns() {
        let headers = headers(&["\u{feff} Tweet", "Created_At ", " user "]);
        let mapping = ColumnMapping::new("tweet").with_date_column("created_at");
        let resolved = mapping.resolve(&headers);
        assert_eq!(
            mapping.export_headers(&headers, &resolved),
            vec!["tweet", "created_at", "user"]
        );
    }

    #[test]
    fn export_headers_suffix_repeated_names() {
        let headers = headers(&["tweet", "note", "note", "note.1", "Tweet"]);
        let mapping = ColumnMapping::new("tweet");
        let resolved = mapping.resolve(&headers);
        assert_eq!(
            mapping.export_headers(&headers, &resolved),
            vec!["tweet", "note", "note.2", "note.1", "Tweet"]
        );

        let values: Vec<String> = ["t", "first", "second", "third", "again"]
            .iter()
            .map(|value| value.to_string())
            .collect();
        let export = mapping.export_headers(&headers, &resolved);
        let fields = RowView::new(0, &export, &values).fields();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields.get("note").map(String::as_str), Some("first"));
        assert_eq!(fields.get("note.2").map(String::as_str), Some("second"));
    }

    #[test]
    fn non_blank_cell_filters_whitespace() {
        let headers = headers(&["tweet"]);
        let values = vec!["   ".to_string()];
        let view = RowView::new(0, &headers, &values);
        assert_eq!(view.cell(0), Some("   "));
        assert_eq!(view.non_blank_cell(0), None);
        assert_eq!(view.non_blank_cell(5), None);
    }
}
