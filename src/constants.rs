/// Constants used by polarity-to-sentiment classification.
pub mod classifier {
    /// Threshold used by strict mode: any non-zero polarity is decisive.
    pub const STRICT_THRESHOLD: f64 = 0.0;
    /// Threshold used by dead-zone mode: polarities within `±0.05` stay neutral.
    pub const DEAD_ZONE_THRESHOLD: f64 = 0.05;
    /// Lower bound of the polarity range.
    pub const POLARITY_MIN: f64 = -1.0;
    /// Upper bound of the polarity range.
    pub const POLARITY_MAX: f64 = 1.0;
}

/// Column names used by loaders and the merged export.
pub mod columns {
    /// Default free-text column name of social-media exports.
    pub const DEFAULT_TEXT_COLUMN: &str = "tweet";
    /// Derived column holding the source-assigned disaster category.
    pub const CATEGORY_COLUMN: &str = "category";
    /// Derived column holding the sentiment label.
    pub const SENTIMENT_COLUMN: &str = "sentiment";
    /// Derived column holding the raw polarity score (empty when not scored).
    pub const POLARITY_COLUMN: &str = "polarity";
    /// Derived column holding the normalized `YYYY-MM-DD` date (empty when unparseable).
    pub const PARSED_DATE_COLUMN: &str = "parsed_date";
    /// All derived columns in export order.
    pub const DERIVED_COLUMNS: [&str; 4] = [
        CATEGORY_COLUMN,
        SENTIMENT_COLUMN,
        POLARITY_COLUMN,
        PARSED_DATE_COLUMN,
    ];
}

/// Constants used by the default pipeline configuration.
pub mod config {
    /// Default destination of the merged labeled dataset.
    pub const DEFAULT_MERGED_OUTPUT: &str = "merged_sentiment.csv";
    /// Default `(category, locator)` pairs for the realtime disaster exports.
    pub const DEFAULT_SOURCES: [(&str, &str); 3] = [
        ("Flood", "banjir_data_realtime.csv"),
        ("Earthquake", "gempa_data_realtime.csv"),
        ("Landslide", "longsor.csv"),
    ];
    /// Canonical date format used by the merged export.
    pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Titles and axis labels for chart requests.
pub mod presentation {
    /// Title prefix for per-category distribution pies.
    pub const DISTRIBUTION_TITLE_PREFIX: &str = "Sentiment distribution for";
    /// Title for the cross-category comparison bar chart.
    pub const COMPARISON_TITLE: &str = "Sentiment comparison across disasters";
    /// X-axis label for the comparison chart.
    pub const COMPARISON_X_LABEL: &str = "Disaster type";
    /// Y-axis label for count-based charts.
    pub const COUNT_Y_LABEL: &str = "Post count";
    /// Legend title for sentiment series.
    pub const SENTIMENT_LEGEND: &str = "Sentiment";
    /// Title for the daily trend chart.
    pub const TREND_TITLE: &str = "Posts per day by disaster";
    /// X-axis label for the daily trend chart.
    pub const TREND_X_LABEL: &str = "Date";
    /// Legend title for category series.
    pub const CATEGORY_LEGEND: &str = "Disaster type";
}
