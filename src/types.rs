/// Identifier for a configured source, reported in problems and logs.
/// Examples: `Flood`, `Earthquake`
pub type SourceId = String;
/// Disaster category label assigned to every record of one source.
/// Examples: `Flood`, `Earthquake`, `Landslide`
pub type CategoryId = String;
/// Column name in a tabular source.
/// Examples: `tweet`, `created_at`, `date`
pub type ColumnName = String;
/// Path or identifier locating a tabular source or export destination.
/// Example: `data/banjir_data_realtime.csv`
pub type PathString = String;
/// Raw cell value read from a tabular source.
/// Examples: `Banjir lagi di Jakarta`, `2024-01-05 08:12:00`
pub type CellValue = String;
