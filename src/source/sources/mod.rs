/// CSV-backed tabular source.
pub mod csv_source;
