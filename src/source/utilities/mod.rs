/// Lenient calendar-date parsing for free-form date cells.
pub mod date_helpers;
