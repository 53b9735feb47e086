pub mod format;

pub use format::{format_date, parse_date, DATE_FORMAT};
