//! Formatter: turns fetched indicators into one of the EDL wire formats.
//!
//! - **text**: one entry per distinct indicator value, the value itself
//! - **csv**: a `columns` header entry, then one row per indicator
//! - **json**: a single `iocs_list` entry holding the whole JSON array
//! - **json-seq**: one JSON document per indicator, unframed
//!
//! Per-indicator entries are keyed by the indicator value, so a repeated
//! value overwrites the earlier entry in place.

pub mod csv_format;
mod output;

pub use output::FormattedOutput;

use edl_core::{IndicatorRecord, OutputFormat, Result};
use std::fmt::{Display, Write};

/// Key of the single JSON document entry.
pub const JSON_KEY: &str = "iocs_list";

/// Key of the CSV header entry.
pub const CSV_HEADER_KEY: &str = "columns";

/// Format `records` into `out_format`.
pub fn create_values_out_dict(
    records: &[IndicatorRecord],
    out_format: OutputFormat,
) -> Result<FormattedOutput> {
    match out_format {
        OutputFormat::Text => {
            let mut out = FormattedOutput::new();
            for record in records {
                out.insert(record.value.clone(), record.value.clone());
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut out = FormattedOutput::new();
            out.insert(JSON_KEY, serde_json::to_string(records)?);
            Ok(out)
        }
        OutputFormat::JsonSeq => {
            let mut out = FormattedOutput::new();
            for record in records {
                out.insert(record.value.clone(), serde_json::to_string(record)?);
            }
            Ok(out)
        }
        OutputFormat::Csv => csv_format::encode(records),
    }
}

/// Join `items` with `separator`. Empty input gives an empty string.
pub fn list_to_str<T: Display>(items: &[T], separator: &str) -> String {
    join(items.iter(), separator)
}

/// Join `items` with `separator` after mapping each through `map`.
pub fn list_to_str_with<T, U: Display>(
    items: &[T],
    separator: &str,
    map: impl FnMut(&T) -> U,
) -> String {
    join(items.iter().map(map), separator)
}

fn join<I>(items: I, separator: &str) -> String
where
    I: Iterator,
    I::Item: Display,
{
    let mut joined = String::new();
    for (i, item) in items.enumerate() {
        if i > 0 {
            joined.push_str(separator);
        }
        // Writing to a String cannot fail.
        let _ = write!(joined, "{item}");
    }
    joined
}
