//! CSV encoding: a header of the union of all field names, then one row
//! per indicator with the same columns.
//!
//! ```text
//! value,indicator_type,score,tags
//! 1.2.3.4,IP,3,"[""c2""]"
//! evil.example,Domain,,
//! ```

use edl_core::{EdlError, IndicatorRecord, Result};
use hashlink::LinkedHashSet;

use super::{FormattedOutput, CSV_HEADER_KEY};

/// Union of field names across `records`, in first-seen order.
pub fn columns(records: &[IndicatorRecord]) -> Vec<String> {
    let mut seen: LinkedHashSet<&str> = LinkedHashSet::new();
    for record in records {
        for name in record.field_names() {
            if !seen.contains(name) {
                seen.insert(name);
            }
        }
    }
    seen.into_iter().map(String::from).collect()
}

/// Encode `records` as a header entry followed by one row per record.
pub fn encode(records: &[IndicatorRecord]) -> Result<FormattedOutput> {
    let columns = columns(records);
    let mut out = FormattedOutput::new();
    out.set_header(CSV_HEADER_KEY, encode_row(&columns)?);

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|name| record.field_text(name).unwrap_or_default())
            .collect();
        out.insert(record.value.clone(), encode_row(&row)?);
    }

    Ok(out)
}

/// Encode one CSV line without its terminator.
fn encode_row(fields: &[String]) -> Result<String> {
    if fields.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(fields)
        .map_err(|e| EdlError::Format(format!("csv write failed: {e}")))?;
    let mut bytes = writer
        .into_inner()
        .map_err(|e| EdlError::Format(format!("csv flush failed: {e}")))?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    String::from_utf8(bytes).map_err(|e| EdlError::Format(format!("csv output not UTF-8: {e}")))
}
