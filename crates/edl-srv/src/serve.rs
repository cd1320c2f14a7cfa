//! Payload rendering at the HTTP boundary.
//!
//! The transport hands a snapshot to [`render`] and writes the resulting
//! body with its media type. JSON-Seq framing (RFC 7464) is applied here,
//! not in the formatter.

use edl_core::OutputFormat;

use crate::cache::CacheSnapshot;
use crate::encoding::list_to_str;

/// RFC 7464 record separator.
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// A rendered EDL response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdlResponse {
    /// Value for the `Content-Type` header.
    pub content_type: &'static str,
    /// Response body.
    pub body: String,
}

/// Media type served for `format`.
pub const fn media_type(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "text/plain",
        OutputFormat::Csv => "text/csv",
        OutputFormat::Json => "application/json",
        OutputFormat::JsonSeq => "application/json-seq",
    }
}

/// Render `snapshot` in the format it was built with.
pub fn render(snapshot: &CacheSnapshot) -> EdlResponse {
    let lines = snapshot.lines();
    let body = match snapshot.format() {
        OutputFormat::Text | OutputFormat::Csv => list_to_str(lines, "\n"),
        OutputFormat::Json => lines.first().cloned().unwrap_or_else(|| String::from("[]")),
        OutputFormat::JsonSeq => {
            let mut body = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
            for line in lines {
                body.push(RECORD_SEPARATOR);
                body.push_str(line);
                body.push('\n');
            }
            body
        }
    };

    EdlResponse {
        content_type: media_type(snapshot.format()),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(lines: &[&str], format: OutputFormat) -> CacheSnapshot {
        CacheSnapshot::new(lines.iter().map(|l| (*l).to_string()).collect(), format, 1)
    }

    #[test]
    fn test_text_newline_joined() {
        let response = render(&snapshot(&["1.1.1.1", "2.2.2.2"], OutputFormat::Text));
        assert_eq!(response.content_type, "text/plain");
        assert_eq!(response.body, "1.1.1.1\n2.2.2.2");
    }

    #[test]
    fn test_csv_newline_joined() {
        let response = render(&snapshot(&["value,score", "1.1.1.1,3"], OutputFormat::Csv));
        assert_eq!(response.content_type, "text/csv");
        assert_eq!(response.body, "value,score\n1.1.1.1,3");
    }

    #[test]
    fn test_json_single_document() {
        let response = render(&snapshot(&[r#"[{"value":"1.1.1.1"}]"#], OutputFormat::Json));
        assert_eq!(response.content_type, "application/json");
        assert_eq!(response.body, r#"[{"value":"1.1.1.1"}]"#);
    }

    #[test]
    fn test_json_seq_framing() {
        let response = render(&snapshot(
            &[r#"{"value":"a"}"#, r#"{"value":"b"}"#],
            OutputFormat::JsonSeq,
        ));
        assert_eq!(response.content_type, "application/json-seq");
        assert_eq!(response.body, "\u{1e}{\"value\":\"a\"}\n\u{1e}{\"value\":\"b\"}\n");
    }

    #[test]
    fn test_empty_snapshots() {
        assert_eq!(render(&CacheSnapshot::empty(OutputFormat::Text)).body, "");
        assert_eq!(render(&CacheSnapshot::empty(OutputFormat::JsonSeq)).body, "");
        assert_eq!(render(&CacheSnapshot::empty(OutputFormat::Json)).body, "[]");
    }
}
