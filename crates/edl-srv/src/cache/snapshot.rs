use chrono::{DateTime, Utc};
use edl_core::OutputFormat;

/// A fully formatted, ready-to-serve list.
///
/// Snapshots are never edited; a refresh builds a new one and swaps it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSnapshot {
    lines: Vec<String>,
    format: OutputFormat,
    created_at: DateTime<Utc>,
    generation: u64,
}

impl CacheSnapshot {
    /// Create a snapshot of `lines` built in `format`.
    pub fn new(lines: Vec<String>, format: OutputFormat, generation: u64) -> Self {
        Self {
            lines,
            format,
            created_at: Utc::now(),
            generation,
        }
    }

    /// The placeholder served before the first refresh.
    pub fn empty(format: OutputFormat) -> Self {
        Self::new(Vec::new(), format, 0)
    }

    /// Lines (or the single JSON document) in serving order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Format every line was built with.
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// When the snapshot was built.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Refresh counter; 0 for the placeholder.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if there is nothing to serve.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
