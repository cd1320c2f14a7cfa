//! Insertion-ordered formatted output.

use hashlink::LinkedHashMap;

/// Formatted entries keyed by a stable key derived from the indicator.
///
/// Iteration yields the header (if any) first, then rows in first-insertion
/// order. The header lives outside the row key space, so no indicator value
/// can replace it. Re-inserting an existing row key replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedOutput {
    header: Option<(String, String)>,
    entries: LinkedHashMap<String, String>,
}

impl FormattedOutput {
    /// Create an empty output
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leading header entry
    pub fn set_header(&mut self, key: impl Into<String>, value: String) {
        self.header = Some((key.into(), value));
    }

    /// Header value, if one was set
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_ref().map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite a row
    pub fn insert(&mut self, key: impl Into<String>, value: String) {
        let key = key.into();
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
        } else {
            self.entries.insert(key, value);
        }
    }

    /// Look up an entry by key, the header taking precedence
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match &self.header {
            Some((k, v)) if k == key => Some(v.as_str()),
            _ => self.row(key),
        }
    }

    /// Look up a row by key, ignoring the header
    #[must_use]
    pub fn row(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries, header included
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len() + usize::from(self.header.is_some())
    }

    /// Returns true if there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in output order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Values in output order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(_, v)| v)
    }

    /// Consume the output, keeping values in output order
    #[must_use]
    pub fn into_values(self) -> Vec<String> {
        self.header
            .into_iter()
            .map(|(_, v)| v)
            .chain(self.entries.into_iter().map(|(_, v)| v))
            .collect()
    }
}
