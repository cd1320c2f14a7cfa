use crate::EdlError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Wire format an EDL is served in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// One indicator value per line
    #[default]
    #[serde(rename = "text")]
    Text,
    /// Header line plus one row per indicator
    #[serde(rename = "csv")]
    Csv,
    /// A single JSON array of all indicators
    #[serde(rename = "json")]
    Json,
    /// RFC 7464 JSON text sequence, one indicator per element
    #[serde(rename = "json-seq")]
    JsonSeq,
}

impl OutputFormat {
    /// All supported formats
    pub const ALL: [Self; 4] = [Self::Text, Self::Csv, Self::Json, Self::JsonSeq];

    /// Parameter spelling of this format
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::JsonSeq => "json-seq",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = EdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "json-seq" => Ok(Self::JsonSeq),
            _ => Err(EdlError::Config(format!(
                "unsupported output format '{s}' (valid formats: text, csv, json, json-seq)"
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
