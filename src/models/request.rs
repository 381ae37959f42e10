use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A single uploaded document. The filename is only used for extension sniffing.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content: Bytes,
}

impl Upload {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Coarse control over summary verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    /// Unrecognised directives fall back to `Medium` instead of being rejected.
    pub fn from_directive(directive: &str) -> Self {
        match directive.trim().to_ascii_lowercase().as_str() {
            "short" => SummaryLength::Short,
            "long" => SummaryLength::Long,
            _ => SummaryLength::Medium,
        }
    }

    pub fn style(&self) -> &'static str {
        match self {
            SummaryLength::Short => "3-5 bullets, crisp.",
            SummaryLength::Medium => "6-9 bullets with a 2-line gist.",
            SummaryLength::Long => "10-15 bullets + short abstract.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}
