//! Export format classification.

use std::fmt;

/// Export formats the dispatcher recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xml,
    Json,
    Csv,
    Custom,
}

impl ExportFormat {
    /// All recognized formats, in the order they are offered to users.
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Xml,
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Custom,
    ];

    /// Parse a format name. Matching is case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "xml" => Some(ExportFormat::Xml),
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "custom" => Some(ExportFormat::Custom),
            _ => None,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Xml => "xml",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Custom => "custom",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
