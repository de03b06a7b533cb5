//! Raw cell values as delivered by the import collaborator.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One raw cell of a batch-import record.
///
/// The parsing engine that extracts these from spreadsheets or flat files
/// is an external collaborator; this core only consumes the extracted
/// values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Textual rendering, `None` for empty cells.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Timestamp(t) => Some(t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }

    /// Timestamp view: native timestamps pass through, text is parsed as
    /// RFC 3339.
    pub fn to_timestamp(&self) -> anyhow::Result<Option<DateTime<Utc>>> {
        match self {
            CellValue::Empty => Ok(None),
            CellValue::Text(s) if s.is_empty() => Ok(None),
            CellValue::Timestamp(t) => Ok(Some(*t)),
            CellValue::Text(s) => {
                let parsed = DateTime::parse_from_rfc3339(s)
                    .map_err(|e| anyhow::anyhow!("'{s}' is not a timestamp: {e}"))?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
            CellValue::Number(n) => Err(anyhow::anyhow!("numeric cell {n} is not a timestamp")),
        }
    }
}
