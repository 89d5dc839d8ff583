//! The flattened message table.
//!
//! [`FlatTable`] is the row-per-message, column-per-field view of an
//! [`Archive`]: every key observed in any message becomes a column (union of
//! keys, first-encountered document order), and every row carries typed
//! values for the recognized fields plus its raw JSON object for the
//! remaining ones.
//!
//! Flattening also computes the derived values the aggregations read —
//! `date_only`, `hour`, `text_length`, `clean_text` — so each aggregation
//! stays a pure function of the table with no ordering constraints between
//! them.
//!
//! Timestamps must parse; a message whose `date` (or `edited`) cannot be
//! parsed aborts the whole run instead of being skipped, so a partial report
//! is never produced.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde_json::{Map, Value};

use crate::archive::{Archive, kind_name, text_content};
use crate::error::{ReportError, Result};
use crate::text::clean_text;

/// Names of the derived columns, in the order they are computed and exported.
pub const DERIVED_COLUMNS: [&str; 4] = ["date_only", "hour", "text_length", "clean_text"];

/// One flattened message.
///
/// Recognized export fields are typed and parsed; the full raw object is
/// kept alongside so the tabular export can reproduce columns this struct
/// does not model.
#[derive(Debug, Clone)]
pub struct Row {
    /// When the message was sent. Required; parsing failures are fatal.
    pub date: NaiveDateTime,
    /// Category label (`"message"`, `"service"`, …), if present.
    pub kind: Option<String>,
    /// Actor name, if present.
    pub from: Option<String>,
    /// String form of the message body (rich-text fragments concatenated).
    pub text: String,
    /// When the message was last edited; `None` means never edited.
    pub edited: Option<NaiveDateTime>,
    /// Category of attached media; `None` means no media.
    pub media_type: Option<String>,
    /// ID of the message this replies to; presence marks the row a reply.
    pub reply_to: Option<i64>,
    /// Origin of a forwarded message; presence marks the row forwarded.
    pub forwarded_from: Option<String>,
    /// The original JSON object, for union-of-keys export.
    pub raw: Map<String, Value>,

    /// Calendar date truncation of `date`.
    pub date_only: NaiveDate,
    /// Hour of day extracted from `date` (0–23).
    pub hour: u32,
    /// Character count of `text`, before any cleaning.
    pub text_length: usize,
    /// `text` with punctuation stripped and stop-words removed.
    pub clean_text: String,
}

impl Row {
    /// Builds a typed row from a raw message object.
    ///
    /// `index` is the message's position in the export, used in timestamp
    /// diagnostics.
    pub fn from_raw(raw: Map<String, Value>, index: usize) -> Result<Self> {
        let date = match raw.get("date") {
            Some(value) => parse_timestamp(value, index)?,
            None => return Err(ReportError::malformed_timestamp("<missing>", index)),
        };

        let edited = match raw.get("edited").filter(|v| !v.is_null()) {
            Some(value) => Some(parse_timestamp(value, index)?),
            None => None,
        };

        let text = raw.get("text").map(text_content).unwrap_or_default();
        let cleaned = clean_text(&text);

        Ok(Self {
            date,
            kind: string_field(&raw, "type"),
            from: string_field(&raw, "from"),
            edited,
            media_type: string_field(&raw, "media_type"),
            reply_to: raw.get("reply_to_message_id").and_then(Value::as_i64),
            forwarded_from: string_field(&raw, "forwarded_from"),
            date_only: date.date(),
            hour: date.hour(),
            text_length: text.chars().count(),
            clean_text: cleaned,
            text,
            raw,
        })
    }

    /// Returns `true` if the message was edited.
    pub fn is_edited(&self) -> bool {
        self.edited.is_some()
    }

    /// Returns `true` if the message is a reply.
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }

    /// Returns `true` if the message was forwarded.
    pub fn is_forwarded(&self) -> bool {
        self.forwarded_from.is_some()
    }
}

/// The flattened table: one row per message, one column per observed key.
#[derive(Debug, Clone, Default)]
pub struct FlatTable {
    /// Union of keys across all messages, in first-encountered order.
    pub columns: Vec<String>,
    /// One entry per message, in export order.
    pub rows: Vec<Row>,
}

impl FlatTable {
    /// Flattens an [`Archive`] into a table.
    ///
    /// The row count always equals the archive's message count; an empty
    /// archive yields an empty (but valid) table.
    pub fn from_archive(archive: Archive) -> Result<Self> {
        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(archive.len());

        for (index, raw) in archive.messages.into_iter().enumerate() {
            for key in raw.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
            rows.push(Row::from_raw(raw, index)?);
        }

        Ok(Self { columns, rows })
    }

    /// Number of rows (== number of messages in the source archive).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names of the tabular export: the union of observed keys
    /// followed by the derived columns.
    pub fn export_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .cloned()
            .chain(DERIVED_COLUMNS.iter().map(ToString::to_string))
            .collect()
    }

    /// A condensed plain-text preview of the first `n` rows.
    pub fn preview(&self, n: usize) -> String {
        let mut out = format!(
            "{:<19}  {:<14}  {:<10}  text\n",
            "date", "from", "type"
        );
        for row in self.rows.iter().take(n) {
            let mut text: String = row.text.chars().take(40).collect();
            if row.text.chars().count() > 40 {
                text.push('…');
            }
            out.push_str(&format!(
                "{:<19}  {:<14}  {:<10}  {}\n",
                row.date.format("%Y-%m-%d %H:%M:%S"),
                row.from.as_deref().unwrap_or(""),
                row.kind.as_deref().unwrap_or(""),
                text
            ));
        }
        out
    }

    /// A per-column summary: non-null counts and observed value kinds,
    /// followed by the derived columns.
    pub fn schema_summary(&self) -> String {
        let mut out = format!(
            "{} rows x {} columns ({} derived)\n",
            self.len(),
            self.columns.len() + DERIVED_COLUMNS.len(),
            DERIVED_COLUMNS.len()
        );
        for col in &self.columns {
            let non_null = self
                .rows
                .iter()
                .filter(|r| r.raw.get(col).is_some_and(|v| !v.is_null()))
                .count();
            let kind = self
                .rows
                .iter()
                .find_map(|r| r.raw.get(col).filter(|v| !v.is_null()))
                .map_or("null", kind_name);
            out.push_str(&format!("  {col}: {non_null} non-null ({kind})\n"));
        }
        for col in DERIVED_COLUMNS {
            out.push_str(&format!("  {col}: {} non-null (derived)\n", self.len()));
        }
        out
    }
}

/// Renders a raw JSON value as a table cell: strings verbatim, nulls empty,
/// everything else as compact JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn string_field(raw: &Map<String, Value>, key: &str) -> Option<String> {
    raw.get(key)
        .filter(|v| !v.is_null())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

fn parse_timestamp(value: &Value, index: usize) -> Result<NaiveDateTime> {
    let Some(s) = value.as_str() else {
        return Err(ReportError::malformed_timestamp(value.to_string(), index));
    };
    parse_timestamp_str(s).ok_or_else(|| ReportError::malformed_timestamp(s, index))
}

/// Parses an export timestamp.
///
/// Telegram writes local timestamps as `2024-01-15T10:30:00`; the space
/// separator and RFC 3339 offsets also occur in the wild.
fn parse_timestamp_str(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc()))
}
