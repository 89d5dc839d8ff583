//! The twelve descriptive aggregations.
//!
//! Each function here is a pure read of a [`FlatTable`] returning one
//! [`Aggregate`]; none depends on another's output or on invocation order.
//! [`compute_all`] runs the full set in output-file order.
//!
//! Grouping on a categorical column treats a missing value as its own
//! category (the [`ABSENT_BUCKET`]), so an unfiltered distribution sums to
//! the full row count. The three presence-filtered aggregations (edited,
//! replies, forwards) instead drop rows lacking the field before grouping.
//!
//! | Aggregate | Key | Value | Order |
//! |-----------|-----|-------|-------|
//! | messages over time | day | count | day ascending |
//! | message types | `type` | count | count descending |
//! | top actors | `from` | count | count descending, top 10 |
//! | edited over time | day of `edited` | count | day ascending |
//! | media types | `media_type` | count | count descending |
//! | messages per actor | `from` | count | count descending |
//! | top media types | `media_type` | count | count descending, top 10 |
//! | messages by hour | hour | count | hour ascending |
//! | avg message length | day | mean `text_length` | day ascending |
//! | common words | word | count | count descending, top 10 |
//! | reply patterns | day | count | day ascending |
//! | forwarded messages | day | count | day ascending |

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::table::FlatTable;

/// Category label used for rows missing a grouped field.
pub const ABSENT_BUCKET: &str = "(none)";

/// How many entries the "top" aggregations keep.
pub const TOP_N: usize = 10;

/// Chart shape an aggregate is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Time series.
    Line,
    /// Categorical distribution.
    Bar,
    /// Share-of-whole distribution.
    Pie,
}

/// One grouped statistic over the flattened table.
///
/// `name` doubles as the output file stem (`<name>.png`).
#[derive(Debug, Clone, Serialize)]
pub struct Aggregate {
    /// Output file stem.
    pub name: &'static str,
    /// Chart caption.
    pub title: &'static str,
    /// What the key column holds.
    pub key_label: &'static str,
    /// What the value column holds (`count` or `avg_length`).
    pub value_label: &'static str,
    /// Chart shape.
    pub kind: ChartKind,
    /// Key/value pairs in presentation order.
    pub rows: Vec<(String, f64)>,
}

impl Aggregate {
    /// Sum of the value column.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|(_, v)| v).sum()
    }

    /// Number of output rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the aggregate has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Computes all twelve aggregates in output-file order.
pub fn compute_all(table: &FlatTable) -> Vec<Aggregate> {
    vec![
        messages_over_time(table),
        message_types(table),
        top_actors(table),
        edited_over_time(table),
        media_types(table),
        messages_per_actor(table),
        top_media_types(table),
        messages_by_hour(table),
        avg_message_length(table),
        common_words(table),
        reply_patterns(table),
        forwarded_messages(table),
    ]
}

/// #1 — message count per calendar day.
pub fn messages_over_time(table: &FlatTable) -> Aggregate {
    Aggregate {
        name: "messages_over_time",
        title: "Number of messages over time",
        key_label: "date",
        value_label: "count",
        kind: ChartKind::Line,
        rows: count_by_day(table.rows.iter().map(|r| r.date_only)),
    }
}

/// #2 — distribution of the `type` field.
pub fn message_types(table: &FlatTable) -> Aggregate {
    Aggregate {
        name: "message_types_distribution",
        title: "Distribution of message types",
        key_label: "type",
        value_label: "count",
        kind: ChartKind::Pie,
        rows: count_by_category(table.rows.iter().map(|r| r.kind.as_deref())),
    }
}

/// #3 — the ten most active actors.
pub fn top_actors(table: &FlatTable) -> Aggregate {
    let mut rows = count_by_category(table.rows.iter().map(|r| r.from.as_deref()));
    rows.truncate(TOP_N);
    Aggregate {
        name: "top_actors",
        title: "Top actors by message count",
        key_label: "actor",
        value_label: "count",
        kind: ChartKind::Bar,
        rows,
    }
}

/// #4 — edit count per calendar day, keyed by the edit timestamp.
pub fn edited_over_time(table: &FlatTable) -> Aggregate {
    Aggregate {
        name: "messages_edited_over_time",
        title: "Messages edited over time",
        key_label: "date",
        value_label: "count",
        kind: ChartKind::Line,
        rows: count_by_day(table.rows.iter().filter_map(|r| r.edited.map(|e| e.date()))),
    }
}

/// #5 — distribution of the `media_type` field.
pub fn media_types(table: &FlatTable) -> Aggregate {
    Aggregate {
        name: "media_types_distribution",
        title: "Distribution of media types",
        key_label: "media_type",
        value_label: "count",
        kind: ChartKind::Bar,
        rows: count_by_category(table.rows.iter().map(|r| r.media_type.as_deref())),
    }
}

/// #6 — message count per actor, untruncated.
pub fn messages_per_actor(table: &FlatTable) -> Aggregate {
    Aggregate {
        name: "messages_per_actor",
        title: "Number of messages per actor",
        key_label: "actor",
        value_label: "count",
        kind: ChartKind::Bar,
        rows: count_by_category(table.rows.iter().map(|r| r.from.as_deref())),
    }
}

/// #7 — the ten most frequent media types.
pub fn top_media_types(table: &FlatTable) -> Aggregate {
    let mut rows = count_by_category(table.rows.iter().map(|r| r.media_type.as_deref()));
    rows.truncate(TOP_N);
    Aggregate {
        name: "top_media_types",
        title: "Top media types by count",
        key_label: "media_type",
        value_label: "count",
        kind: ChartKind::Bar,
        rows,
    }
}

/// #8 — message count per hour of day, ascending.
pub fn messages_by_hour(table: &FlatTable) -> Aggregate {
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
    for row in &table.rows {
        *counts.entry(row.hour).or_default() += 1;
    }
    Aggregate {
        name: "messages_by_hour",
        title: "Messages sent by time of day",
        key_label: "hour",
        value_label: "count",
        kind: ChartKind::Bar,
        rows: counts
            .into_iter()
            .map(|(h, c)| (h.to_string(), c as f64))
            .collect(),
    }
}

/// #9 — mean text length per calendar day.
pub fn avg_message_length(table: &FlatTable) -> Aggregate {
    let mut sums: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for row in &table.rows {
        let entry = sums.entry(row.date_only).or_default();
        entry.0 += row.text_length as u64;
        entry.1 += 1;
    }
    Aggregate {
        name: "avg_message_length",
        title: "Average length of messages over time",
        key_label: "date",
        value_label: "avg_length",
        kind: ChartKind::Line,
        rows: sums
            .into_iter()
            .map(|(d, (sum, n))| (format_day(d), sum as f64 / n as f64))
            .collect(),
    }
}

/// #10 — the ten most frequent words across all cleaned message texts.
///
/// Counting is case-sensitive; stop-word removal already happened (case
/// insensitively) when `clean_text` was derived. Ties keep first-encounter
/// order.
pub fn common_words(table: &FlatTable) -> Aggregate {
    let mut counts: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in &table.rows {
        for word in row.clean_text.split_whitespace() {
            match index.get(word) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(word.to_string(), counts.len());
                    counts.push((word.to_string(), 1));
                }
            }
        }
    }
    let mut rows = into_sorted_desc(counts);
    rows.truncate(TOP_N);
    Aggregate {
        name: "common_words",
        title: "Top 10 most common words in messages",
        key_label: "word",
        value_label: "count",
        kind: ChartKind::Bar,
        rows,
    }
}

/// #11 — reply count per calendar day.
pub fn reply_patterns(table: &FlatTable) -> Aggregate {
    Aggregate {
        name: "reply_patterns",
        title: "Number of replies over time",
        key_label: "date",
        value_label: "count",
        kind: ChartKind::Line,
        rows: count_by_day(
            table
                .rows
                .iter()
                .filter(|r| r.is_reply())
                .map(|r| r.date_only),
        ),
    }
}

/// #12 — forwarded-message count per calendar day.
pub fn forwarded_messages(table: &FlatTable) -> Aggregate {
    Aggregate {
        name: "forwarded_messages",
        title: "Number of forwarded messages over time",
        key_label: "date",
        value_label: "count",
        kind: ChartKind::Line,
        rows: count_by_day(
            table
                .rows
                .iter()
                .filter(|r| r.is_forwarded())
                .map(|r| r.date_only),
        ),
    }
}

// ============================================================================
// Grouping helpers
// ============================================================================

fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

fn count_by_day(days: impl Iterator<Item = NaiveDate>) -> Vec<(String, f64)> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for day in days {
        *counts.entry(day).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(d, c)| (format_day(d), c as f64))
        .collect()
}

fn count_by_category<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<(String, f64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for value in values {
        let key = value.unwrap_or(ABSENT_BUCKET);
        match index.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key.to_string(), counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }
    into_sorted_desc(counts)
}

/// Sorts count-descending; the stable sort keeps first-encounter order on
/// ties.
fn into_sorted_desc(counts: Vec<(String, u64)>) -> Vec<(String, f64)> {
    let mut counts = counts;
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(k, c)| (k, c as f64)).collect()
}
