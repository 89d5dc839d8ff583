//! Integration tests for the full report pipeline.

use chatlens::aggregate::{self, ABSENT_BUCKET, TOP_N};
use chatlens::archive::Archive;
use chatlens::export::{DEFAULT_DELIMITER, to_csv, write_csv};
use chatlens::loader::load;
use chatlens::table::FlatTable;
use chatlens::text::clean_text;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn flatten(messages: serde_json::Value) -> FlatTable {
    let archive = Archive::from_value(json!({ "messages": messages })).unwrap();
    FlatTable::from_archive(archive).unwrap()
}

/// A small but representative chat: two actors, an edit, a reply, a forward,
/// a sticker, and a service message with no `from`.
fn sample_table() -> FlatTable {
    flatten(json!([
        {"id": 1, "type": "message", "date": "2024-03-01T09:15:00", "from": "Alice",
         "text": "Good morning, the coffee machine is fixed!"},
        {"id": 2, "type": "message", "date": "2024-03-01T09:16:30", "from": "Bob",
         "text": "Finally! Coffee time", "reply_to_message_id": 1},
        {"id": 3, "type": "message", "date": "2024-03-01T12:00:00", "from": "Alice",
         "text": "Lunch anyone?", "edited": "2024-03-01T12:05:00"},
        {"id": 4, "type": "service", "date": "2024-03-02T10:00:00",
         "action": "pin_message"},
        {"id": 5, "type": "message", "date": "2024-03-02T18:45:00", "from": "Bob",
         "text": "", "media_type": "sticker"},
        {"id": 6, "type": "message", "date": "2024-03-03T08:30:00", "from": "Alice",
         "text": "Interesting read", "forwarded_from": "Daily News"}
    ]))
}

// ============================================================================
// Pipeline invariants
// ============================================================================

#[test]
fn row_count_equals_message_count() {
    let table = sample_table();
    assert_eq!(table.len(), 6);
}

#[test]
fn unfiltered_aggregate_totals_equal_row_count() {
    let table = sample_table();
    let n = table.len() as f64;

    assert_eq!(aggregate::messages_over_time(&table).total(), n);
    assert_eq!(aggregate::message_types(&table).total(), n);
    assert_eq!(aggregate::media_types(&table).total(), n);
    assert_eq!(aggregate::messages_per_actor(&table).total(), n);
    assert_eq!(aggregate::messages_by_hour(&table).total(), n);
}

#[test]
fn filtered_aggregate_totals_equal_presence_counts() {
    let table = sample_table();
    assert_eq!(aggregate::edited_over_time(&table).total(), 1.0);
    assert_eq!(aggregate::reply_patterns(&table).total(), 1.0);
    assert_eq!(aggregate::forwarded_messages(&table).total(), 1.0);
}

#[test]
fn truncated_aggregates_are_prefixes() {
    // 15 actors with distinct message counts.
    let messages: Vec<_> = (0..15)
        .flat_map(|i| {
            (0..=i).map(move |j| {
                json!({
                    "date": format!("2024-03-{:02}T10:{:02}:00", 1 + (j % 28) / 24, j % 60),
                    "from": format!("actor_{i:02}"),
                    "media_type": format!("kind_{i:02}")
                })
            })
        })
        .collect();
    let table = flatten(json!(messages));

    let top = aggregate::top_actors(&table);
    let full = aggregate::messages_per_actor(&table);
    assert_eq!(top.len(), TOP_N);
    assert_eq!(top.rows[..], full.rows[..TOP_N]);

    let top_media = aggregate::top_media_types(&table);
    let full_media = aggregate::media_types(&table);
    assert_eq!(top_media.len(), TOP_N);
    assert_eq!(top_media.rows[..], full_media.rows[..TOP_N]);

    let words = aggregate::common_words(&table);
    assert!(words.len() <= TOP_N);
}

#[test]
fn csv_round_trip_preserves_rows_and_columns() {
    let table = sample_table();
    let csv = to_csv(&table, DEFAULT_DELIMITER).unwrap();

    let mut reader = csv::ReaderBuilder::new().from_reader(csv.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(headers, table.export_columns());

    let records: Vec<_> = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(records.len(), table.len());
}

// ============================================================================
// Scenario A: empty but valid archive
// ============================================================================

#[test]
fn empty_archive_produces_empty_report() {
    let table = flatten(json!([]));
    assert_eq!(table.len(), 0);

    for agg in aggregate::compute_all(&table) {
        assert!(agg.is_empty(), "{} should be empty", agg.name);
    }

    let dir = tempdir().unwrap();
    let path = dir.path().join("process.csv");
    write_csv(&table, &path, DEFAULT_DELIMITER).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1, "header only");
}

// ============================================================================
// Scenario B: missing input file
// ============================================================================

#[test]
fn missing_input_is_a_recoverable_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let err = load(&path).unwrap_err();
    assert!(err.is_recoverable_load());
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn malformed_input_is_a_recoverable_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ definitely not json").unwrap();
    let err = load(&path).unwrap_err();
    assert!(err.is_recoverable_load());
}

// ============================================================================
// Scenario C: three messages, two actors, nothing else
// ============================================================================

#[test]
fn minimal_two_actor_chat() {
    let table = flatten(json!([
        {"date": "2024-03-01T09:00:00", "from": "A", "text": "x"},
        {"date": "2024-03-01T10:00:00", "from": "A", "text": "y"},
        {"date": "2024-03-01T11:00:00", "from": "B", "text": "z"}
    ]));

    let per_actor = aggregate::messages_per_actor(&table);
    assert_eq!(
        per_actor.rows,
        vec![("A".to_string(), 2.0), ("B".to_string(), 1.0)]
    );

    let media = aggregate::media_types(&table);
    assert_eq!(media.rows, vec![(ABSENT_BUCKET.to_string(), 3.0)]);

    assert!(aggregate::edited_over_time(&table).is_empty());
    assert!(aggregate::reply_patterns(&table).is_empty());
    assert!(aggregate::forwarded_messages(&table).is_empty());
}

// ============================================================================
// Scenario D: word normalization
// ============================================================================

#[test]
fn word_normalization_keeps_case_and_pre_cleaning_length() {
    let table = flatten(json!([
        {"date": "2024-03-01T09:00:00", "text": "Hello, hello WORLD!"}
    ]));
    let row = &table.rows[0];

    let tokens: Vec<&str> = row.clean_text.split_whitespace().collect();
    assert_eq!(tokens, vec!["Hello", "hello", "WORLD"]);
    assert_eq!(row.text_length, "Hello, hello WORLD!".chars().count());
}

#[test]
fn normalization_is_idempotent() {
    let once = clean_text("The quick, brown FOX jumps over the lazy dog!");
    assert_eq!(clean_text(&once), once);
}

// ============================================================================
// Structural failures
// ============================================================================

#[test]
fn missing_messages_key_fails_in_flattener() {
    let err = Archive::from_value(json!({"name": "no messages"})).unwrap_err();
    assert!(err.is_missing_field());
    assert!(!err.is_recoverable_load());
}

#[test]
fn malformed_timestamp_aborts_whole_run() {
    let archive = Archive::from_value(json!({
        "messages": [
            {"date": "2024-03-01T09:00:00", "text": "fine"},
            {"date": "March 1st", "text": "broken"}
        ]
    }))
    .unwrap();
    let err = FlatTable::from_archive(archive).unwrap_err();
    assert!(err.is_malformed_timestamp());
}

// ============================================================================
// Full pipeline against a file on disk
// ============================================================================

#[test]
fn end_to_end_from_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("result.json");
    fs::write(
        &input,
        serde_json::to_string(&json!({
            "name": "Team Chat",
            "messages": [
                {"id": 1, "type": "message", "date": "2024-03-01T09:15:00",
                 "from": "Alice", "text": "ship it"},
                {"id": 2, "type": "message", "date": "2024-03-01T09:16:00",
                 "from": "Bob", "text": ["see ", {"type": "link", "text": "https://example.com"}]}
            ]
        }))
        .unwrap(),
    )
    .unwrap();

    let root = load(&input).unwrap();
    let table = FlatTable::from_archive(Archive::from_value(root).unwrap()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[1].text, "see https://example.com");

    let aggregates = aggregate::compute_all(&table);
    assert_eq!(aggregates.len(), 12);

    let out = dir.path().join("graphs");
    let failures = chatlens::render::render_all(&aggregates, &out).unwrap();
    assert!(out.is_dir());
    // Chart failures (e.g. no system fonts) are soft; anything else is a bug.
    assert!(failures.iter().all(chatlens::ReportError::is_chart));

    let csv_path = out.join("process.csv");
    write_csv(&table, &csv_path, DEFAULT_DELIMITER).unwrap();
    assert!(csv_path.is_file());
}
