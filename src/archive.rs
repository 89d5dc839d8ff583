//! The parsed export document.
//!
//! Telegram Desktop exports a chat as a single JSON object:
//!
//! ```json
//! {
//!   "name": "Chat Name",
//!   "messages": [
//!     {
//!       "id": 12345,
//!       "type": "message",
//!       "date": "2024-01-15T10:30:00",
//!       "from": "Sender Name",
//!       "text": "Hello" | ["Hello ", {"type": "link", "text": "url"}],
//!       "edited": "2024-01-15T10:35:00",
//!       "media_type": "sticker",
//!       "reply_to_message_id": 12344,
//!       "forwarded_from": "Another Chat"
//!     }
//!   ]
//! }
//! ```
//!
//! [`Archive`] keeps the messages as raw JSON objects in document order so
//! the flattener can both build typed rows and reproduce the union of
//! observed keys for the tabular export.

use serde_json::{Map, Value};

use crate::error::{ReportError, Result};

/// The top-level parsed export: an ordered sequence of raw message objects.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    /// One JSON object per message, in document order.
    pub messages: Vec<Map<String, Value>>,
}

impl Archive {
    /// Extracts the `messages` sequence from a parsed JSON document.
    ///
    /// Fails with [`ReportError::MissingField`] when the document has no
    /// `messages` key, and [`ReportError::InvalidFormat`] when the key holds
    /// anything other than an array of objects.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::archive::Archive;
    ///
    /// let root = serde_json::json!({"messages": [{"date": "2024-01-15T10:30:00"}]});
    /// let archive = Archive::from_value(root)?;
    /// assert_eq!(archive.len(), 1);
    /// # Ok::<(), chatlens::ReportError>(())
    /// ```
    pub fn from_value(root: Value) -> Result<Self> {
        let Value::Object(mut doc) = root else {
            return Err(ReportError::missing_field("messages"));
        };

        let Some(messages) = doc.remove("messages") else {
            return Err(ReportError::missing_field("messages"));
        };

        let Value::Array(items) = messages else {
            return Err(ReportError::invalid_format("`messages` is not an array"));
        };

        let messages = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(obj) => Ok(obj),
                other => Err(ReportError::invalid_format(format!(
                    "message #{i} is not an object (found {})",
                    kind_name(&other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { messages })
    }

    /// Number of messages in the export.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the export holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Coerces a message `text` value to its string form.
///
/// The field can be:
/// - A simple string: `"Hello"`
/// - A rich-text array mixing strings and entity objects:
///   `["Text ", {"type": "link", "text": "url"}]` — fragments concatenate
/// - Absent or anything else: empty string
pub fn text_content(text_value: &Value) -> String {
    match text_value {
        Value::String(s) => s.clone(),
        Value::Array(arr) => arr
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => obj
                    .get("text")
                    .and_then(|v| v.as_str())
                    .map(ToString::to_string),
                _ => None,
            })
            .collect::<String>(),
        _ => String::new(),
    }
}

/// Short human name of a JSON value kind, for diagnostics.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_extracts_messages() {
        let root = json!({
            "name": "Test Chat",
            "messages": [
                {"id": 1, "date": "2024-01-15T10:30:00", "from": "Alice", "text": "Hello!"},
                {"id": 2, "date": "2024-01-15T10:31:00", "from": "Bob", "text": "Hi!"}
            ]
        });
        let archive = Archive::from_value(root).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.messages[0]["from"], json!("Alice"));
    }

    #[test]
    fn test_from_value_empty_messages() {
        let archive = Archive::from_value(json!({"messages": []})).unwrap();
        assert!(archive.is_empty());
    }

    #[test]
    fn test_from_value_missing_messages() {
        let err = Archive::from_value(json!({"name": "No messages here"})).unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_from_value_non_object_root() {
        let err = Archive::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_from_value_messages_not_array() {
        let err = Archive::from_value(json!({"messages": "oops"})).unwrap_err();
        assert!(err.to_string().contains("not an array"));
    }

    #[test]
    fn test_from_value_message_not_object() {
        let err = Archive::from_value(json!({"messages": [42]})).unwrap_err();
        assert!(err.to_string().contains("message #0"));
    }

    #[test]
    fn test_text_content_string() {
        assert_eq!(text_content(&json!("Hello world")), "Hello world");
    }

    #[test]
    fn test_text_content_rich_array() {
        let value = json!([
            "Check this: ",
            {"type": "link", "text": "https://example.com"},
            " cool!"
        ]);
        assert_eq!(text_content(&value), "Check this: https://example.com cool!");
    }

    #[test]
    fn test_text_content_other_kinds() {
        assert_eq!(text_content(&json!(null)), "");
        assert_eq!(text_content(&json!(42)), "");
        assert_eq!(text_content(&json!({"no": "text"})), "");
    }
}
