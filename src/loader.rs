//! Input loading.
//!
//! Reads an export file from disk and parses it as JSON. The two failure
//! modes callers are expected to recover from are kept distinct:
//!
//! - [`ReportError::InputNotFound`] — the path does not resolve to a file
//! - [`ReportError::MalformedJson`] — the contents are not valid JSON
//!
//! No structural validation happens here; a document without a `messages`
//! key parses fine and fails later in [`Archive::from_value`].
//!
//! [`Archive::from_value`]: crate::archive::Archive::from_value
//! [`ReportError::InputNotFound`]: crate::error::ReportError::InputNotFound
//! [`ReportError::MalformedJson`]: crate::error::ReportError::MalformedJson

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::error::{ReportError, Result};

/// Reads `path` and parses its contents as a JSON document.
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::loader::load;
///
/// let root = load("result.json".as_ref())?;
/// assert!(root.is_object());
/// # Ok::<(), chatlens::ReportError>(())
/// ```
pub fn load(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ReportError::input_not_found(path)
        } else {
            ReportError::Io(e)
        }
    })?;

    serde_json::from_str(&content)
        .map_err(|e| ReportError::malformed_json(e, Some(path.to_path_buf())))
}
