//! Helpers for spreadsheet cells that arrive as arbitrary JSON values.
//!
//! The script serializes whatever the sheet holds, so one column can carry a
//! string in one row, a number in the next, and be missing in a third. These
//! helpers give those cells the same "empty" and "text" meaning everywhere.
//!
//! `None` means the key was absent. `Some(Value::Null)` means the key was
//! present with `null`, which callers that care about "defined" keep apart.

use serde_json::Value;

/// Returns `true` when the cell holds a usable value.
///
/// Absent, `null`, `false`, `0`, and `""` are empty. Whitespace-only strings,
/// arrays, and objects count as values.
#[must_use]
pub fn is_truthy(cell: Option<&Value>) -> bool {
    match cell {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Renders a cell as display text. Absent and `null` cells become `""`.
#[must_use]
pub fn to_text(cell: Option<&Value>) -> String {
    match cell {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Keeps the cell only when it is truthy.
#[must_use]
pub fn truthy(cell: Option<&Value>) -> Option<Value> {
    cell.filter(|v| is_truthy(Some(v))).cloned()
}
