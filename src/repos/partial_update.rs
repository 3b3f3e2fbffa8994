//! `SET` clause builder for partial updates.
//!
//! Turns a sparse JSON object such as `{"firstName": "Aliya", "age": 32}` into
//!
//! ```text
//! set_cols = "first_name"=$1, "age"=$2
//! values   = ["Aliya", 32]
//! ```
//!
//! Values only ever travel through `values`; the clause holds column names and
//! positional placeholders and nothing else.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartialUpdateError {
    #[error("No data")]
    NoData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    pub set_cols: String,
    pub values: Vec<Value>,
}

impl PartialUpdate {
    /// First placeholder index free for the caller (e.g. the `WHERE` key).
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build the `SET` fragment for `data`, in insertion order.
///
/// `js_to_sql` maps request field names to column names; fields missing from it
/// are used verbatim.
pub fn sql_for_partial_update(
    data: &Map<String, Value>,
    js_to_sql: &[(&str, &str)],
) -> Result<PartialUpdate, PartialUpdateError> {
    if data.is_empty() {
        return Err(PartialUpdateError::NoData);
    }

    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());

    for (idx, (field, value)) in data.iter().enumerate() {
        let column = js_to_sql
            .iter()
            .find(|(js, _)| *js == field.as_str())
            .map(|(_, sql)| *sql)
            .unwrap_or(field.as_str());

        cols.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value.clone());
    }

    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}
