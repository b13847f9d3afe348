//! Structural diff between two JSON object documents.
//!
//! Audit records carry the field-level changes between an entity's stored
//! state and its new state. Both states arrive as JSON documents; this module
//! decodes them into [`serde_json::Value`] trees and walks the `before` tree
//! looking for keys that disappeared or leaves whose values changed.
//!
//! The scan is one-directional: keys that only exist in `after` are not
//! reported, and a key holding an object on one side and a scalar on the
//! other is skipped. Both behaviours are pinned by the tests below.
//!
//! Decoding never fails. A malformed document, or one whose top level is not
//! an object, is treated as an empty object so that writing an audit can
//! never be blocked by the diff.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::{Map, Value};

/// The kind of change recorded for a single field path.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    /// The key existed in `before` and is missing from `after`.
    Removed,
    /// Both documents hold a leaf at this path and the values differ.
    Changed { before: Value, after: Value },
}

/// One field-level difference.
///
/// Serialises as `{"key": …, "before": …, "after": …}`. Removed fields carry
/// `null` for both values.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDiff {
    path: String,
    change: FieldChange,
}

impl FieldDiff {
    /// A field present in `before` and absent from `after`.
    pub fn removed(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            change: FieldChange::Removed,
        }
    }

    /// A leaf whose value changed.
    pub fn changed(path: impl Into<String>, before: Value, after: Value) -> Self {
        Self {
            path: path.into(),
            change: FieldChange::Changed { before, after },
        }
    }

    /// Dotted path of the field, e.g. `details.city`.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// What happened to the field.
    pub fn change(&self) -> &FieldChange {
        &self.change
    }

    /// Rendered key used for ordering and serialisation.
    ///
    /// ```
    /// use verdure_admin::domain::FieldDiff;
    /// use serde_json::json;
    ///
    /// assert_eq!(FieldDiff::removed("hint").key(), "'hint' removed");
    /// assert_eq!(FieldDiff::changed("pos", json!("noun"), json!("verb")).key(), "'pos'");
    /// ```
    pub fn key(&self) -> String {
        match self.change {
            FieldChange::Removed => format!("'{}' removed", self.path),
            FieldChange::Changed { .. } => format!("'{}'", self.path),
        }
    }

    /// Value before the change, when one is recorded.
    pub fn before(&self) -> Option<&Value> {
        match &self.change {
            FieldChange::Removed => None,
            FieldChange::Changed { before, .. } => Some(before),
        }
    }

    /// Value after the change, when one is recorded.
    pub fn after(&self) -> Option<&Value> {
        match &self.change {
            FieldChange::Removed => None,
            FieldChange::Changed { after, .. } => Some(after),
        }
    }
}

impl Serialize for FieldDiff {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("FieldDiff", 3)?;
        state.serialize_field("key", &self.key())?;
        state.serialize_field("before", &self.before())?;
        state.serialize_field("after", &self.after())?;
        state.end()
    }
}

/// Compare two JSON documents and return their differences sorted by key.
///
/// # Examples
/// ```
/// use verdure_admin::domain::compare;
///
/// let diffs = compare(r#"{"hint":"A hint"}"#, r#"{"hint":""}"#);
/// assert_eq!(diffs.len(), 1);
/// assert_eq!(diffs[0].key(), "'hint'");
/// ```
pub fn compare(before_json: &str, after_json: &str) -> Vec<FieldDiff> {
    let before = decode_object(before_json);
    let after = decode_object(after_json);

    let mut diffs = Vec::new();
    collect_diffs(&before, &after, "", &mut diffs);
    diffs.sort_by_cached_key(FieldDiff::key);
    diffs
}

/// Compare two JSON documents and serialise the result as a JSON array.
///
/// Identical documents produce `[]`.
pub fn compare_to_string(before_json: &str, after_json: &str) -> String {
    let diffs = compare(before_json, after_json);
    // Values decoded from JSON always re-encode.
    serde_json::to_string(&diffs).unwrap_or_else(|_| String::from("[]"))
}

fn decode_object(document: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(document) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn collect_diffs(
    before: &Map<String, Value>,
    after: &Map<String, Value>,
    prefix: &str,
    diffs: &mut Vec<FieldDiff>,
) {
    for (key, before_value) in before {
        let path = format!("{prefix}{key}");
        let Some(after_value) = after.get(key) else {
            diffs.push(FieldDiff::removed(path));
            continue;
        };

        match (before_value, after_value) {
            (Value::Object(before_child), Value::Object(after_child)) => {
                collect_diffs(before_child, after_child, &format!("{path}."), diffs);
            }
            (Value::Object(_), _) | (_, Value::Object(_)) => {}
            _ => {
                if !values_equal(before_value, after_value) {
                    diffs.push(FieldDiff::changed(
                        path,
                        before_value.clone(),
                        after_value.clone(),
                    ));
                }
            }
        }
    }
}

/// Deep equality where numbers compare by value, so `1` equals `1.0`.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_f64(), r.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => l == r,
        },
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(l, r)| values_equal(l, r))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l
                    .iter()
                    .all(|(key, value)| r.get(key).is_some_and(|other| values_equal(value, other)))
        }
        _ => left == right,
    }
}
