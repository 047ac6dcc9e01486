/// A scalar value as it can appear in a query response or a view.
///
/// Per the data model, a scalar is any JSON leaf: `null`, a boolean, a
/// number, a string, or an opaque JSON object/array that is treated as an
/// atomic value because nothing in the selection descends into it.
pub type ScalarValue = serde_json::Value;
