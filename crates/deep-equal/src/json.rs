//! Conversions between [`serde_json::Value`] and [`Value`].

use serde_json::{Map, Number, Value as JsonValue};

use crate::error::DeepEqualError;
use crate::tolerance::Tolerance;
use crate::value::{Key, Value};
use crate::Comparator;

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::None,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => from_number(n),
            JsonValue::String(s) => Value::Str(s.clone()),
            JsonValue::Array(items) => Value::List(items.iter().map(Value::from).collect()),
            JsonValue::Object(obj) => Value::Map(
                obj.iter()
                    .map(|(k, v)| (Key::Str(k.clone()), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::None,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => from_number(&n),
            JsonValue::String(s) => Value::Str(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Key::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

fn from_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return Value::Int(i);
    }
    match n.as_f64() {
        Some(f) => Value::Float(f),
        // Only reachable with serde_json's arbitrary_precision.
        None => Value::Str(n.to_string()),
    }
}

impl TryFrom<Value> for JsonValue {
    type Error = DeepEqualError;

    /// Fails on NaN and infinities, which JSON cannot carry.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::None => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Int(i) => JsonValue::Number(i.into()),
            Value::Float(f) => float_to_json(f)?,
            Value::Str(s) => JsonValue::String(s),
            Value::Bytes(bytes) => {
                JsonValue::Array(bytes.into_iter().map(JsonValue::from).collect())
            }
            Value::List(items) | Value::Set(items) => JsonValue::Array(
                items
                    .into_iter()
                    .map(JsonValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(entries) => {
                let mut obj = Map::new();
                for (k, v) in entries {
                    obj.insert(key_to_json(k)?, JsonValue::try_from(v)?);
                }
                JsonValue::Object(obj)
            }
            #[cfg(feature = "ndarray")]
            Value::Array(array) => array_to_json(array.view())?,
        })
    }
}

/// Scalar keys become their JSON spelling (`1`, `true`, `null`); bytes and
/// tuple keys have none.
fn key_to_json(key: Key) -> Result<String, DeepEqualError> {
    match key {
        Key::Str(s) => Ok(s),
        Key::Int(i) => Ok(i.to_string()),
        Key::Bool(b) => Ok(b.to_string()),
        Key::None => Ok("null".to_owned()),
        other @ (Key::Bytes(_) | Key::Tuple(_)) => Err(DeepEqualError::UnsupportedKey(other)),
    }
}

fn float_to_json(f: f64) -> Result<JsonValue, DeepEqualError> {
    Number::from_f64(f)
        .map(JsonValue::Number)
        .ok_or(DeepEqualError::NonFiniteFloat(f))
}

#[cfg(feature = "ndarray")]
fn array_to_json(array: ndarray::ArrayViewD<'_, f64>) -> Result<JsonValue, DeepEqualError> {
    if array.ndim() == 0 {
        return match array.iter().next() {
            Some(&f) => float_to_json(f),
            None => Ok(JsonValue::Null),
        };
    }
    Ok(JsonValue::Array(
        array
            .outer_iter()
            .map(array_to_json)
            .collect::<Result<_, _>>()?,
    ))
}

/// [`crate::deep_equal`] over two JSON documents.
///
/// Unlike exact JSON equality, `1` and `1.0` compare equal here.
///
/// ```
/// use bcb_deep_equal::deep_equal_json;
/// use serde_json::json;
///
/// let actual = json!({"total": 0.1 + 0.2, "items": [1, 2]});
/// let expected = json!({"items": [1, 2], "total": 0.3});
/// assert!(deep_equal_json(&actual, &expected, 1e-9, 1e-9));
/// ```
pub fn deep_equal_json(a: &JsonValue, b: &JsonValue, rel_tol: f64, abs_tol: f64) -> bool {
    Comparator::new(Tolerance::from_raw(rel_tol, abs_tol)).equal(&Value::from(a), &Value::from(b))
}
