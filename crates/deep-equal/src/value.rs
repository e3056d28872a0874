//! The closed set of values the comparator walks.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use indexmap::IndexMap;
#[cfg(feature = "ndarray")]
use ndarray::{Array1, Array2, ArrayD};

/// A comparison operand.
///
/// The derived [`PartialEq`] is exact structural equality (`NaN != NaN`,
/// set order matters). Use [`crate::deep_equal`] for the tolerance-aware
/// comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Opaque binary blob, compared byte for byte.
    Bytes(Vec<u8>),
    List(Vec<Value>),
    /// Keys match exactly: `Key::Int(1)` and `Key::Str("1")` are different.
    Map(IndexMap<Key, Value>),
    /// Unordered elements. Build with [`Value::set`] to drop duplicates.
    Set(Vec<Value>),
    /// Fixed-shape numeric array.
    #[cfg(feature = "ndarray")]
    Array(ArrayD<f64>),
}

/// Hashable map key.
///
/// Floats are not valid keys. `Bool` keys never match `Int` keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    None,
    Bool(bool),
    Int(i64),
    Str(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Key>),
}

impl Key {
    /// Builds a [`Key::Tuple`].
    pub fn tuple<I, K>(items: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Key::Tuple(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Key::Str(v.to_owned())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Key::Str(v)
    }
}

impl From<bool> for Key {
    fn from(v: bool) -> Self {
        Key::Bool(v)
    }
}

macro_rules! key_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(v: $ty) -> Self {
                    Key::Int(i64::from(v))
                }
            }
        )*
    };
}

key_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Variant tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    None,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    List,
    Map,
    Set,
    Array,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::None => "none",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "str",
            Kind::Bytes => "bytes",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Set => "set",
            Kind::Array => "array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Builds a [`Value::List`] from anything convertible.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a [`Value::Map`]. A repeated key keeps the last value.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a [`Value::Set`], skipping elements equal to one already
    /// present. An int and a float of the same value count as one element,
    /// so `{1, 1.0}` has a single member. Booleans stay distinct from ints.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if !out.iter().any(|member| same_member(member, &item)) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::None => Kind::None,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Bytes(_) => Kind::Bytes,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Set(_) => Kind::Set,
            #[cfg(feature = "ndarray")]
            Value::Array(_) => Kind::Array,
        }
    }

    /// True for a float scalar holding NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Float(f) if f.is_nan())
    }

    /// True for integer and float scalars. Booleans are not numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

fn same_member(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => *i as f64 == *f,
        _ => a == b,
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! from_lossless_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                /// Values outside the `i64` range become floats.
                fn from(v: $ty) -> Self {
                    match i64::try_from(v) {
                        Ok(i) => Value::Int(i),
                        Err(_) => Value::Float(v as f64),
                    }
                }
            }
        )*
    };
}

from_wide_int!(u64, usize, isize, i128, u128);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::list(v)
    }
}

impl<K: Into<Key>, T: Into<Value>> From<IndexMap<K, T>> for Value {
    fn from(v: IndexMap<K, T>) -> Self {
        Value::map(v)
    }
}

impl<K: Into<Key>, T: Into<Value>> From<BTreeMap<K, T>> for Value {
    fn from(v: BTreeMap<K, T>) -> Self {
        Value::map(v)
    }
}

impl<K: Into<Key>, T: Into<Value>, S> From<HashMap<K, T, S>> for Value {
    fn from(v: HashMap<K, T, S>) -> Self {
        Value::map(v)
    }
}

impl<T: Into<Value>, S> From<HashSet<T, S>> for Value {
    fn from(v: HashSet<T, S>) -> Self {
        Value::set(v)
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(v: BTreeSet<T>) -> Self {
        Value::set(v)
    }
}

#[cfg(feature = "ndarray")]
impl From<ArrayD<f64>> for Value {
    fn from(v: ArrayD<f64>) -> Self {
        Value::Array(v)
    }
}

#[cfg(feature = "ndarray")]
impl From<Array1<f64>> for Value {
    fn from(v: Array1<f64>) -> Self {
        Value::Array(v.into_dyn())
    }
}

#[cfg(feature = "ndarray")]
impl From<Array2<f64>> for Value {
    fn from(v: Array2<f64>) -> Self {
        Value::Array(v.into_dyn())
    }
}
