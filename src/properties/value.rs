//! Property values and per-key entries

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single typed property value.
///
/// Values read from a text stream are always strings. Callers may store
/// other scalar types directly; those are kept as-is and are rendered to
/// text only by [`get_property`](super::ExtendedProperties::get_property)
/// and by `save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl PropertyValue {
    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, PropertyValue::String(_))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Int(i) => write!(f, "{}", i),
            PropertyValue::Float(x) => write!(f, "{}", x),
            PropertyValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(i64::from(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

/// All values stored under one key.
///
/// A key holding one value stays a `Single`; adding a second value turns
/// it into a `List`. A `List` always holds at least two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Single(PropertyValue),
    List(Vec<PropertyValue>),
}

impl Entry {
    /// Appends a value, promoting a `Single` to a `List`.
    pub fn push(&mut self, value: PropertyValue) {
        match self {
            Entry::List(values) => values.push(value),
            Entry::Single(_) => {
                if let Entry::Single(first) = std::mem::replace(self, Entry::List(Vec::new())) {
                    *self = Entry::List(vec![first, value]);
                }
            }
        }
    }

    /// The first value stored under the key.
    pub fn first(&self) -> Option<&PropertyValue> {
        match self {
            Entry::Single(value) => Some(value),
            Entry::List(values) => values.first(),
        }
    }

    /// All values in insertion order.
    pub fn values(&self) -> &[PropertyValue] {
        match self {
            Entry::Single(value) => std::slice::from_ref(value),
            Entry::List(values) => values,
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Always `false`: an entry exists only while it holds a value.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Conversion from a stored value into a typed result.
///
/// Implemented for the types the typed accessors of
/// [`ExtendedProperties`](super::ExtendedProperties) return. String values
/// are parsed; typed values convert when the conversion is lossless.
pub trait FromPropertyValue: Sized {
    /// Human readable name of the target type, used in conversion errors.
    const EXPECTED: &'static str;

    /// Converts `value`, returning `None` if it cannot be represented.
    fn from_property_value(value: &PropertyValue) -> Option<Self>;

    /// Converts `value` stored under `key`, reporting failures as
    /// [`Error::Conversion`].
    fn convert(key: &str, value: &PropertyValue) -> Result<Self> {
        Self::from_property_value(value).ok_or_else(|| Error::Conversion {
            key: key.to_string(),
            expected: Self::EXPECTED,
            value: value.to_string(),
        })
    }
}

/// Interprets `true`/`on`/`yes` and `false`/`off`/`no`, ignoring case.
pub fn test_boolean(value: &str) -> Option<bool> {
    let value = value.trim();
    if ["true", "on", "yes"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
    {
        Some(true)
    } else if ["false", "off", "no"]
        .iter()
        .any(|f| value.eq_ignore_ascii_case(f))
    {
        Some(false)
    } else {
        None
    }
}

impl FromPropertyValue for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Bool(b) => Some(*b),
            PropertyValue::String(s) => test_boolean(s),
            _ => None,
        }
    }
}

impl FromPropertyValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        Some(value.to_string())
    }
}

macro_rules! integer_from_property_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FromPropertyValue for $ty {
                const EXPECTED: &'static str = $name;

                fn from_property_value(value: &PropertyValue) -> Option<Self> {
                    match value {
                        PropertyValue::Int(i) => <$ty>::try_from(*i).ok(),
                        PropertyValue::String(s) => s.trim().parse().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

integer_from_property_value! {
    i8 => "an i8",
    i16 => "an i16",
    i32 => "an i32",
    i64 => "an i64",
    u16 => "a u16",
    u32 => "a u32",
    u64 => "a u64",
}

impl FromPropertyValue for f64 {
    const EXPECTED: &'static str = "an f64";

    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Float(x) => Some(*x),
            PropertyValue::Int(i) => Some(*i as f64),
            PropertyValue::String(s) => s.trim().parse().ok(),
            PropertyValue::Bool(_) => None,
        }
    }
}

impl FromPropertyValue for f32 {
    const EXPECTED: &'static str = "an f32";

    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Float(x) => Some(*x as f32),
            PropertyValue::Int(i) => Some(*i as f32),
            PropertyValue::String(s) => s.trim().parse().ok(),
            PropertyValue::Bool(_) => None,
        }
    }
}
