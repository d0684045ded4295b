//! The closed value model stored in a sequence file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One element of a stored sequence.
///
/// The JSON mapping is untagged: `Int` and `Float` are told apart by whether
/// the number literal carries a fractional part or exponent, and integers that
/// overflow `i64` decode as `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

/// The ordered collection persisted in one file.
pub type Sequence = Vec<Value>;

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns true when the value, or any value nested in it, is a NaN or
    /// infinite float. Those have no JSON representation.
    #[must_use]
    pub fn contains_non_finite(&self) -> bool {
        let mut pending = vec![self];
        while let Some(value) = pending.pop() {
            match value {
                Self::Float(value) if !value.is_finite() => return true,
                Self::List(items) => pending.extend(items),
                Self::Map(entries) => pending.extend(entries.values()),
                _ => {}
            }
        }
        false
    }

    /// Number of containers (lists and maps) on the deepest path through the
    /// value. Scalars have depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((value, depth)) = pending.pop() {
            match value {
                Self::List(items) => pending.extend(items.iter().map(|item| (item, depth + 1))),
                Self::Map(entries) => {
                    pending.extend(entries.values().map(|item| (item, depth + 1)))
                }
                _ => {}
            }
            deepest = deepest.max(match value {
                Self::List(_) | Self::Map(_) => depth + 1,
                _ => depth,
            });
        }
        deepest
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
