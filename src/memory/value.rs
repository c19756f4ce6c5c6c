//! Recorded value representation
//!
//! This module defines the [`Value`] enum, the value stored in frame slots,
//! array cells and record entries of a recorded snapshot.
//!
//! # Value Kinds
//!
//! - [`Value::Int`] / [`Value::Float`]: numbers
//! - [`Value::Str`]: strings
//! - [`Value::Bool`] and [`Value::Null`]
//! - [`Value::Ref`]: a reference to a heap object by identifier
//!
//! References are plain identifiers into the snapshot's [`Heap`](super::heap::Heap).
//! Nothing ever follows them while rendering, so cyclic heaps are harmless.

use std::fmt;

/// Identifier of a heap object within one snapshot
pub type HeapId = String;

/// A recorded value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    Ref(HeapId),
}

impl Value {
    /// Build a reference value
    pub fn reference(id: impl Into<HeapId>) -> Self {
        Value::Ref(id.into())
    }

    /// Text shown for this value in the stack and heap panes.
    ///
    /// Strings are quoted, everything else uses its natural form.
    pub fn display(&self) -> String {
        match self {
            Value::Str(s) => quote(s),
            other => other.to_string(),
        }
    }

    /// Text shown for this value in the key column of a record table
    pub fn key_display(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
            Value::Ref(id) => f.write_str(id),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Wrap a string in double quotes, escaping inner double quotes
pub fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Int(42), "42")]
    #[case(Value::Int(-7), "-7")]
    #[case(Value::Float(1.5), "1.5")]
    #[case(Value::Float(2.0), "2")]
    #[case(Value::Bool(true), "true")]
    #[case(Value::Null, "null")]
    #[case(Value::Str("hello".into()), "\"hello\"")]
    #[case(Value::Str("say \"hi\"".into()), "\"say \\\"hi\\\"\"")]
    #[case(Value::Str(String::new()), "\"\"")]
    #[case(Value::reference("a"), "a")]
    #[case(Value::reference("12"), "12")]
    fn test_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.display(), expected);
    }

    #[test]
    fn test_key_display_leaves_strings_unquoted() {
        assert_eq!(Value::from("k1").key_display(), "k1");
        assert_eq!(Value::Int(3).key_display(), "3");
    }
}
