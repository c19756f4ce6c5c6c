//! History file loading
//!
//! The history is a JSON array with one object per step:
//!
//! ```text
//! [{"line": 2,
//!   "stack": [{"funName": "f", "parameters": {"x": 1}, "variables": {"y": 2}}],
//!   "heap": {"a": [1, 2, 3], "r": {"k": "v", "me": {"$ref": "r"}}}}]
//! ```
//!
//! Object key order is kept as written. A heap object is a JSON array
//! (array object), a JSON object (record with string keys), or
//! `{"$entries": [[key, value], ...]}` for a record with non-string keys.
//! Values are JSON primitives or `{"$ref": id}` references.

use super::{split_lines, Snapshot, Trace};
use crate::errors::LoadError;
use crate::memory::{Frame, Heap, HeapObject, Stack, Value};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Number;
use std::fmt;
use tracing::info;

const REF_KEY: &str = "$ref";
const ENTRIES_KEY: &str = "$entries";

/// JSON object members exactly as written: order kept, repeated keys kept
#[derive(Debug, Default)]
struct Entries(Vec<(String, Raw)>);

/// A JSON value whose objects are [`Entries`] rather than a map
#[derive(Debug)]
enum Raw {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Raw>),
    Object(Entries),
}

impl Raw {
    fn kind(&self) -> &'static str {
        match self {
            Raw::Null => "null",
            Raw::Bool(_) => "a boolean",
            Raw::Number(_) => "a number",
            Raw::String(_) => "a string",
            Raw::Array(_) => "an array",
            Raw::Object(_) => "an object",
        }
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = Entries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Entries, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Raw>()? {
            entries.push((key, value));
        }
        Ok(Entries(entries))
    }
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

struct RawVisitor;

impl<'de> Visitor<'de> for RawVisitor {
    type Value = Raw;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Raw, E> {
        Ok(Raw::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Raw, E> {
        Ok(Raw::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Raw, D::Error> {
        Raw::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Raw, E> {
        Ok(Raw::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Raw, E> {
        Ok(Raw::Number(n.into()))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Raw, E> {
        Ok(Raw::Number(n.into()))
    }

    fn visit_f64<E: de::Error>(self, x: f64) -> Result<Raw, E> {
        Number::from_f64(x)
            .map(Raw::Number)
            .ok_or_else(|| E::custom(format!("unrepresentable number {}", x)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Raw, E> {
        Ok(Raw::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Raw, E> {
        Ok(Raw::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Raw, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Raw>()? {
            items.push(item);
        }
        Ok(Raw::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Raw, A::Error> {
        EntriesVisitor.visit_map(map).map(Raw::Object)
    }
}

impl<'de> Deserialize<'de> for Raw {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawVisitor)
    }
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    line: usize,
    #[serde(default)]
    stack: Vec<RawFrame>,
    #[serde(default)]
    heap: Entries,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrame {
    fun_name: String,
    #[serde(default)]
    parameters: Entries,
    #[serde(default)]
    variables: Entries,
}

/// Parse a history file recorded for `source` into a [`Trace`].
///
/// Any mismatch with the expected layout fails the whole load.
pub fn load(source: &str, history: &str) -> Result<Trace, LoadError> {
    let source_lines = split_lines(source);
    let raw: Vec<RawSnapshot> = serde_json::from_str(history)?;

    let snapshots = raw
        .into_iter()
        .enumerate()
        .map(|(i, snapshot)| convert_snapshot(i + 1, snapshot, source_lines.len()))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        steps = snapshots.len(),
        source_lines = source_lines.len(),
        "loaded trace"
    );
    Ok(Trace::new(source_lines, snapshots))
}

fn convert_snapshot(step: usize, raw: RawSnapshot, line_count: usize) -> Result<Snapshot, LoadError> {
    if raw.line == 0 || raw.line > line_count {
        return Err(LoadError::InvalidLine {
            step,
            line: raw.line,
            line_count,
        });
    }

    let stack = raw
        .stack
        .into_iter()
        .map(|frame| convert_frame(step, frame))
        .collect::<Result<Stack, _>>()?;

    let mut heap = Heap::new();
    for (id, object) in raw.heap.0 {
        let object = convert_object(step, &id, object)?;
        heap.insert(id, object)
            .map_err(|id| LoadError::DuplicateHeapId { step, id })?;
    }

    Ok(Snapshot {
        line: raw.line,
        stack,
        heap,
    })
}

/// First key that appears earlier in `entries` too
fn first_duplicate<K: PartialEq, V>(entries: &[(K, V)]) -> Option<&K> {
    entries
        .iter()
        .enumerate()
        .find(|(i, (key, _))| entries[..*i].iter().any(|(earlier, _)| earlier == key))
        .map(|(_, (key, _))| key)
}

fn duplicate_key(step: usize, context: String, key: String) -> LoadError {
    LoadError::DuplicateKey { step, context, key }
}

fn convert_frame(step: usize, raw: RawFrame) -> Result<Frame, LoadError> {
    let convert_slots = |slots: Entries, kind: &str| -> Result<Vec<(String, Value)>, LoadError> {
        let slots = slots
            .0
            .into_iter()
            .map(|(name, value)| {
                let what = format!("{} '{}' of {}", kind, name, raw.fun_name);
                convert_value(step, &what, value).map(|value| (name, value))
            })
            .collect::<Result<Vec<_>, _>>()?;
        match first_duplicate(&slots) {
            Some(name) => Err(duplicate_key(
                step,
                format!("{}s of {}", kind, raw.fun_name),
                name.clone(),
            )),
            None => Ok(slots),
        }
    };

    let parameters = convert_slots(raw.parameters, "parameter")?;
    let variables = convert_slots(raw.variables, "variable")?;

    Ok(Frame {
        fun_name: raw.fun_name,
        parameters,
        variables,
    })
}

fn convert_object(step: usize, id: &str, raw: Raw) -> Result<HeapObject, LoadError> {
    let what = format!("heap object '{}'", id);
    let entries = match raw {
        Raw::Array(items) => {
            return items
                .into_iter()
                .map(|item| convert_value(step, &what, item))
                .collect::<Result<Vec<_>, _>>()
                .map(HeapObject::Array);
        }
        Raw::Object(Entries(mut members)) if members.len() == 1 && members[0].0 == ENTRIES_KEY => {
            match members.pop() {
                Some((_, Raw::Array(pairs))) => pairs
                    .into_iter()
                    .map(|pair| convert_entry(step, &what, pair))
                    .collect::<Result<Vec<_>, _>>()?,
                _ => return Err(shape(step, format!("{}: {} must be an array", what, ENTRIES_KEY))),
            }
        }
        Raw::Object(Entries(members)) => members
            .into_iter()
            .map(|(key, value)| {
                convert_value(step, &what, value).map(|value| (Value::Str(key), value))
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(shape(
                step,
                format!("{} must be an array or an object, got {}", what, other.kind()),
            ));
        }
    };

    if let Some(key) = first_duplicate(&entries) {
        return Err(duplicate_key(step, what, key.key_display()));
    }
    Ok(HeapObject::Record(entries))
}

fn convert_entry(step: usize, what: &str, raw: Raw) -> Result<(Value, Value), LoadError> {
    match raw {
        Raw::Array(pair) if pair.len() == 2 => {
            let mut pair = pair.into_iter();
            match (pair.next(), pair.next()) {
                (Some(key), Some(value)) => Ok((
                    convert_value(step, what, key)?,
                    convert_value(step, what, value)?,
                )),
                _ => Err(shape(step, format!("{}: malformed entry", what))),
            }
        }
        other => Err(shape(
            step,
            format!("{}: entry must be a [key, value] pair, got {}", what, other.kind()),
        )),
    }
}

fn convert_value(step: usize, what: &str, raw: Raw) -> Result<Value, LoadError> {
    match raw {
        Raw::Null => Ok(Value::Null),
        Raw::Bool(b) => Ok(Value::Bool(b)),
        Raw::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Int(i)),
            None => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| shape(step, format!("{}: unrepresentable number {}", what, n))),
        },
        Raw::String(s) => Ok(Value::Str(s)),
        Raw::Object(Entries(mut members)) if members.len() == 1 && members[0].0 == REF_KEY => {
            match members.pop() {
                Some((_, Raw::String(id))) => Ok(Value::Ref(id)),
                Some((_, Raw::Number(id))) => Ok(Value::Ref(id.to_string())),
                _ => Err(shape(
                    step,
                    format!("{}: {} must be a string or a number", what, REF_KEY),
                )),
            }
        }
        other => Err(shape(
            step,
            format!("{}: expected a primitive or a reference, got {}", what, other.kind()),
        )),
    }
}

fn shape(step: usize, message: String) -> LoadError {
    LoadError::Shape { step, message }
}
