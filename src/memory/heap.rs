//! Recorded heap of one snapshot
//!
//! The heap is a flat arena: objects are stored in recording order and looked
//! up by identifier through a side index. Objects point at each other only
//! through [`Value::Ref`] identifiers, so self-references and longer cycles
//! need no special handling.

use super::value::{HeapId, Value};
use rustc_hash::FxHashMap;

/// A recorded heap object
#[derive(Debug, Clone, PartialEq)]
pub enum HeapObject {
    /// Ordered sequence of values
    Array(Vec<Value>),
    /// Ordered key -> value entries, in insertion order
    Record(Vec<(Value, Value)>),
}

impl HeapObject {
    /// Number of cells (array) or entries (record)
    pub fn len(&self) -> usize {
        match self {
            HeapObject::Array(values) => values.len(),
            HeapObject::Record(entries) => entries.len(),
        }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Heap objects of one snapshot, keyed by identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heap {
    objects: Vec<(HeapId, HeapObject)>,
    index: FxHashMap<HeapId, usize>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object at the end of the display order.
    ///
    /// Identifiers are unique within a snapshot; a duplicate is handed back
    /// as the error.
    pub fn insert(&mut self, id: impl Into<HeapId>, object: HeapObject) -> Result<(), HeapId> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(id);
        }
        self.index.insert(id.clone(), self.objects.len());
        self.objects.push((id, object));
        Ok(())
    }

    /// Look up an object by identifier
    pub fn get(&self, id: &str) -> Option<&HeapObject> {
        self.index.get(id).map(|&i| &self.objects[i].1)
    }

    /// Iterate objects in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeapObject)> {
        self.objects.iter().map(|(id, object)| (id.as_str(), object))
    }

    /// Get the number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
