//! Recorded execution trace
//!
//! A [`Trace`] is the ordered list of [`Snapshot`]s read from a history file,
//! together with the lines of the source it was recorded from. It is built
//! once by [`load`] and never mutated afterwards.

mod load;

pub use load::load;

use crate::memory::{heap::Heap, stack::Stack};

/// Observable program state at one recorded step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Source line of the program counter (1-based)
    pub line: usize,
    pub stack: Stack,
    pub heap: Heap,
}

impl Snapshot {
    pub fn new(line: usize) -> Self {
        Snapshot {
            line,
            ..Default::default()
        }
    }
}

/// The full recording: source lines plus one snapshot per step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    source_lines: Vec<String>,
    snapshots: Vec<Snapshot>,
}

impl Trace {
    pub fn new(source_lines: Vec<String>, snapshots: Vec<Snapshot>) -> Self {
        Trace {
            source_lines,
            snapshots,
        }
    }

    /// Build a trace from source text, splitting it into lines
    pub fn from_source(source: &str, snapshots: Vec<Snapshot>) -> Self {
        Self::new(split_lines(source), snapshots)
    }

    /// Lines of the traced source
    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Split source text on `\n`, dropping a trailing `\r` from each line.
///
/// A final newline yields a final empty line, which counts toward the
/// line-number gutter.
pub(crate) fn split_lines(source: &str) -> Vec<String> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn test_trace_accessors() {
        let trace = Trace::from_source("x = 1\ny = 2", vec![Snapshot::new(1), Snapshot::new(2)]);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.source_lines().len(), 2);
        assert_eq!(trace.get(1).map(|s| s.line), Some(2));
        assert!(trace.get(2).is_none());
        assert!(Trace::default().is_empty());
    }
}
