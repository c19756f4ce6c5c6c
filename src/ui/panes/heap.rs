//! Heap pane: box-drawn tables for array and record objects
//!
//! Objects are stacked top to bottom in recording order. Each object is a
//! self-contained block labeled `&<id>`:
//!
//! ```text
//! &a┌─┬─┬─┐        &r┌──┬───────┐
//!   │1│2│3│          │k1│"hello"│
//!   └─┴─┴─┘          ├──┼───────┤
//!                    │k2│42     │
//!                    └──┴───────┘
//! ```
//!
//! Array borders have one dash per cell and rows after the labeled first
//! one always start two columns in, as in the picture above.
//!
//! Rather than diffing against the previous snapshot, every row is padded to
//! the pane width and the rows below the last object are blanked, so a
//! redraw always covers whatever the previous heap left behind. Rows wider
//! than the pane are cut at its edge; objects below the last pane row are not
//! shown.

use super::utils::{cell_width, fit, pad_end};
use crate::memory::{heap::Heap, heap::HeapObject, value::Value};
use crate::ui::screen::Screen;
use std::io;

/// Geometry of the heap pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapPaneArea {
    pub column: usize,
    pub top_row: usize,
    pub last_row: usize,
    /// Cells every row is padded and clipped to
    pub width: usize,
}

/// Lead-in of every row after an object's labeled first row
const ROW_INDENT: &str = "  ";

/// Horizontal rule made of `width` box-drawing dashes
fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// Three rows for an array: top border, cells, bottom border.
///
/// Borders have one dash per cell whatever the value's width.
fn array_rows(label: &str, values: &[Value]) -> Vec<String> {
    let cells: Vec<String> = values.iter().map(Value::display).collect();
    let rules = vec![rule(1); cells.len()];

    vec![
        format!("{}┌{}┐", label, rules.join("┬")),
        format!("{}│{}│", ROW_INDENT, cells.join("│")),
        format!("{}└{}┘", ROW_INDENT, rules.join("┴")),
    ]
}

/// Two-column key/value table, one separator between consecutive entries
fn record_rows(label: &str, entries: &[(Value, Value)]) -> Vec<String> {
    let cells: Vec<(String, String)> = entries
        .iter()
        .map(|(key, value)| (key.key_display(), value.display()))
        .collect();
    let key_width = cells.iter().map(|(k, _)| cell_width(k)).max().unwrap_or(0).max(1);
    let value_width = cells.iter().map(|(_, v)| cell_width(v)).max().unwrap_or(0).max(1);

    let mut rows = Vec::with_capacity(cells.len() * 2 + 1);
    rows.push(format!("{}┌{}┬{}┐", label, rule(key_width), rule(value_width)));
    for (i, (key, value)) in cells.iter().enumerate() {
        rows.push(format!(
            "{}│{}│{}│",
            ROW_INDENT,
            pad_end(key, key_width),
            pad_end(value, value_width)
        ));
        if i + 1 < cells.len() {
            rows.push(format!("{}├{}┼{}┤", ROW_INDENT, rule(key_width), rule(value_width)));
        }
    }
    rows.push(format!("{}└{}┴{}┘", ROW_INDENT, rule(key_width), rule(value_width)));
    rows
}

/// Rows of one heap object, unpadded
pub fn object_rows(id: &str, object: &HeapObject) -> Vec<String> {
    let label = format!("&{}", id);
    match object {
        HeapObject::Array(values) => array_rows(&label, values),
        HeapObject::Record(entries) => record_rows(&label, entries),
    }
}

/// Rows of every object in the heap, in display order
pub fn heap_rows(heap: &Heap) -> Vec<String> {
    heap.iter()
        .flat_map(|(id, object)| object_rows(id, object))
        .collect()
}

/// Draw the heap and blank the rest of the pane; returns rows used by objects
pub fn render_heap_pane<S: Screen>(
    screen: &mut S,
    heap: &Heap,
    area: &HeapPaneArea,
) -> io::Result<usize> {
    let mut row = area.top_row;
    for line in heap_rows(heap) {
        if row > area.last_row {
            break;
        }
        screen.write_at(area.column, row, &fit(&line, area.width))?;
        row += 1;
    }
    let used = row - area.top_row;

    let blank = " ".repeat(area.width);
    while row <= area.last_row {
        screen.write_at(area.column, row, &blank)?;
        row += 1;
    }
    Ok(used)
}
