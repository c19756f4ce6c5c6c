//! Stack pane: one block per call, innermost call on top
//!
//! Each frame is a signature line `f(x=1, y="a")` followed by one
//! `  name = value` line per local variable. Lines are cut to the pane's text
//! width so the divider column stays intact.
//!
//! [`erase_stack_pane`] walks the exact same lines as
//! [`render_stack_pane`] and overwrites them with blanks, so only cells that
//! were drawn get cleared.

use super::utils::{blank_like, truncate};
use crate::memory::stack::{Frame, Stack};
use crate::ui::screen::Screen;
use std::io;

/// Geometry of the stack pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackPaneArea {
    pub column: usize,
    pub top_row: usize,
    pub last_row: usize,
    /// Maximum characters per line
    pub text_width: usize,
}

/// Lines shown for one frame, each already truncated
fn frame_lines(frame: &Frame, text_width: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(frame.variables.len() + 1);
    lines.push(truncate(&frame.signature(), text_width));
    for (name, value) in &frame.variables {
        lines.push(truncate(&format!("  {} = {}", name, value.display()), text_width));
    }
    lines
}

/// All lines of the pane, innermost frame first
pub fn stack_lines(stack: &Stack, text_width: usize) -> Vec<String> {
    stack
        .innermost_first()
        .flat_map(|frame| frame_lines(frame, text_width))
        .collect()
}

/// Lines paired with their rows, dropping those below the pane
fn placed_lines(stack: &Stack, area: &StackPaneArea) -> impl Iterator<Item = (usize, String)> {
    let area = *area;
    stack_lines(stack, area.text_width)
        .into_iter()
        .enumerate()
        .map(move |(i, line)| (area.top_row + i, line))
        .take_while(move |(row, _)| *row <= area.last_row)
}

/// Draw the stack; returns the number of rows used
pub fn render_stack_pane<S: Screen>(
    screen: &mut S,
    stack: &Stack,
    area: &StackPaneArea,
) -> io::Result<usize> {
    let mut used = 0;
    for (row, line) in placed_lines(stack, area) {
        screen.write_at(area.column, row, &line)?;
        used += 1;
    }
    Ok(used)
}

/// Blank exactly the cells [`render_stack_pane`] drew for `stack`
pub fn erase_stack_pane<S: Screen>(
    screen: &mut S,
    stack: &Stack,
    area: &StackPaneArea,
) -> io::Result<()> {
    for (row, line) in placed_lines(stack, area) {
        screen.write_at(area.column, row, &blank_like(&line))?;
    }
    Ok(())
}
