//! Fixed column layout of the viewer
//!
//! The screen is split into three panes separated by vertical dividers:
//!
//! ```text
//! │ →  12 source line   ║ f(x=1)            ║ &a┌─┬─┐
//! │      gutter + code  ║ stack frames      ║ heap objects
//! Step 3 of 40
//! ```
//!
//! Offsets depend only on the source geometry and the terminal size, so they
//! are computed once per session.

use crate::config::SOURCE_COLUMN;

/// Column offsets derived from the source and the terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    /// Digits needed for the largest line number
    pub gutter_width: usize,
    /// Length of the longest source line
    pub code_width: usize,
    pub stack_divider_column: usize,
    pub heap_divider_column: usize,
    pub stack_frame_width: usize,
    pub terminal_width: usize,
    pub terminal_height: usize,
}

/// Compute the pane layout for `code_lines` on a terminal of the given size
pub fn compute_layout(
    code_lines: &[String],
    terminal_width: u16,
    terminal_height: u16,
    stack_frame_width: usize,
) -> PaneLayout {
    let gutter_width = code_lines.len().to_string().len();
    let code_width = code_lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let stack_divider_column = code_width + gutter_width + 5;

    PaneLayout {
        gutter_width,
        code_width,
        stack_divider_column,
        heap_divider_column: stack_divider_column + stack_frame_width,
        stack_frame_width,
        terminal_width: usize::from(terminal_width),
        terminal_height: usize::from(terminal_height),
    }
}

impl PaneLayout {
    /// First column of the line-number gutter
    pub fn source_column(&self) -> usize {
        SOURCE_COLUMN
    }

    /// First column of the stack pane
    pub fn stack_column(&self) -> usize {
        self.stack_divider_column + 1
    }

    /// First column of the heap pane
    pub fn heap_column(&self) -> usize {
        self.heap_divider_column + 1
    }

    /// Cells a heap row is padded (and clipped) to
    pub fn heap_width(&self) -> usize {
        self.terminal_width.saturating_sub(self.heap_column())
    }

    /// Longest text a stack line may hold; one column is left for the divider
    pub fn frame_text_width(&self) -> usize {
        self.stack_frame_width.saturating_sub(1)
    }

    /// Last row available to the stack and heap panes
    pub fn last_pane_row(&self) -> usize {
        self.terminal_height.saturating_sub(1)
    }

    /// Row of the step indicator
    pub fn footer_row(&self) -> usize {
        self.terminal_height
    }
}
