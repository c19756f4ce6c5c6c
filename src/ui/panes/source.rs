//! Source pane: numbered code lines, pane dividers, and the program counter
//!
//! The source text never changes during a session. It is drawn once at
//! startup; afterwards only the one-cell program counter marker in column 1
//! moves.

use super::utils::pad_start;
use crate::ui::layout::PaneLayout;
use crate::ui::screen::Screen;
use std::io;

/// Draw every source line as `<right-aligned number> <code>`.
///
/// Lines that would land below the last pane row are left off, so the
/// footer row stays free.
pub fn render_source<S: Screen>(
    screen: &mut S,
    code_lines: &[String],
    layout: &PaneLayout,
    top_offset: usize,
) -> io::Result<()> {
    let last_row = layout.last_pane_row();
    for (i, code) in code_lines.iter().enumerate() {
        let row = i + top_offset;
        if row > last_row {
            break;
        }
        let line = format!("{} {}", pad_start(&(i + 1).to_string(), layout.gutter_width), code);
        screen.write_at(layout.source_column(), row, &line)?;
    }
    Ok(())
}

/// Draw both vertical dividers down the full terminal height
pub fn render_dividers<S: Screen>(
    screen: &mut S,
    layout: &PaneLayout,
    top_offset: usize,
    divider: char,
) -> io::Result<()> {
    let glyph = divider.to_string();
    for column in [layout.stack_divider_column, layout.heap_divider_column] {
        for i in 0..layout.terminal_height {
            screen.write_at(column, i + top_offset, &glyph)?;
        }
    }
    Ok(())
}

/// Screen row of a 1-based source line
pub fn program_counter_row(line: usize, top_offset: usize) -> usize {
    (line + top_offset).saturating_sub(1)
}

/// Put the marker in column 1 of the executing line, unless that line is
/// clipped below `last_row`
pub fn render_program_counter<S: Screen>(
    screen: &mut S,
    line: usize,
    top_offset: usize,
    last_row: usize,
    marker: char,
) -> io::Result<()> {
    let row = program_counter_row(line, top_offset);
    if row > last_row {
        return Ok(());
    }
    screen.write_at(1, row, &marker.to_string())
}

/// Blank the marker drawn by [`render_program_counter`]
pub fn erase_program_counter<S: Screen>(
    screen: &mut S,
    line: usize,
    top_offset: usize,
    last_row: usize,
) -> io::Result<()> {
    let row = program_counter_row(line, top_offset);
    if row > last_row {
        return Ok(());
    }
    screen.write_at(1, row, " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::compute_layout;
    use crate::ui::screen::BufferScreen;

    fn code(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_line_numbers_right_aligned() {
        let lines: Vec<String> = (1..=10).map(|i| format!("s{}", i)).collect();
        let layout = compute_layout(&lines, 40, 12, 10);
        let mut screen = BufferScreen::new(40, 12);
        render_source(&mut screen, &lines, &layout, 1).unwrap();
        assert_eq!(screen.text_at(1, 1, 8), "   1 s1 ");
        assert_eq!(screen.text_at(1, 10, 8), "  10 s10");
    }

    #[test]
    fn test_dividers_span_every_row() {
        let lines = code(&["ab"]);
        let layout = compute_layout(&lines, 30, 4, 10);
        let mut screen = BufferScreen::new(30, 4);
        render_dividers(&mut screen, &layout, 1, '║').unwrap();
        for row in 1..=4 {
            assert_eq!(screen.text_at(layout.stack_divider_column, row, 1), "║");
            assert_eq!(screen.text_at(layout.heap_divider_column, row, 1), "║");
        }
    }

    #[test]
    fn test_program_counter_moves() {
        let mut screen = BufferScreen::new(10, 3);
        render_program_counter(&mut screen, 2, 1, 3, '→').unwrap();
        assert_eq!(screen.text_at(1, 2, 1), "→");
        erase_program_counter(&mut screen, 2, 1, 3).unwrap();
        render_program_counter(&mut screen, 3, 1, 3, '→').unwrap();
        assert_eq!(screen.row_text(2), "");
        assert_eq!(screen.text_at(1, 3, 1), "→");
    }

    #[test]
    fn test_long_source_stops_above_footer() {
        let lines: Vec<String> = (1..=20).map(|i| format!("s{}", i)).collect();
        let layout = compute_layout(&lines, 40, 6, 10);
        // taller than the layout so anything drawn past it would show up
        let mut screen = BufferScreen::new(40, 24);
        render_source(&mut screen, &lines, &layout, 1).unwrap();

        assert_eq!(screen.text_at(1, 5, 7), "   5 s5");
        for row in 6..=24 {
            assert_eq!(screen.row_text(row), "", "row {} should be blank", row);
        }
    }

    #[test]
    fn test_program_counter_clipped_below_panes() {
        let mut screen = BufferScreen::new(10, 12);
        render_program_counter(&mut screen, 9, 1, 5, '→').unwrap();
        assert_eq!(screen.row_text(9), "");

        screen.write_at(1, 9, "x").unwrap();
        erase_program_counter(&mut screen, 9, 1, 5).unwrap();
        assert_eq!(screen.text_at(1, 9, 1), "x");

        render_program_counter(&mut screen, 5, 1, 5, '→').unwrap();
        assert_eq!(screen.text_at(1, 5, 1), "→");
    }
}
