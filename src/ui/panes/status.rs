//! Step indicator in the bottom row

use super::utils::pad_end;
use crate::ui::screen::Screen;
use std::io;

/// `Step <position> of <total>`, padded to the width of the widest
/// indicator so a shorter one covers a longer one drawn earlier
pub fn footer_text(position: usize, total: usize) -> String {
    let widest = format!("Step {} of {}", total, total);
    pad_end(&format!("Step {} of {}", position, total), widest.chars().count())
}

/// Draw the step indicator at column 1 of `row`
pub fn render_footer<S: Screen>(
    screen: &mut S,
    row: usize,
    position: usize,
    total: usize,
) -> io::Result<()> {
    screen.write_at(1, row, &footer_text(position, total))
}
