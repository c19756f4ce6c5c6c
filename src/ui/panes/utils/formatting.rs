//! Fixed-width text helpers shared by the panes
//!
//! Widths are counted in characters; every glyph the panes draw (box
//! drawing, arrows, ASCII) occupies one terminal cell.

/// Number of cells `text` occupies
pub(crate) fn cell_width(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` down to at most `width` cells
pub(crate) fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Right-pad `text` with spaces to `width` cells; longer text is left alone
pub(crate) fn pad_end(text: &str, width: usize) -> String {
    let len = cell_width(text);
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Right-align `text` in `width` cells
pub(crate) fn pad_start(text: &str, width: usize) -> String {
    format!("{:>width$}", text, width = width)
}

/// Make `text` exactly `width` cells: truncate or pad
pub(crate) fn fit(text: &str, width: usize) -> String {
    pad_end(&truncate(text, width), width)
}

/// Blank string covering the same cells as `text`
pub(crate) fn blank_like(text: &str) -> String {
    " ".repeat(cell_width(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abcd");
        assert_eq!(fit("┌─┐", 2), "┌─");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_start("7", 3), "  7");
        assert_eq!(pad_start("123", 2), "123");
        assert_eq!(pad_end("│x│", 4), "│x│ ");
        assert_eq!(blank_like("→ab"), "   ");
    }
}
