//! Viewer configuration and fixed sizing constants

use std::path::{Path, PathBuf};

/// Width of the call-stack pane, including its right divider
pub const DEFAULT_STACK_FRAME_WIDTH: usize = 40;

/// Terminal row holding the first source line
pub const TOP_OFFSET: usize = 1;

/// Column where line numbers start in the source pane
pub const SOURCE_COLUMN: usize = 3;

/// Extension of the history file recorded next to a source file
pub const HISTORY_EXTENSION: &str = "history";

/// Settings that shape the viewer's screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub stack_frame_width: usize,
    pub top_offset: usize,
    pub history_extension: String,
    /// Glyph drawn in column 1 of the executing source line
    pub pc_marker: char,
    /// Glyph of the vertical pane dividers
    pub divider: char,
    /// Line printed after the screen is cleared on quit
    pub farewell: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            stack_frame_width: DEFAULT_STACK_FRAME_WIDTH,
            top_offset: TOP_OFFSET,
            history_extension: HISTORY_EXTENSION.to_string(),
            pc_marker: '→',
            divider: '║',
            farewell: String::from("Goodbye!"),
        }
    }
}

impl ViewerConfig {
    /// History file belonging to `source`: same directory, extension swapped
    pub fn history_path_for(&self, source: &Path) -> PathBuf {
        source.with_extension(&self.history_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_path_swaps_extension() {
        let config = ViewerConfig::default();
        assert_eq!(
            config.history_path_for(Path::new("demos/fib.fun")),
            PathBuf::from("demos/fib.history")
        );
        assert_eq!(
            config.history_path_for(Path::new("prog")),
            PathBuf::from("prog.history")
        );
    }
}
