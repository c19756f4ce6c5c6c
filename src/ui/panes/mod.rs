//! Pane rendering
//!
//! Every pane draws through a [`Screen`](crate::ui::screen::Screen) at fixed
//! columns taken from the [`PaneLayout`](crate::ui::layout::PaneLayout).
//!
//! # Pane Modules
//!
//! - [`source`]: numbered source lines, dividers, and the program counter
//! - [`stack`]: call frames, innermost first, with a matching erase
//! - [`heap`]: box-drawn array and record tables
//! - [`status`]: the `Step N of M` indicator
//! - `utils`: fixed-width padding and truncation helpers

mod utils;

pub mod heap;
pub mod source;
pub mod stack;
pub mod status;

pub use heap::{render_heap_pane, HeapPaneArea};
pub use source::{erase_program_counter, render_dividers, render_program_counter, render_source};
pub use stack::{erase_stack_pane, render_stack_pane, StackPaneArea};
pub use status::{footer_text, render_footer};
