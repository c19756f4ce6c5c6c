//! # Introduction
//!
//! tracetty replays a recorded execution trace one step at a time inside a
//! fixed terminal grid, showing the source line being executed, the call
//! stack, and the heap as they were at each recorded step.
//!
//! ## Pipeline
//!
//! ```text
//! source + history file → Trace → App (step controller) → panes → Screen
//! ```
//!
//! 1. [`snapshot`]: loads the history into an immutable [`snapshot::Trace`].
//! 2. [`memory`]: the recorded data model: [`memory::Value`]s held in
//!    [`memory::Frame`]s and the [`memory::Heap`] arena.
//! 3. [`ui`]: layout, incremental pane rendering, and the input loop.
//! 4. [`config`]: sizing constants and [`config::ViewerConfig`].
//!
//! ## Redraw discipline
//!
//! Only the panes touched by a step change are redrawn. The stack pane and
//! program counter are erased by rewriting the previous step's text as
//! blanks; the heap pane is redrawn padded to its full width and height.

pub mod config;
pub mod errors;
pub mod memory;
pub mod snapshot;
pub mod ui;
