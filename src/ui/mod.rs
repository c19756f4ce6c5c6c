//! Terminal user interface
//!
//! The UI is organized into these layers:
//!
//! - **[`app`]**: viewer state, step navigation, and the input loop
//! - **[`input`]**: raw key sequences to navigation commands
//! - **[`layout`]**: fixed pane columns computed from the source geometry
//! - **[`panes`]**: render (and erase) functions for each pane
//! - **[`screen`]**: positioned text output to a live terminal or a buffer
//!
//! The entry point is [`App`]: construct it with a loaded
//! [`Trace`](crate::snapshot::Trace) and a [`Screen`], call [`App::draw`],
//! then feed input events to [`App::run`].

pub mod app;
pub mod input;
pub mod layout;
pub mod panes;
pub mod screen;

pub use app::{App, Exit, Flow, ViewState};
pub use input::{classify, Command, StdinEvents};
pub use screen::{BufferScreen, Screen, TerminalScreen};
