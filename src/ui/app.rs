//! Viewer session: step controller and input loop
//!
//! [`App`] owns the whole mutable state of the viewer, a [`ViewState`] with
//! the current step index and the terminal size. Input events are pulled one
//! at a time and each is fully handled (erase, redraw, footer, flush) before
//! the next one is read.

use super::input::{classify, Command};
use super::layout::{compute_layout, PaneLayout};
use super::panes::{
    erase_program_counter, erase_stack_pane, render_dividers, render_footer, render_heap_pane,
    render_program_counter, render_source, render_stack_pane, HeapPaneArea, StackPaneArea,
};
use super::screen::Screen;
use crate::config::ViewerConfig;
use crate::snapshot::{Snapshot, Trace};
use serde::{Deserialize, Serialize};
use std::io;
use tracing::debug;

/// Everything that changes while viewing a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Index of the displayed snapshot, always below the trace length
    pub current_index: usize,
    pub terminal_width: u16,
    pub terminal_height: u16,
}

impl ViewState {
    pub fn new(terminal_width: u16, terminal_height: u16) -> Self {
        ViewState {
            current_index: 0,
            terminal_width,
            terminal_height,
        }
    }
}

/// Whether the input loop should keep going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Why [`App::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user pressed `q`
    Quit,
    /// The input stream ended
    InputClosed,
}

/// The trace viewer
pub struct App<'t, S: Screen> {
    trace: &'t Trace,
    config: ViewerConfig,
    layout: PaneLayout,
    state: ViewState,
    screen: S,
}

impl<'t, S: Screen> App<'t, S> {
    /// Create a viewer positioned at the first step
    pub fn new(trace: &'t Trace, config: ViewerConfig, screen: S, width: u16, height: u16) -> Self {
        Self::with_state(trace, config, screen, ViewState::new(width, height))
    }

    /// Create a viewer from a saved state; the index is clamped into the trace
    pub fn with_state(trace: &'t Trace, config: ViewerConfig, screen: S, state: ViewState) -> Self {
        let layout = compute_layout(
            trace.source_lines(),
            state.terminal_width,
            state.terminal_height,
            config.stack_frame_width,
        );
        let state = ViewState {
            current_index: state.current_index.min(trace.len().saturating_sub(1)),
            ..state
        };
        App {
            trace,
            config,
            layout,
            state,
            screen,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn layout(&self) -> &PaneLayout {
        &self.layout
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn into_screen(self) -> S {
        self.screen
    }

    fn current(&self) -> Option<&'t Snapshot> {
        self.trace.get(self.state.current_index)
    }

    fn stack_area(&self) -> StackPaneArea {
        StackPaneArea {
            column: self.layout.stack_column(),
            top_row: self.config.top_offset,
            last_row: self.layout.last_pane_row(),
            text_width: self.layout.frame_text_width(),
        }
    }

    fn heap_area(&self) -> HeapPaneArea {
        HeapPaneArea {
            column: self.layout.heap_column(),
            top_row: self.config.top_offset,
            last_row: self.layout.last_pane_row(),
            width: self.layout.heap_width(),
        }
    }

    /// Draw the whole screen: source, dividers, the current step, and footer
    pub fn draw(&mut self) -> io::Result<()> {
        self.screen.clear()?;
        render_source(
            &mut self.screen,
            self.trace.source_lines(),
            &self.layout,
            self.config.top_offset,
        )?;
        render_dividers(
            &mut self.screen,
            &self.layout,
            self.config.top_offset,
            self.config.divider,
        )?;
        self.render_step()?;
        self.finish_redraw()
    }

    /// Draw the program counter, stack, and heap of the current step
    fn render_step(&mut self) -> io::Result<()> {
        let Some(snapshot) = self.current() else {
            return Ok(());
        };
        render_program_counter(
            &mut self.screen,
            snapshot.line,
            self.config.top_offset,
            self.layout.last_pane_row(),
            self.config.pc_marker,
        )?;
        let stack_area = self.stack_area();
        render_stack_pane(&mut self.screen, &snapshot.stack, &stack_area)?;
        let heap_area = self.heap_area();
        render_heap_pane(&mut self.screen, &snapshot.heap, &heap_area)?;
        Ok(())
    }

    /// Blank the program counter and stack of the current step.
    ///
    /// The heap needs no erase: its redraw covers the whole pane.
    fn erase_step(&mut self) -> io::Result<()> {
        let Some(snapshot) = self.current() else {
            return Ok(());
        };
        erase_program_counter(
            &mut self.screen,
            snapshot.line,
            self.config.top_offset,
            self.layout.last_pane_row(),
        )?;
        let stack_area = self.stack_area();
        erase_stack_pane(&mut self.screen, &snapshot.stack, &stack_area)
    }

    /// Update the footer, park the cursor, and flush
    fn finish_redraw(&mut self) -> io::Result<()> {
        let position = if self.trace.is_empty() {
            0
        } else {
            self.state.current_index + 1
        };
        let footer_row = self.layout.footer_row();
        render_footer(&mut self.screen, footer_row, position, self.trace.len())?;
        self.screen.park(1, footer_row)?;
        self.screen.flush()
    }

    fn move_to(&mut self, index: usize) -> io::Result<()> {
        debug!(from = self.state.current_index, to = index, "step");
        self.erase_step()?;
        self.state.current_index = index;
        self.render_step()?;
        self.finish_redraw()
    }

    /// Show the next step; returns false (and draws nothing) at the last step
    pub fn step_forward(&mut self) -> io::Result<bool> {
        let next = self.state.current_index + 1;
        if next >= self.trace.len() {
            return Ok(false);
        }
        self.move_to(next)?;
        Ok(true)
    }

    /// Show the previous step; returns false (and draws nothing) at the first step
    pub fn step_backward(&mut self) -> io::Result<bool> {
        let Some(previous) = self.state.current_index.checked_sub(1) else {
            return Ok(false);
        };
        self.move_to(previous)?;
        Ok(true)
    }

    /// Carry out one command
    pub fn apply(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::StepForward => {
                self.step_forward()?;
            }
            Command::StepBackward => {
                self.step_backward()?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Classify a raw input event and carry it out; unbound input is ignored
    pub fn handle_input(&mut self, bytes: &[u8]) -> io::Result<Flow> {
        match classify(bytes) {
            Some(command) => self.apply(command),
            None => {
                debug!(?bytes, "ignored input");
                Ok(Flow::Continue)
            }
        }
    }

    /// Process input events in order until quit or end of input
    pub fn run<I>(&mut self, events: I) -> io::Result<Exit>
    where
        I: IntoIterator<Item = io::Result<Vec<u8>>>,
    {
        for event in events {
            if self.handle_input(&event?)? == Flow::Quit {
                return Ok(Exit::Quit);
            }
        }
        Ok(Exit::InputClosed)
    }

    /// Clear the screen and leave the farewell line at the top
    pub fn farewell(&mut self) -> io::Result<()> {
        self.screen.clear()?;
        self.screen.write_at(1, 1, &self.config.farewell)?;
        self.screen.flush()
    }
}
