//! Raw keyboard input
//!
//! In raw mode one read from stdin is one key press: a single byte for a
//! printable key, or a three byte `ESC [ <A-D>` sequence for an arrow key.
//! [`classify`] turns such a chunk into a [`Command`].

use std::io::{self, Read, Stdin};

/// Navigation commands understood by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StepForward,
    StepBackward,
    Quit,
}

/// Arrow keys recognized in the input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Right,
    Left,
}

/// Recognize a three byte ANSI arrow sequence
pub fn arrow(bytes: &[u8]) -> Option<Arrow> {
    match bytes {
        [0x1b, b'[', b'A'] => Some(Arrow::Up),
        [0x1b, b'[', b'B'] => Some(Arrow::Down),
        [0x1b, b'[', b'C'] => Some(Arrow::Right),
        [0x1b, b'[', b'D'] => Some(Arrow::Left),
        _ => None,
    }
}

/// Map one input event to a command; unbound input maps to `None`.
///
/// Left and right arrows are recognized but have no command yet.
pub fn classify(bytes: &[u8]) -> Option<Command> {
    if bytes == b"q" {
        return Some(Command::Quit);
    }
    match arrow(bytes)? {
        Arrow::Up => Some(Command::StepBackward),
        Arrow::Down => Some(Command::StepForward),
        Arrow::Left | Arrow::Right => None,
    }
}

/// Blocking iterator over raw input events read from stdin.
///
/// Ends when stdin reaches end of file.
pub struct StdinEvents {
    stdin: Stdin,
    buf: [u8; 32],
}

impl StdinEvents {
    pub fn new() -> Self {
        StdinEvents {
            stdin: io::stdin(),
            buf: [0; 32],
        }
    }
}

impl Default for StdinEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for StdinEvents {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stdin.read(&mut self.buf) {
                Ok(0) => return None,
                Ok(n) => return Some(Ok(self.buf[..n].to_vec())),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"q", Some(Command::Quit))]
    #[case(b"\x1b[A", Some(Command::StepBackward))]
    #[case(b"\x1b[B", Some(Command::StepForward))]
    #[case(b"\x1b[C", None)]
    #[case(b"\x1b[D", None)]
    #[case(b"Q", None)]
    #[case(b"qq", None)]
    #[case(b"\x1b[Bx", None)]
    #[case(b"\x1b", None)]
    #[case(b"", None)]
    fn test_classify(#[case] bytes: &[u8], #[case] expected: Option<Command>) {
        assert_eq!(classify(bytes), expected);
    }

    #[test]
    fn test_left_and_right_are_recognized() {
        assert_eq!(arrow(b"\x1b[C"), Some(Arrow::Right));
        assert_eq!(arrow(b"\x1b[D"), Some(Arrow::Left));
        assert_eq!(arrow(b"\x1bOA"), None);
    }
}
