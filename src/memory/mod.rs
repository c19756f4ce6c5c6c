//! Data model of a recorded program state
//!
//! - [`value`]: tagged [`Value`]s held by frames and heap objects
//! - [`stack`]: the call [`Stack`] and its [`Frame`]s
//! - [`heap`]: the [`Heap`] arena of array and record objects
//!
//! Everything here is built once by the loader and only read afterwards.

pub mod heap;
pub mod stack;
pub mod value;

pub use heap::{Heap, HeapObject};
pub use stack::{Frame, Stack};
pub use value::{HeapId, Value};
