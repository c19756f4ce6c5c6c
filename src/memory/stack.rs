//! Recorded call stack
//!
//! - [`Stack`]: the call stack, stored outermost call first
//! - [`Frame`]: one call's parameters and local variables, both in
//!   recording order

use super::value::Value;

/// One call-stack entry
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub fun_name: String,
    pub parameters: Vec<(String, Value)>,
    pub variables: Vec<(String, Value)>,
}

impl Frame {
    pub fn new(fun_name: impl Into<String>) -> Self {
        Frame {
            fun_name: fun_name.into(),
            parameters: Vec::new(),
            variables: Vec::new(),
        }
    }

    /// Append a parameter (declaration order)
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    /// Append a local variable (binding order)
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.push((name.into(), value.into()));
        self
    }

    /// Call signature as shown in the stack pane, e.g. `f(x=1, s="a")`
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|(name, value)| format!("{}={}", name, value.display()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.fun_name, params)
    }
}

/// The call stack of one snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a call (callee goes after its caller)
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Frames, outermost first
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frames, currently executing call first
    pub fn innermost_first(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FromIterator<Frame> for Stack {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Stack {
            frames: iter.into_iter().collect(),
        }
    }
}
