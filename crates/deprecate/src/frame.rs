//! Call frames and the stack-introspection capability
//!
//! The resolver never walks a real machine stack. Hosts describe their own
//! call stack through [`StackProvider`], which also lets tests hand in
//! synthetic stacks.

use serde_json::Value;

/// How a frame's function was invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStyle {
    /// `Type::function` called without a receiver
    Static,
    /// `$object->function` style call on an instance
    Instance,
    /// Free function with no owning type
    Free,
    /// Top-level script, include or eval scope; not a function at all
    Script,
}

/// One ancestor frame of the active call
#[derive(Debug, Clone, PartialEq)]
pub struct CallFrame {
    /// Function or member name
    pub function: String,
    /// Owning type, for static and instance calls
    pub owner: Option<String>,
    pub style: CallStyle,
    /// Arguments the frame received
    ///
    /// Dispatch hooks carry the requested member name as the first argument.
    pub args: Vec<Value>,
}

impl CallFrame {
    /// Frame of a free function
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            function: name.into(),
            owner: None,
            style: CallStyle::Free,
            args: Vec::new(),
        }
    }

    /// Frame of a static member call
    pub fn static_method(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            function: name.into(),
            owner: Some(owner.into()),
            style: CallStyle::Static,
            args: Vec::new(),
        }
    }

    /// Frame of an instance member call
    pub fn method(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            function: name.into(),
            owner: Some(owner.into()),
            style: CallStyle::Instance,
            args: Vec::new(),
        }
    }

    /// Pseudo-frame for top-level code, includes and eval
    pub fn script(name: impl Into<String>) -> Self {
        Self {
            function: name.into(),
            owner: None,
            style: CallStyle::Script,
            args: Vec::new(),
        }
    }

    /// Attach the received arguments
    pub fn with_args(mut self, args: impl IntoIterator<Item = Value>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// `Type::function` for members, `function` otherwise
    pub fn qualified_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{}::{}", owner, self.function),
            None => self.function.clone(),
        }
    }
}

/// Source of the ancestor frames of the current call
pub trait StackProvider {
    /// Frames ordered innermost first
    fn frames(&self) -> Vec<CallFrame>;
}

impl StackProvider for [CallFrame] {
    fn frames(&self) -> Vec<CallFrame> {
        self.to_vec()
    }
}

impl StackProvider for Vec<CallFrame> {
    fn frames(&self) -> Vec<CallFrame> {
        self.clone()
    }
}

/// Push/pop call stack a host interpreter can keep next to its own frames
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a call
    pub fn push_frame(&mut self, frame: CallFrame) {
        self.frames.push(frame);
    }

    /// Leave the innermost call
    pub fn pop_frame(&mut self) -> Option<CallFrame> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl StackProvider for CallStack {
    fn frames(&self) -> Vec<CallFrame> {
        self.frames.iter().rev().cloned().collect()
    }
}
