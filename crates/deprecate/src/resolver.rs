//! Caller resolution
//!
//! Turns a [`CallerSpec`] into the [`Identity`] of the deprecated symbol.
//! Stack-derived callers are read from a [`StackProvider`] snapshot:
//!
//! 1. Leading frames owned by the facility type are dropped
//! 2. The index is validated against the remaining frames
//! 3. The selected frame is named, mapping dispatch hooks back to the
//!    member that was actually requested

use crate::error::{DeprecationError, DeprecationResult};
use crate::frame::{CallFrame, CallStyle, StackProvider};
use serde_json::Value;
use std::fmt;

/// Type name owning the facility's own entry frames
pub const DEFAULT_FACILITY: &str = "Deprecated";

/// How the deprecated caller is identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerSpec {
    /// Already qualified, e.g. `Foo::bar`
    Explicit(String),
    /// Ancestor frame index; 0 is the function calling the facility
    StackIndex(i64),
    /// Same as `StackIndex(0)`
    Auto,
}

impl From<&str> for CallerSpec {
    fn from(name: &str) -> Self {
        CallerSpec::Explicit(name.to_string())
    }
}

impl From<String> for CallerSpec {
    fn from(name: String) -> Self {
        CallerSpec::Explicit(name)
    }
}

impl From<i64> for CallerSpec {
    fn from(index: i64) -> Self {
        CallerSpec::StackIndex(index)
    }
}

impl TryFrom<&Value> for CallerSpec {
    type Error = DeprecationError;

    /// Host values: `null`, an integer index, or a non-empty name
    fn try_from(value: &Value) -> DeprecationResult<Self> {
        match value {
            Value::Null => Ok(CallerSpec::Auto),
            Value::Number(n) if n.is_f64() => {
                Err(DeprecationError::expected_non_empty_string(value_kind(value)))
            }
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(index), _) => Ok(CallerSpec::StackIndex(index)),
                (None, Some(index)) => Err(DeprecationError::OutOfBounds { index }),
                (None, None) => Err(DeprecationError::expected_non_empty_string(
                    value_kind(value),
                )),
            },
            Value::String(s) => non_empty(value, s).map(|s| CallerSpec::Explicit(s.to_string())),
            other => Err(DeprecationError::expected_non_empty_string(value_kind(other))),
        }
    }
}

/// Kind names used when echoing unexpected host values
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "NULL",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "double",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn non_empty<'a>(value: &Value, s: &'a str) -> DeprecationResult<&'a str> {
    if s.is_empty() {
        return Err(DeprecationError::expected_non_empty_string(value));
    }
    Ok(s)
}

/// Recognized dynamic dispatch hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchHook {
    /// Reading an undefined member
    Get,
    /// Writing an undefined member
    Set,
    /// Checking an undefined member exists
    Isset,
    /// Removing an undefined member
    Unset,
    /// Invoking an undefined instance method
    Call,
    /// Invoking an undefined static method
    CallStatic,
    /// Constructing an instance
    Construct,
}

impl DispatchHook {
    pub const ALL: [DispatchHook; 7] = [
        DispatchHook::Get,
        DispatchHook::Set,
        DispatchHook::Isset,
        DispatchHook::Unset,
        DispatchHook::Call,
        DispatchHook::CallStatic,
        DispatchHook::Construct,
    ];

    /// Conventional frame name
    pub fn default_name(self) -> &'static str {
        match self {
            DispatchHook::Get => "__get",
            DispatchHook::Set => "__set",
            DispatchHook::Isset => "__isset",
            DispatchHook::Unset => "__unset",
            DispatchHook::Call => "__call",
            DispatchHook::CallStatic => "__callStatic",
            DispatchHook::Construct => "__construct",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Frame names recognized as dispatch hooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookTable {
    names: [String; 7],
}

impl Default for HookTable {
    fn default() -> Self {
        Self {
            names: DispatchHook::ALL.map(|hook| hook.default_name().to_string()),
        }
    }
}

impl HookTable {
    /// Rename a hook for hosts with other conventions
    ///
    /// Fails if another hook already answers to `name`.
    pub fn with_name(
        self,
        hook: DispatchHook,
        name: impl Into<String>,
    ) -> DeprecationResult<Self> {
        self.with_names([(hook, name.into())])
    }

    /// Rename several hooks at once; only the final table must be unambiguous
    pub fn with_names(
        mut self,
        renames: impl IntoIterator<Item = (DispatchHook, String)>,
    ) -> DeprecationResult<Self> {
        for (hook, name) in renames {
            self.names[hook.index()] = name;
        }

        for (i, hook) in DispatchHook::ALL.into_iter().enumerate() {
            let name = self.name(hook);
            if let Some(other) = DispatchHook::ALL[..i]
                .iter()
                .find(|other| self.name(**other) == name)
            {
                return Err(DeprecationError::InvalidArgument(format!(
                    "Hook name {:?} is used by both {:?} and {:?}",
                    name, other, hook
                )));
            }
        }

        Ok(self)
    }

    pub fn name(&self, hook: DispatchHook) -> &str {
        &self.names[hook.index()]
    }

    /// Hook whose frame name is `function`, if any
    pub fn lookup(&self, function: &str) -> Option<DispatchHook> {
        DispatchHook::ALL
            .into_iter()
            .find(|hook| self.name(*hook) == function)
    }
}

/// Accessor hooks that report an action instead of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Get,
    Set,
    Isset,
    Unset,
}

/// Canonical identity of a deprecated symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Function or `Type::member`, rendered with `()`
    Symbol(String),
    /// Accessor clause such as `Getting Foo::bar`, rendered as-is
    Accessor {
        access: Access,
        owner: String,
        member: String,
    },
    /// Whole-type deprecation, rendered as the bare type name
    Type(String),
    /// Free-form subject not tied to a symbol
    Phrase(String),
}

impl fmt::Display for Identity {
    /// Subject of the notice sentence
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Symbol(name) => write!(f, "{}()", name),
            Identity::Accessor {
                access,
                owner,
                member,
            } => match access {
                Access::Get => write!(f, "Getting {}::{}", owner, member),
                Access::Set => write!(f, "Setting {}::{}", owner, member),
                Access::Isset => write!(f, "isset({}::{})", owner, member),
                Access::Unset => write!(f, "unset({}::{})", owner, member),
            },
            Identity::Type(name) | Identity::Phrase(name) => f.write_str(name),
        }
    }
}

/// Resolves caller specs against a stack snapshot
#[derive(Debug, Clone)]
pub struct Resolver {
    facility: String,
    hooks: HookTable,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_FACILITY, HookTable::default())
    }
}

impl Resolver {
    pub fn new(facility: impl Into<String>, hooks: HookTable) -> Self {
        Self {
            facility: facility.into(),
            hooks,
        }
    }

    pub fn facility(&self) -> &str {
        &self.facility
    }

    pub fn hooks(&self) -> &HookTable {
        &self.hooks
    }

    /// Resolve `spec` to the identity of the deprecated symbol
    ///
    /// The stack is only captured for [`CallerSpec::StackIndex`] and
    /// [`CallerSpec::Auto`].
    pub fn resolve<S>(&self, spec: &CallerSpec, stack: &S) -> DeprecationResult<Identity>
    where
        S: StackProvider + ?Sized,
    {
        let index = match spec {
            CallerSpec::Explicit(name) => {
                if name.is_empty() {
                    return Err(DeprecationError::expected_non_empty_string("\"\""));
                }
                return Ok(Identity::Symbol(name.clone()));
            }
            CallerSpec::StackIndex(index) => *index,
            CallerSpec::Auto => 0,
        };

        let index = u64::try_from(index).map_err(|_| DeprecationError::negative_index(index))?;

        let frames = stack.frames();
        let frames: Vec<&CallFrame> = frames
            .iter()
            .skip_while(|frame| self.is_facility_frame(frame))
            .collect();

        if frames.is_empty() {
            return Err(DeprecationError::outside_function(&self.facility));
        }

        let frame = usize::try_from(index)
            .ok()
            .and_then(|i| frames.get(i))
            .ok_or(DeprecationError::OutOfBounds { index })?;

        let identity = self.identify(frame)?;
        tracing::trace!(index, caller = %identity, "resolved deprecated caller");
        Ok(identity)
    }

    fn is_facility_frame(&self, frame: &CallFrame) -> bool {
        frame.owner.as_deref() == Some(self.facility.as_str())
    }

    fn identify(&self, frame: &CallFrame) -> DeprecationResult<Identity> {
        if frame.style == CallStyle::Script {
            return Err(DeprecationError::outside_function(&self.facility));
        }

        // Hooks only dispatch on behalf of a type
        let hook = self.hooks.lookup(&frame.function);
        let (Some(hook), Some(owner)) = (hook, &frame.owner) else {
            return Ok(Identity::Symbol(frame.qualified_name()));
        };

        let owner = owner.clone();
        let access = match hook {
            DispatchHook::Construct => return Ok(Identity::Type(owner)),
            DispatchHook::Call | DispatchHook::CallStatic => {
                let member = requested_member(frame)?;
                return Ok(Identity::Symbol(format!("{}::{}", owner, member)));
            }
            DispatchHook::Get => Access::Get,
            DispatchHook::Set => Access::Set,
            DispatchHook::Isset => Access::Isset,
            DispatchHook::Unset => Access::Unset,
        };

        Ok(Identity::Accessor {
            access,
            owner,
            member: requested_member(frame)?.to_string(),
        })
    }
}

/// Member name a dispatch hook received as its first argument
fn requested_member(frame: &CallFrame) -> DeprecationResult<&str> {
    match frame.args.first() {
        Some(value @ Value::String(name)) => non_empty(value, name),
        Some(other) => Err(DeprecationError::expected_non_empty_string(value_kind(other))),
        None => Err(DeprecationError::expected_non_empty_string(value_kind(&Value::Null))),
    }
}
