//! Host fixture simulating an interpreter that calls the emitter
//!
//! Frames are pushed the way a host would while running code, including the
//! facility's own entry frame.

#![allow(dead_code)]

use deprecate::{
    CallFrame, CallStack, CallerSpec, CollectingSink, Deprecated, DeprecationResult, KnownTypes,
};
use serde_json::Value;
use std::cell::RefCell;

pub const FIXTURE_CLASS: &str = "Bolt\\Common\\Tests\\Fixtures\\TestDeprecatedClass";
pub const FIXTURE_FUNCTION: &str = "Bolt\\Common\\Tests\\Fixtures\\deprecatedFunction";
pub const TEST_CLASS: &str = "Bolt\\Common\\Tests\\DeprecatedTest";

pub struct Host {
    pub stack: RefCell<CallStack>,
    pub deprecated: Deprecated<CollectingSink>,
}

impl Host {
    /// Host currently running inside a test method
    pub fn new() -> Self {
        let mut stack = CallStack::new();
        stack.push_frame(CallFrame::script("<main>"));
        stack.push_frame(CallFrame::method(TEST_CLASS, "testMethodUsingBacktrace"));

        let types: KnownTypes = ["ArrayObject"].into_iter().collect();
        Self {
            stack: RefCell::new(stack),
            deprecated: Deprecated::new(CollectingSink::new()).with_types(types),
        }
    }

    /// Host with nothing on the stack
    pub fn bare() -> Self {
        let host = Self::new();
        *host.stack.borrow_mut() = CallStack::new();
        host
    }

    /// Run `body` with `frame` pushed
    pub fn call<R>(&self, frame: CallFrame, body: impl FnOnce(&Self) -> R) -> R {
        self.stack.borrow_mut().push_frame(frame);
        let result = body(self);
        self.stack.borrow_mut().pop_frame();
        result
    }

    /// `Deprecated::method(...)` as seen from the currently running code
    pub fn deprecate_method(
        &self,
        since: Option<&str>,
        hint: Option<&str>,
        caller: CallerSpec,
    ) -> DeprecationResult<()> {
        self.call(CallFrame::static_method("Deprecated", "method"), |host| {
            let stack = host.stack.borrow();
            host.deprecated.method(&*stack, since, hint, caller)
        })
    }

    /// Every notice since the last call
    pub fn notices(&self) -> Vec<String> {
        self.deprecated.sink().take()
    }

    /// Exactly one notice was emitted and it equals `expected`
    pub fn assert_deprecation(&self, expected: &str) {
        let notices = self.notices();
        assert!(!notices.is_empty(), "No deprecations triggered.");
        assert_eq!(notices[0], expected);
    }

    // ========================================================================
    // Fixture class members
    // ========================================================================

    pub fn static_foo(&self) -> DeprecationResult<()> {
        self.call(CallFrame::static_method(FIXTURE_CLASS, "foo"), |host| {
            host.deprecate_method(None, None, CallerSpec::Auto)
        })
    }

    pub fn deprecated_function(&self) -> DeprecationResult<()> {
        self.call(CallFrame::function(FIXTURE_FUNCTION), |host| {
            host.deprecate_method(None, None, CallerSpec::Auto)
        })
    }

    /// Undefined static method routed through `__callStatic`
    pub fn call_static_missing(&self, name: &str) -> DeprecationResult<()> {
        let frame = CallFrame::static_method(FIXTURE_CLASS, "__callStatic")
            .with_args([Value::from(name), Value::Array(Vec::new())]);
        self.call(frame, |host| host.deprecate_method(None, None, CallerSpec::Auto))
    }

    /// Undefined instance method routed through `__call`
    pub fn call_missing(&self, name: &str) -> DeprecationResult<()> {
        let frame = CallFrame::method(FIXTURE_CLASS, "__call")
            .with_args([Value::from(name), Value::Array(Vec::new())]);
        self.call(frame, |host| host.deprecate_method(None, None, CallerSpec::Auto))
    }

    /// Property hooks: `__get`, `__set`, `__isset`, `__unset`
    pub fn property_hook(&self, hook: &str, args: Vec<Value>) -> DeprecationResult<()> {
        let frame = CallFrame::method(FIXTURE_CLASS, hook).with_args(args);
        self.call(frame, |host| host.deprecate_method(None, None, CallerSpec::Auto))
    }

    pub fn construct(&self) -> DeprecationResult<()> {
        let frame = CallFrame::method(FIXTURE_CLASS, "__construct").with_args([Value::Bool(true)]);
        self.call(frame, |host| {
            host.deprecate_method(None, Some("ArrayObject"), CallerSpec::Auto)
        })
    }

    pub fn get_array_copy(&self) -> DeprecationResult<()> {
        let frame = CallFrame::static_method(FIXTURE_CLASS, "getArrayCopy");
        self.call(frame, |host| {
            host.deprecate_method(None, Some("ArrayObject::getArrayCopy"), CallerSpec::Auto)
        })
    }

    pub fn some_method(&self) -> DeprecationResult<()> {
        let frame = CallFrame::static_method(FIXTURE_CLASS, "someMethod");
        self.call(frame, |host| {
            host.deprecate_method(Some("1.1"), Some("ArrayObject"), CallerSpec::Auto)
        })
    }

    /// Delegates to a helper that reports its own caller one frame up
    pub fn delegating(&self) -> DeprecationResult<()> {
        self.call(CallFrame::method(FIXTURE_CLASS, "delegating"), |host| {
            host.call(CallFrame::method(FIXTURE_CLASS, "warnOnBehalf"), |host| {
                host.deprecate_method(None, None, CallerSpec::StackIndex(1))
            })
        })
    }

    /// Code run through eval at top level
    pub fn eval_top_level(&self) -> DeprecationResult<()> {
        self.call(CallFrame::script("eval"), |host| {
            host.deprecate_method(None, None, CallerSpec::Auto)
        })
    }
}
