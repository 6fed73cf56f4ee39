//! Deprecate - standardized deprecation notices
//!
//! Library code calls [`Deprecated`] from inside a deprecated function,
//! method, dispatch hook or constructor. The emitter works out which symbol
//! is deprecated, formats a notice and hands it to a [`WarningSink`]:
//!
//! - [`resolver`] names the caller, from an explicit label or a stack frame
//! - [`compose`] builds the sentence from the name, version and hint
//! - [`sink`] delivers it with the `deprecation` severity
//!
//! ```
//! use deprecate::{CallFrame, CallStack, CallerSpec, CollectingSink, Deprecated};
//!
//! let mut stack = CallStack::new();
//! stack.push_frame(CallFrame::static_method("App\\Legacy", "oldApi"));
//!
//! let deprecated = Deprecated::new(CollectingSink::new());
//! deprecated.method(&stack, Some("3.0"), Some("newApi"), CallerSpec::Auto).unwrap();
//!
//! assert_eq!(
//!     deprecated.sink().take(),
//!     vec!["App\\Legacy::oldApi() is deprecated since 3.0 and will be removed in 4.0. Use newApi() instead."]
//! );
//! ```

pub mod compose;
pub mod error;
pub mod facade;
pub mod frame;
pub mod hint;
pub mod resolver;
pub mod sink;
pub mod version;

pub use compose::compose;
pub use error::{DeprecationError, DeprecationResult};
pub use facade::{Deprecated, DynSink};
pub use frame::{CallFrame, CallStack, CallStyle, StackProvider};
pub use hint::{HintKind, KnownTypes, ReplacementHint, TypeCatalog};
pub use resolver::{Access, CallerSpec, DispatchHook, HookTable, Identity, Resolver};
pub use sink::{
    CollectingSink, ColorMode, FnSink, Notice, StderrSink, TracingSink, WarningSink, DEPRECATION,
};
pub use version::VersionPair;
