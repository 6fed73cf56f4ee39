//! Public entry points
//!
//! [`Deprecated`] ties the resolver, composer and sink together. Each call
//! is independent: nothing is cached, deduplicated or rate limited.

use crate::compose::compose;
use crate::error::{DeprecationError, DeprecationResult};
use crate::frame::StackProvider;
use crate::hint::{ReplacementHint, TypeCatalog};
use crate::resolver::{CallerSpec, DispatchHook, HookTable, Identity, Resolver, DEFAULT_FACILITY};
use crate::sink::{ColorMode, Notice, StderrSink, TracingSink, WarningSink};
use crate::version::VersionPair;
use deprecate_config::{ColorSetting, DeprecateConfig, SinkKind};

/// Sink chosen at runtime, e.g. from configuration
pub type DynSink = Box<dyn WarningSink + Send + Sync>;

/// Deprecation notice emitter
pub struct Deprecated<S = DynSink> {
    sink: S,
    resolver: Resolver,
    types: Option<Box<dyn TypeCatalog + Send + Sync>>,
}

impl<S: WarningSink> Deprecated<S> {
    /// Emitter with the default facility name and hook table
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            resolver: Resolver::default(),
            types: None,
        }
    }

    /// Use a custom facility name or hook table
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Consult `types` when classifying replacement hints
    pub fn with_types(mut self, types: impl TypeCatalog + Send + Sync + 'static) -> Self {
        self.types = Some(Box::new(types));
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Deprecate the calling function or method
    ///
    /// `caller` is either an explicit `Type::member` name or an index into
    /// `stack`. Constructor frames deprecate the whole type.
    ///
    /// ```
    /// use deprecate::{CallStack, CallerSpec, CollectingSink, Deprecated};
    ///
    /// let deprecated = Deprecated::new(CollectingSink::new());
    /// deprecated
    ///     .method(&CallStack::new(), Some("3.0"), Some("baz"), CallerSpec::from("Foo::bar"))
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     deprecated.sink().take(),
    ///     vec!["Foo::bar() is deprecated since 3.0 and will be removed in 4.0. Use baz() instead."]
    /// );
    /// ```
    pub fn method<P>(
        &self,
        stack: &P,
        since: Option<&str>,
        hint: Option<&str>,
        caller: CallerSpec,
    ) -> DeprecationResult<()>
    where
        P: StackProvider + ?Sized,
    {
        let identity = self.resolver.resolve(&caller, stack)?;
        self.notify(&identity, since, hint)
    }

    /// Deprecate a whole type
    pub fn cls(
        &self,
        type_name: &str,
        since: Option<&str>,
        hint: Option<&str>,
    ) -> DeprecationResult<()> {
        if type_name.is_empty() {
            return Err(DeprecationError::expected_non_empty_string("\"\""));
        }
        self.notify(&Identity::Type(type_name.to_string()), since, hint)
    }

    /// Deprecate something that is not a symbol, e.g. an option or a mode
    pub fn warn(
        &self,
        subject: &str,
        since: Option<&str>,
        hint: Option<&str>,
    ) -> DeprecationResult<()> {
        self.notify(&Identity::Phrase(subject.to_string()), since, hint)
    }

    /// Emit an already complete message unchanged
    pub fn raw(&self, message: &str) {
        self.dispatch(Notice::new(message));
    }

    fn notify(
        &self,
        identity: &Identity,
        since: Option<&str>,
        hint: Option<&str>,
    ) -> DeprecationResult<()> {
        let version = VersionPair::parse_optional(since)?;
        let types = self.types.as_deref().map(|t| t as &dyn TypeCatalog);
        let hint = hint
            .filter(|h| !h.is_empty())
            .map(|h| ReplacementHint::classify_with(h, types));

        let message = compose(identity, version.as_ref(), hint.as_ref());
        self.dispatch(Notice::new(message));
        Ok(())
    }

    fn dispatch(&self, notice: Notice) {
        tracing::debug!(severity = notice.severity(), "emitting deprecation notice");
        self.sink.emit(&notice);
    }
}

impl Deprecated<DynSink> {
    /// Build an emitter from loaded configuration
    ///
    /// Fails if the hook names in `config` are ambiguous.
    pub fn from_config(config: &DeprecateConfig) -> DeprecationResult<Self> {
        let sink: DynSink = match config.output.sink {
            SinkKind::Stderr => Box::new(StderrSink::new(color_mode(config.output.color))),
            SinkKind::Tracing => Box::new(TracingSink),
        };

        Ok(Self::new(sink).with_resolver(resolver_from_config(config)?))
    }
}

fn color_mode(setting: ColorSetting) -> ColorMode {
    match setting {
        ColorSetting::Auto => ColorMode::Auto,
        ColorSetting::Always => ColorMode::Always,
        ColorSetting::Never => ColorMode::Never,
    }
}

fn resolver_from_config(config: &DeprecateConfig) -> DeprecationResult<Resolver> {
    let names = &config.resolver.hooks;
    let overrides = [
        (DispatchHook::Get, &names.get),
        (DispatchHook::Set, &names.set),
        (DispatchHook::Isset, &names.isset),
        (DispatchHook::Unset, &names.unset),
        (DispatchHook::Call, &names.call),
        (DispatchHook::CallStatic, &names.call_static),
        (DispatchHook::Construct, &names.construct),
    ];

    let hooks = HookTable::default().with_names(
        overrides
            .into_iter()
            .filter_map(|(hook, name)| name.clone().map(|name| (hook, name))),
    )?;

    Ok(Resolver::new(
        config.facility().unwrap_or(DEFAULT_FACILITY),
        hooks,
    ))
}
