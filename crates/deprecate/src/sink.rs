//! Sink dispatch
//!
//! Every notice is handed to exactly one [`WarningSink`] call, synchronously,
//! tagged with the `deprecation` severity so consumers can filter on it apart
//! from ordinary warnings and errors.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Severity tag attached to every notice
pub const DEPRECATION: &str = "deprecation";

/// A composed (or raw) deprecation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> &'static str {
        DEPRECATION
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// External warning channel
pub trait WarningSink {
    fn emit(&self, notice: &Notice);
}

impl<T: WarningSink + ?Sized> WarningSink for Box<T> {
    fn emit(&self, notice: &Notice) {
        (**self).emit(notice)
    }
}

impl<T: WarningSink + ?Sized> WarningSink for &T {
    fn emit(&self, notice: &Notice) {
        (**self).emit(notice)
    }
}

/// Records messages in emission order; the intercepting handler for tests
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Remove and return the recorded messages
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A panicking test thread must not hide earlier notices
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WarningSink for CollectingSink {
    fn emit(&self, notice: &Notice) {
        self.lock().push(notice.message().to_string());
    }
}

/// Handler-style sink wrapping a closure
pub struct FnSink<F>(F);

impl<F: Fn(&str, &str)> FnSink<F> {
    /// `handler` receives `(severity, message)`
    pub fn new(handler: F) -> Self {
        Self(handler)
    }
}

impl<F: Fn(&str, &str)> WarningSink for FnSink<F> {
    fn emit(&self, notice: &Notice) {
        (self.0)(notice.severity(), notice.message())
    }
}

/// Color mode for terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Always,
    Never,
    Auto,
}

impl ColorMode {
    /// Resolve to a termcolor ColorChoice
    pub fn to_color_choice(self) -> ColorChoice {
        // Always respect NO_COLOR (https://no-color.org)
        if std::env::var("NO_COLOR").is_ok() {
            return ColorChoice::Never;
        }
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto => ColorChoice::Auto,
        }
    }
}

/// Writes `deprecation: <message>` lines to standard error
#[derive(Debug, Clone, Copy)]
pub struct StderrSink {
    color_mode: ColorMode,
}

impl StderrSink {
    pub fn new(color_mode: ColorMode) -> Self {
        Self { color_mode }
    }

    /// Write one notice line to any color-aware writer
    pub fn write_notice(w: &mut impl WriteColor, notice: &Notice) -> std::io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(w, "{}", notice.severity())?;
        w.reset()?;
        writeln!(w, ": {}", notice.message())
    }

    /// Write a notice, logging instead of failing when the writer errors
    fn emit_to(w: &mut impl WriteColor, notice: &Notice) {
        if let Err(e) = Self::write_notice(w, notice) {
            tracing::debug!(
                notice = notice.message(),
                "Failed to write deprecation notice to stderr: {}",
                e
            );
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl WarningSink for StderrSink {
    fn emit(&self, notice: &Notice) {
        let mut stream = StandardStream::stderr(self.color_mode.to_color_choice());
        Self::emit_to(&mut stream, notice);
    }
}

/// Emits `tracing` warnings with target `deprecation`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn emit(&self, notice: &Notice) {
        tracing::warn!(target: "deprecation", "{}", notice.message());
    }
}
