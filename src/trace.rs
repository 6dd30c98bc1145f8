//! Tracing shims that compile away when the `tracing` feature is off.
//!
//! Detection runs once per rendering tick, so events are emitted at debug
//! level to keep default subscribers quiet.

/// Opens a debug-level span around a detection phase.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::debug_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::DisabledSpan
    };
}

/// Emits a debug-level event with key measurements.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::debug!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        { let _ = ($($value,)+); }
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Stand-in span guard so call sites can write
/// `let _guard = trace_span!(..).entered();` unconditionally.
#[cfg(not(feature = "tracing"))]
pub struct DisabledSpan;

#[cfg(not(feature = "tracing"))]
impl DisabledSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
