//! Lazy log emission and stage timing on top of `tracing`.
//!
//! The `*_with` helpers only build their message when the level is enabled
//! for the current subscriber. The `*_measure` helpers run a stage, log
//! `"{stage} took {n} ms"` and hand back the elapsed time.

use std::error::Error;
use std::fmt::Display;
use std::time::{Duration, Instant};

use tracing::Level;

macro_rules! lazy_level {
    ($($(#[$meta:meta])* $name:ident => $level:expr;)+) => {$(
        $(#[$meta])*
        ///
        /// Returns `true` if the message was emitted.
        pub fn $name<M: Display>(
            error: Option<&(dyn Error + 'static)>,
            message: impl FnOnce() -> M,
        ) -> bool {
            if !tracing::enabled!($level) {
                return false;
            }
            match error {
                Some(error) => tracing::event!($level, error = %error, "{}", message()),
                None => tracing::event!($level, "{}", message()),
            }
            true
        }
    )+};
}

lazy_level! {
    /// Emit at `TRACE`, building the message only if enabled.
    trace_with => Level::TRACE;
    /// Emit at `DEBUG`, building the message only if enabled.
    debug_with => Level::DEBUG;
    /// Emit at `INFO`, building the message only if enabled.
    info_with => Level::INFO;
    /// Emit at `WARN`, building the message only if enabled.
    warn_with => Level::WARN;
    /// Emit at `ERROR`, building the message only if enabled.
    error_with => Level::ERROR;
}

/// Run `work` and return its result with the elapsed time.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn measure<T>(work: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = work();
    (result, start.elapsed())
}

/// Run `work`, log how long it took at `TRACE`.
pub fn trace_measure(stage: &str, work: impl FnOnce()) -> Duration {
    let ((), elapsed) = measure(work);
    trace_with(None, || format!("{stage} took {} ms", elapsed.as_millis()));
    elapsed
}

/// Run `work`, log how long it took at `DEBUG`.
pub fn debug_measure(stage: &str, work: impl FnOnce()) -> Duration {
    let ((), elapsed) = measure(work);
    debug_with(None, || format!("{stage} took {} ms", elapsed.as_millis()));
    elapsed
}

/// Run `work`, log how long it took at `INFO`.
pub fn info_measure(stage: &str, work: impl FnOnce()) -> Duration {
    let ((), elapsed) = measure(work);
    info_with(None, || format!("{stage} took {} ms", elapsed.as_millis()));
    elapsed
}
