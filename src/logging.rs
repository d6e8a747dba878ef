//! Logging facade.
//!
//! The router logs through a handful of macros that forward to the
//! [`log`](https://docs.rs/log) crate or the [`tracing`](https://docs.rs/tracing)
//! crate, whichever feature is on. Enable at most one of them; with neither,
//! the macros expand to nothing.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Levels used by the router:
//!
//! - `trace_log!`: per-route match attempts and cache lookups.
//! - `debug_log!`: resolved routes and skipped navigations.
//! - `info_log!`: dispatched pages.
//! - `warn_log!`: URLs outside the configured root.
//! - `error_log!`: rejected route patterns.
//!
//! ```ignore
//! use learners_router::{debug_log, info_log};
//!
//! debug_log!("Resolved '{}' to {}", fragment, page);
//! info_log!("Dispatched {}", page.handler_name());
//! ```

/// Emit a **trace**-level message through the active backend.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Emit a **debug**-level message through the active backend.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// Emit an **info**-level message through the active backend.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Emit a **warn**-level message through the active backend.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// Emit an **error**-level message through the active backend.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}
