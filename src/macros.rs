//! Call-site macros.
//!
//! Two families per level, both routed through [`DEFAULT_LOG_HELPER`]:
//!
//! * `log_debug!(message)` and friends take one string that is passed on
//!   literally, braces and all.
//! * `logf_debug!(fmt, args...)` and friends take `format!`-style arguments,
//!   checked at compile time.
//!
//! Both capture `file!()`, `line!()` and the enclosing function name. Levels
//! below [`LEVEL_LIMIT`] expand to a constant-false branch, so their arguments
//! are never evaluated.
//!
//! [`DEFAULT_LOG_HELPER`]: crate::DEFAULT_LOG_HELPER
//! [`LEVEL_LIMIT`]: crate::LEVEL_LIMIT

/// Name of the enclosing function, without its module path.
///
/// # Examples
///
/// ```
/// fn handle_request() -> &'static str {
///     log_helper::function_name!()
/// }
/// assert_eq!(handle_request(), "handle_request");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::location::trim_function_name(type_name_of(__f))
    }};
}

/// Logs a literal message through a given helper.
///
/// ```
/// # use log_helper::{log_to, Level, LogContext, LogHelper};
/// let ctx = LogContext::new();
/// let helper = LogHelper::new_in(&ctx);
/// log_to!(helper, Level::Info, "no {} formatting here");
/// ```
#[macro_export]
macro_rules! log_to {
    ($helper:expr, $level:expr, $message:expr $(,)?) => {{
        let level: $crate::Level = $level;
        if level.is_enabled() {
            $helper.log(
                level,
                ::core::file!(),
                ::core::line!(),
                $crate::function_name!(),
                ::core::convert::AsRef::<str>::as_ref(&$message),
            );
        }
    }};
}

/// Logs `format!`-style arguments through a given helper.
///
/// ```
/// # use log_helper::{logf_to, Level, LogContext, LogHelper};
/// let ctx = LogContext::new();
/// let helper = LogHelper::new_in(&ctx);
/// logf_to!(helper, Level::Warning, "you are about to get {} errors", 2);
/// ```
#[macro_export]
macro_rules! logf_to {
    ($helper:expr, $level:expr, $($arg:tt)+) => {{
        let level: $crate::Level = $level;
        if level.is_enabled() {
            $helper.logf(
                level,
                ::core::file!(),
                ::core::line!(),
                $crate::function_name!(),
                ::core::format_args!($($arg)+),
            );
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_default {
    ($level:expr, $message:expr) => {{
        if $level.is_enabled() {
            $crate::DEFAULT_LOG_HELPER.log(
                $level,
                ::core::file!(),
                ::core::line!(),
                $crate::function_name!(),
                ::core::convert::AsRef::<str>::as_ref(&$message),
            );
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __logf_default {
    ($level:expr, $($arg:tt)+) => {{
        if $level.is_enabled() {
            $crate::DEFAULT_LOG_HELPER.logf(
                $level,
                ::core::file!(),
                ::core::line!(),
                $crate::function_name!(),
                ::core::format_args!($($arg)+),
            );
        }
    }};
}

/// Logs a literal message at `DEBUG`.
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(,)?) => {
        $crate::__log_default!($crate::Level::Debug, $message)
    };
}

/// Logs a formatted message at `DEBUG`.
#[macro_export]
macro_rules! logf_debug {
    ($($arg:tt)+) => {
        $crate::__logf_default!($crate::Level::Debug, $($arg)+)
    };
}

/// Logs a literal message at `INFO`.
#[macro_export]
macro_rules! log_info {
    ($message:expr $(,)?) => {
        $crate::__log_default!($crate::Level::Info, $message)
    };
}

/// Logs a formatted message at `INFO`.
#[macro_export]
macro_rules! logf_info {
    ($($arg:tt)+) => {
        $crate::__logf_default!($crate::Level::Info, $($arg)+)
    };
}

/// Logs a literal message at `WARNING`.
#[macro_export]
macro_rules! log_warning {
    ($message:expr $(,)?) => {
        $crate::__log_default!($crate::Level::Warning, $message)
    };
}

/// Logs a formatted message at `WARNING`.
#[macro_export]
macro_rules! logf_warning {
    ($($arg:tt)+) => {
        $crate::__logf_default!($crate::Level::Warning, $($arg)+)
    };
}

/// Logs a literal message at `ERROR`.
#[macro_export]
macro_rules! log_error {
    ($message:expr $(,)?) => {
        $crate::__log_default!($crate::Level::Error, $message)
    };
}

/// Logs a formatted message at `ERROR`.
#[macro_export]
macro_rules! logf_error {
    ($($arg:tt)+) => {
        $crate::__logf_default!($crate::Level::Error, $($arg)+)
    };
}

/// Logs a literal message at `CRITICAL`.
#[macro_export]
macro_rules! log_critical {
    ($message:expr $(,)?) => {
        $crate::__log_default!($crate::Level::Critical, $message)
    };
}

/// Logs a formatted message at `CRITICAL`.
#[macro_export]
macro_rules! logf_critical {
    ($($arg:tt)+) => {
        $crate::__logf_default!($crate::Level::Critical, $($arg)+)
    };
}
