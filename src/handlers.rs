//! Ready-made handlers that forward prepared messages to other logging
//! systems.
//!
//! The library never writes output itself. These adapters let an application
//! reuse an existing `log` backend (for example a `log4rs` configuration) or a
//! `tracing` subscriber as the sink.

use crate::level::Level;
use crate::registry::LogHandler;

/// Maps a severity onto the `log` crate's levels.
///
/// `log` has no critical level, so `Critical` is reported as `Error`.
pub fn to_log_level(level: Level) -> log::Level {
    match level {
        Level::All => log::Level::Trace,
        Level::Debug => log::Level::Debug,
        Level::Info => log::Level::Info,
        Level::Warning => log::Level::Warn,
        Level::Error | Level::Critical | Level::None => log::Level::Error,
    }
}

/// Forwards each decorated message to the `log` facade.
///
/// # Examples
///
/// ```
/// # use log_helper::{LogContext, LogHelper};
/// # use log_helper::handlers::LogFacadeHandler;
/// let ctx = LogContext::new();
/// let helper = LogHelper::new_in(&ctx);
/// helper.register_callback(LogFacadeHandler::new("my_app"));
/// ```
#[derive(Debug, Clone)]
pub struct LogFacadeHandler {
    target: &'static str,
}

impl LogFacadeHandler {
    pub const fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogFacadeHandler {
    fn default() -> Self {
        Self::new("log_helper")
    }
}

impl LogHandler for LogFacadeHandler {
    fn handle(
        &self,
        message: &str,
        level: Level,
        _time_string: &str,
        file_name: &str,
        line: u32,
        _function_name: &str,
    ) {
        let level = to_log_level(level);
        if level > log::max_level() {
            return;
        }
        log::logger().log(
            &log::Record::builder()
                .args(format_args!("{}", message))
                .level(level)
                .target(self.target)
                .file(Some(file_name))
                .line(Some(line))
                .build(),
        );
    }
}

/// Forwards each decorated message as a `tracing` event with the call-site
/// metadata attached as fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHandler;

impl LogHandler for TracingHandler {
    fn handle(
        &self,
        message: &str,
        level: Level,
        time_string: &str,
        file_name: &str,
        line: u32,
        function_name: &str,
    ) {
        match level {
            Level::All => tracing::trace!(
                time = time_string,
                file = file_name,
                line,
                function = function_name,
                "{}",
                message
            ),
            Level::Debug => tracing::debug!(
                time = time_string,
                file = file_name,
                line,
                function = function_name,
                "{}",
                message
            ),
            Level::Info => tracing::info!(
                time = time_string,
                file = file_name,
                line,
                function = function_name,
                "{}",
                message
            ),
            Level::Warning => tracing::warn!(
                time = time_string,
                file = file_name,
                line,
                function = function_name,
                "{}",
                message
            ),
            Level::Error | Level::Critical | Level::None => tracing::error!(
                time = time_string,
                file = file_name,
                line,
                function = function_name,
                critical = level >= Level::Critical,
                "{}",
                message
            ),
        }
    }
}
