use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;

use crate::context::LogContext;
use crate::format::FormatElement;
use crate::level::Level;
use crate::registry::{CallbackId, LogHandler, OwnerId};

lazy_static! {
    /// The helper used by the call-site macros and the crate-level functions.
    ///
    /// It lives for the whole process, so its registrations are only removed
    /// by [`unregister_callback`] or [`LogContext::clear`].
    pub static ref DEFAULT_LOG_HELPER: LogHelper<'static> = LogHelper::new();
}

/// Prepares log messages and fans them out to registered handlers.
///
/// A `LogHelper` carries the format settings applied to the handlers it
/// registered. Logging through any helper reaches *every* handler in the
/// context; each handler gets the message decorated with its own owner's
/// settings.
///
/// Dropping a helper unregisters all handlers it registered.
///
/// # Examples
///
/// ```
/// use log_helper::{FormatElement, Level, LogContext, LogHelper};
/// use std::sync::{Arc, Mutex};
///
/// let ctx = LogContext::new();
/// let helper = LogHelper::new_in(&ctx);
/// helper.set_message_format(&[FormatElement::Level, FormatElement::FilenameLine]);
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// helper.register_callback(move |msg: &str, _: Level, _: &str, _: &str, _: u32, _: &str| {
///     sink.lock().unwrap().push(msg.to_string());
/// });
///
/// helper.logf(Level::Info, "src/app.rs", 7, "main", format_args!("{} apples", 3));
/// assert_eq!(seen.lock().unwrap()[0], "[INFO][app.rs:7]: 3 apples");
/// ```
pub struct LogHelper<'ctx> {
    ctx: &'ctx LogContext,
    owner: OwnerId,
}

impl LogHelper<'static> {
    /// Creates a helper in the process-wide context.
    pub fn new() -> Self {
        Self::new_in(LogContext::global())
    }
}

impl<'ctx> LogHelper<'ctx> {
    /// Creates a helper in `ctx` with the default format settings.
    pub fn new_in(ctx: &'ctx LogContext) -> Self {
        Self {
            ctx,
            owner: ctx.add_owner(),
        }
    }

    pub fn context(&self) -> &'ctx LogContext {
        self.ctx
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner
    }

    /// Registers `handler`; it is called for every dispatched message until
    /// it is unregistered or this helper is dropped.
    pub fn register_callback(&self, handler: impl LogHandler + 'static) -> CallbackId {
        self.ctx.register(self.owner, Arc::new(handler))
    }

    /// Registers a handler that is shared with other owners or callers.
    pub fn register_shared_callback(&self, handler: Arc<dyn LogHandler>) -> CallbackId {
        self.ctx.register(self.owner, handler)
    }

    /// Removes the registration `id`. Unknown ids are ignored.
    ///
    /// Ids are unique per context, so this also removes a registration made
    /// through another helper.
    pub fn unregister_callback(&self, id: CallbackId) {
        self.ctx.unregister(id);
    }

    /// The strftime pattern used for [`FormatElement::Time`].
    pub fn time_format(&self) -> String {
        self.ctx.time_format(self.owner)
    }

    /// Sets the strftime pattern for [`FormatElement::Time`]. An empty
    /// pattern disables the time element.
    pub fn set_time_format(&self, time_format: impl Into<String>) {
        self.ctx.set_time_format(self.owner, time_format.into());
    }

    pub fn message_format(&self) -> Vec<FormatElement> {
        self.ctx.message_format(self.owner)
    }

    /// Sets the decoration elements in rendering order. An empty list sends
    /// the bare message.
    pub fn set_message_format(&self, elements: &[FormatElement]) {
        self.ctx.set_message_format(self.owner, elements);
    }

    /// Logs `message` literally, without any format interpretation.
    pub fn log(&self, level: Level, file: &str, line: u32, function: &str, message: &str) {
        self.ctx.dispatch_str(level, file, line, function, message);
    }

    /// Logs pre-captured format arguments, usually built with `format_args!`.
    pub fn logf(&self, level: Level, file: &str, line: u32, function: &str, args: fmt::Arguments<'_>) {
        self.ctx.dispatch_args(level, file, line, function, args);
    }
}

impl Default for LogHelper<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogHelper<'_> {
    fn drop(&mut self) {
        self.ctx.remove_owner(self.owner);
    }
}

impl fmt::Debug for LogHelper<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHelper").field("owner", &self.owner).finish()
    }
}

/// Registers `handler` with the default helper.
pub fn register_callback(handler: impl LogHandler + 'static) -> CallbackId {
    DEFAULT_LOG_HELPER.register_callback(handler)
}

/// Removes a registration from the process-wide context.
pub fn unregister_callback(id: CallbackId) {
    DEFAULT_LOG_HELPER.unregister_callback(id);
}

/// Sets the element list of the default helper. `&[]` sends bare messages.
pub fn set_message_format(elements: &[FormatElement]) {
    DEFAULT_LOG_HELPER.set_message_format(elements);
}

/// Sets the time pattern of the default helper. `""` disables the time.
pub fn set_time_format(time_format: impl Into<String>) {
    DEFAULT_LOG_HELPER.set_time_format(time_format);
}

pub fn time_format() -> String {
    DEFAULT_LOG_HELPER.time_format()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{DEFAULT_MESSAGE_FORMAT, DEFAULT_TIME_FORMAT};

    #[test]
    fn test_defaults() {
        let ctx = LogContext::new();
        let helper = LogHelper::new_in(&ctx);
        assert_eq!(helper.time_format(), DEFAULT_TIME_FORMAT);
        assert_eq!(helper.message_format(), DEFAULT_MESSAGE_FORMAT.to_vec());
    }

    #[test]
    fn test_settings_are_per_helper() {
        let ctx = LogContext::new();
        let a = LogHelper::new_in(&ctx);
        let b = LogHelper::new_in(&ctx);
        a.set_time_format("");
        a.set_message_format(&[FormatElement::Line]);
        assert_eq!(a.time_format(), "");
        assert_eq!(a.message_format(), vec![FormatElement::Line]);
        assert_eq!(b.time_format(), DEFAULT_TIME_FORMAT);
        assert_ne!(a.owner_id(), b.owner_id());
    }

    #[test]
    fn test_drop_purges_registrations() {
        let ctx = LogContext::new();
        let keep = LogHelper::new_in(&ctx);
        let kept = keep.register_callback(|_: &str, _: Level, _: &str, _: &str, _: u32, _: &str| {});
        {
            let scoped = LogHelper::new_in(&ctx);
            scoped.register_callback(|_: &str, _: Level, _: &str, _: &str, _: u32, _: &str| {});
            scoped.register_callback(|_: &str, _: Level, _: &str, _: &str, _: u32, _: &str| {});
            assert_eq!(ctx.len(), 3);
        }
        assert_eq!(ctx.registered_ids(), vec![kept]);
    }
}
