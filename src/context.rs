//! The shared state behind all helpers.
//!
//! A [`LogContext`] owns the handler [`Registry`], the format settings of
//! every live helper (keyed by [`OwnerId`]) and the dispatch routine. One
//! process-wide context backs the default helper; tests and embedders can
//! create private ones.
//!
//! # Thread Safety
//!
//! All state sits behind a reentrant lock. A dispatch keeps the lock from the
//! registry check until the last handler returns, so two dispatches never
//! interleave. Handlers run without any borrow of the state held: they may
//! register, unregister or drop helpers, and those changes apply from the next
//! dispatch on. A log call made while a dispatch is running on the same thread
//! (from a handler or from a `Display` impl of a log argument) is dropped.
//!
//! Internal `tracing` events are emitted only while no borrow is held, so a
//! subscriber may query or log into the context it observes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::Local;
use lazy_static::lazy_static;
use parking_lot::ReentrantMutex;

use crate::format::{decorate, FormatConfig, FormatElement, LogSite};
use crate::level::Level;
use crate::location::extract_file_name;
use crate::message_buffer::{MessageBuffer, MSG_BUFFER_LEN, TIME_BUFFER_LEN};
use crate::registry::{CallbackId, LogHandler, OwnerId, Registry};

lazy_static! {
    /// Context of the default helper and the crate-level functions.
    static ref GLOBAL_CONTEXT: LogContext = LogContext::new();
}

struct ContextState {
    registry: Registry,
    /// Format settings of live owners. An owner missing here is gone, and
    /// registrations still naming it are skipped.
    owners: HashMap<OwnerId, FormatConfig>,
    next_owner: u64,
    dispatching: bool,
}

/// Registry, owner table and dispatcher in one lockable unit.
pub struct LogContext {
    state: ReentrantMutex<RefCell<ContextState>>,
}

/// A handler together with the text prepared for it.
struct PreparedCall {
    handler: Arc<dyn LogHandler>,
    message: MessageBuffer<MSG_BUFFER_LEN>,
    time: MessageBuffer<TIME_BUFFER_LEN>,
}

/// Clears the in-dispatch flag, also when a handler panics.
struct DispatchGuard<'a> {
    state: &'a RefCell<ContextState>,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.dispatching = false;
        }
    }
}

impl LogContext {
    /// Creates an empty context: no owners, no registrations, counters at 0.
    pub fn new() -> Self {
        Self {
            state: ReentrantMutex::new(RefCell::new(ContextState {
                registry: Registry::new(),
                owners: HashMap::new(),
                next_owner: 0,
                dispatching: false,
            })),
        }
    }

    /// The process-wide context.
    pub fn global() -> &'static LogContext {
        &GLOBAL_CONTEXT
    }

    // `f` must not emit tracing events: a subscriber may re-enter the context.
    fn with_state<R>(&self, f: impl FnOnce(&mut ContextState) -> R) -> R {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        f(&mut *state)
    }

    /// Number of active registrations.
    pub fn len(&self) -> usize {
        self.with_state(|state| state.registry.len())
    }

    pub fn is_empty(&self) -> bool {
        self.with_state(|state| state.registry.is_empty())
    }

    /// Ids of all active registrations, in dispatch order.
    pub fn registered_ids(&self) -> Vec<CallbackId> {
        self.with_state(|state| state.registry.ids())
    }

    /// Removes every registration. Owners stay alive and keep their format
    /// settings; logging afterwards is a no-op until a handler is registered.
    pub fn clear(&self) {
        self.with_state(|state| state.registry.clear());
        tracing::debug!("log context cleared");
    }

    pub(crate) fn add_owner(&self) -> OwnerId {
        let owner = self.with_state(|state| {
            let owner = OwnerId(state.next_owner);
            state.next_owner += 1;
            state.owners.insert(owner, FormatConfig::default());
            owner
        });
        tracing::debug!(%owner, "log helper created");
        owner
    }

    /// Forgets `owner` and purges all of its registrations.
    pub(crate) fn remove_owner(&self, owner: OwnerId) {
        let purged = self.with_state(|state| {
            state.owners.remove(&owner);
            state.registry.purge_owner(owner)
        });
        tracing::debug!(%owner, purged, "log helper dropped");
    }

    pub(crate) fn register(&self, owner: OwnerId, handler: Arc<dyn LogHandler>) -> CallbackId {
        let id = self.with_state(|state| state.registry.register_shared(owner, handler));
        tracing::trace!(%id, %owner, "handler registered");
        id
    }

    pub(crate) fn unregister(&self, id: CallbackId) {
        if self.with_state(|state| state.registry.unregister(id)) {
            tracing::trace!(%id, "handler unregistered");
        }
    }

    pub(crate) fn time_format(&self, owner: OwnerId) -> String {
        self.with_state(|state| {
            state
                .owners
                .get(&owner)
                .map(|config| config.time_format.clone())
                .unwrap_or_default()
        })
    }

    pub(crate) fn set_time_format(&self, owner: OwnerId, time_format: String) {
        self.with_state(|state| {
            if let Some(config) = state.owners.get_mut(&owner) {
                config.time_format = time_format;
            }
        });
    }

    pub(crate) fn message_format(&self, owner: OwnerId) -> Vec<FormatElement> {
        self.with_state(|state| {
            state
                .owners
                .get(&owner)
                .map(|config| config.elements.clone())
                .unwrap_or_default()
        })
    }

    pub(crate) fn set_message_format(&self, owner: OwnerId, elements: &[FormatElement]) {
        self.with_state(|state| {
            if let Some(config) = state.owners.get_mut(&owner) {
                config.elements = elements.to_vec();
            }
        });
    }

    /// Dispatches `message` as is. It is never treated as a format string.
    pub fn dispatch_str(&self, level: Level, file_path: &str, line: u32, function: &str, message: &str) {
        self.dispatch(level, file_path, line, function, |buf| {
            buf.render_str(message);
        });
    }

    /// Renders `args` and dispatches the result.
    pub fn dispatch_args(
        &self,
        level: Level,
        file_path: &str,
        line: u32,
        function: &str,
        args: fmt::Arguments<'_>,
    ) {
        self.dispatch(level, file_path, line, function, |buf| {
            buf.render_args(args);
        });
    }

    /// Renders the raw message and hands one decorated copy to every
    /// registered handler, decorated with the settings of that handler's
    /// owner. Does nothing, rendering included, without registrations.
    fn dispatch(
        &self,
        level: Level,
        file_path: &str,
        line: u32,
        function: &str,
        render: impl FnOnce(&mut MessageBuffer<MSG_BUFFER_LEN>),
    ) {
        let guard = self.state.lock();
        let cell: &RefCell<ContextState> = &guard;

        {
            let mut state = cell.borrow_mut();
            if state.registry.is_empty() || state.dispatching {
                return;
            }
            state.dispatching = true;
        }
        let _dispatching = DispatchGuard { state: cell };

        let mut message = MessageBuffer::<MSG_BUFFER_LEN>::new();
        render(&mut message);

        let site = LogSite {
            level,
            file_name: extract_file_name(file_path),
            line,
            function,
        };
        let now = Local::now();

        let mut invalid_time = false;
        let calls: Vec<PreparedCall> = {
            let state = cell.borrow();
            state
                .registry
                .iter()
                .filter_map(|entry| {
                    let config = state.owners.get(&entry.owner)?;
                    let mut call = PreparedCall {
                        handler: Arc::clone(&entry.handler),
                        message: MessageBuffer::new(),
                        time: MessageBuffer::new(),
                    };
                    if !decorate(&mut call.message, &mut call.time, config, &now, &site, message.as_str()) {
                        invalid_time = true;
                    }
                    Some(call)
                })
                .collect()
        };
        if invalid_time {
            tracing::trace!("invalid time format, time element skipped");
        }

        for call in &calls {
            call.handler.handle(
                call.message.as_str(),
                level,
                call.time.as_str(),
                site.file_name,
                line,
                function,
            );
        }
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.state.lock();
        let result = match guard.try_borrow() {
            Ok(state) => f
                .debug_struct("LogContext")
                .field("registrations", &state.registry.len())
                .field("owners", &state.owners.len())
                .finish(),
            Err(_) => f.debug_struct("LogContext").finish_non_exhaustive(),
        };
        result
    }
}
