//! Handler registry for log message fan-out.
//!
//! A registry keeps `(id, owner, handler)` triples in insertion order. Ids
//! come from a counter that only ever moves forward, so an id is never handed
//! out twice. The owner is stored as an [`OwnerId`] handle rather than a
//! reference: the registry never keeps a helper alive, and an entry whose
//! owner is gone can no longer be resolved.

use std::fmt;
use std::sync::Arc;

use crate::level::Level;

/// Receives every decorated log message.
///
/// Implementations decide what happens with the text: print it, write it to a
/// file, forward it to another logging system. All string arguments are only
/// borrowed for the duration of the call; copy them to keep them.
///
/// Closures with the matching signature implement this trait:
///
/// ```
/// # use log_helper::{Level, LogHandler};
/// fn assert_handler<H: LogHandler>(_: H) {}
///
/// assert_handler(|message: &str, _level: Level, _time: &str, _file: &str, _line: u32, _func: &str| {
///     println!("{}", message);
/// });
/// ```
pub trait LogHandler: Send + Sync {
    /// Handles one decorated message.
    ///
    /// # Arguments
    ///
    /// * `message` - The message with its owner's decoration prefix
    /// * `level` - The level passed by the call site
    /// * `time_string` - The rendered time, empty if the owner's format has no time
    /// * `file_name` - Source file name without directories
    /// * `line` - Source line
    /// * `function_name` - Name of the calling function
    fn handle(
        &self,
        message: &str,
        level: Level,
        time_string: &str,
        file_name: &str,
        line: u32,
        function_name: &str,
    );
}

impl<F> LogHandler for F
where
    F: Fn(&str, Level, &str, &str, u32, &str) + Send + Sync,
{
    fn handle(
        &self,
        message: &str,
        level: Level,
        time_string: &str,
        file_name: &str,
        line: u32,
        function_name: &str,
    ) {
        self(message, level, time_string, file_name, line, function_name)
    }
}

/// Identifier of one handler registration.
///
/// Ids are 64 bits wide so the counter cannot wrap within a process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackId(pub u64);

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of a helper that owns registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(pub u64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One registry entry. Entries are never modified after insertion.
#[derive(Clone)]
pub struct Registration {
    pub id: CallbackId,
    pub owner: OwnerId,
    pub handler: Arc<dyn LogHandler>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Ordered set of active registrations.
///
/// # Examples
///
/// ```
/// # use log_helper::{Level, OwnerId, Registry};
/// let mut registry = Registry::new();
/// let owner = OwnerId(1);
/// let id = registry.register(owner, |_: &str, _: Level, _: &str, _: &str, _: u32, _: &str| {});
/// assert_eq!(registry.len(), 1);
///
/// registry.unregister(id);
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Registration>,
    next_id: u64,
}

impl Registry {
    /// Creates an empty registry with the id counter at 0.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Appends a registration and returns its freshly allocated id.
    pub fn register(&mut self, owner: OwnerId, handler: impl LogHandler + 'static) -> CallbackId {
        self.register_shared(owner, Arc::new(handler))
    }

    /// Like [`Registry::register`] for a handler that is already shared.
    pub fn register_shared(&mut self, owner: OwnerId, handler: Arc<dyn LogHandler>) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.entries.push(Registration { id, owner, handler });
        id
    }

    /// Removes the registration with `id`. Unknown ids are ignored.
    ///
    /// Returns whether an entry was removed.
    pub fn unregister(&mut self, id: CallbackId) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every registration owned by `owner`, keeping the order of the
    /// rest. Returns the number of removed entries.
    pub fn purge_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.owner != owner);
        before - self.entries.len()
    }

    /// Visits every registration in insertion order.
    pub fn for_each(&self, mut visit: impl FnMut(&Registration)) {
        for entry in &self.entries {
            visit(entry);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> + '_ {
        self.entries.iter()
    }

    /// Ids of all registrations in insertion order.
    pub fn ids(&self) -> Vec<CallbackId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all registrations. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
