//! # Log Helper
//!
//! A small library that prepares log messages and hands them to handlers
//! supplied by the application:
//!
//! * **Formatting**: messages come from a literal string or from
//!   `format!`-style arguments, rendered into a fixed-size buffer that
//!   truncates instead of overflowing
//! * **Decoration**: each message gets a configurable prefix made of time,
//!   level, file, line and function name
//! * **Fan-out**: every registered handler receives the message, decorated
//!   with the settings of the helper that registered it
//!
//! Where the text ends up (console, file, network) is the handler's business.
//!
//! ## Main Components
//!
//! * `LogHelper`: per-instance format settings and handler registration;
//!   dropping a helper unregisters its handlers
//! * `LogContext`: the registry and dispatcher shared by all helpers
//! * `Registry`: ordered `(id, owner, handler)` entries
//! * `MessageBuffer`: fixed-capacity text buffer used on the logging path
//! * Call-site macros: `log_info!`, `logf_info!` and friends for each level
//!
//! ## Quick Start
//!
//! ```
//! use log_helper::{logf_warning, log_info, FormatElement, Level};
//!
//! let id = log_helper::register_callback(
//!     |message: &str, _level: Level, _time: &str, _file: &str, _line: u32, _func: &str| {
//!         println!("{}", message);
//!     },
//! );
//!
//! log_helper::set_message_format(&[FormatElement::Level, FormatElement::Function]);
//! log_info!("this is without args");
//! logf_warning!("you are about to get {} errors", 2);
//!
//! log_helper::unregister_callback(id);
//! ```

pub mod context;
pub mod error;
pub mod format;
pub mod handlers;
pub mod level;
pub mod location;
pub mod log_helper;
pub mod message_buffer;
pub mod registry;

mod macros;

pub use context::LogContext;
pub use error::ParseError;
pub use format::{
    decorate, parse_format_list, FormatConfig, FormatElement, LogSite, DEFAULT_MESSAGE_FORMAT,
    DEFAULT_TIME_FORMAT,
};
pub use level::{level_text, Level, LEVEL_LIMIT};
pub use location::extract_file_name;
pub use log_helper::{
    register_callback, set_message_format, set_time_format, time_format, unregister_callback,
    LogHelper, DEFAULT_LOG_HELPER,
};
pub use message_buffer::{MessageBuffer, DEFAULT_MSG_BUFFER_LEN, MSG_BUFFER_LEN, TIME_BUFFER_LEN};
pub use registry::{CallbackId, LogHandler, OwnerId, Registration, Registry};
