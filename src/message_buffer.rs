//! Fixed-capacity text buffers used while preparing a log message.
//!
//! Every dispatch renders the caller's message and each decorated variant
//! into a `MessageBuffer` living on the stack. Writes past the capacity are
//! cut off at the last complete UTF-8 character; nothing ever overflows and
//! nothing ever fails.

use std::fmt;

/// Default capacity of the message buffers in bytes.
pub const DEFAULT_MSG_BUFFER_LEN: usize = 240;

/// Capacity used for raw and decorated messages.
///
/// All `MSG_BUFFER_LEN` bytes hold text; there is no terminator slot, so a
/// message keeps one byte more than a NUL-terminated buffer of the same size.
///
/// Set `LOG_HELPER_MSG_BUFFER_LEN` at build time to override it. Values that
/// do not parse as a positive decimal number fall back to
/// [`DEFAULT_MSG_BUFFER_LEN`].
pub const MSG_BUFFER_LEN: usize = match option_env!("LOG_HELPER_MSG_BUFFER_LEN") {
    Some(value) => parse_buffer_len(value, DEFAULT_MSG_BUFFER_LEN),
    None => DEFAULT_MSG_BUFFER_LEN,
};

/// Capacity of the rendered time string handed to handlers.
pub const TIME_BUFFER_LEN: usize = 50;

// Compile-time parsing of the buffer length override
#[doc(hidden)]
pub const fn parse_buffer_len(s: &str, fallback: usize) -> usize {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return fallback;
    }

    let mut value: usize = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return fallback;
        }
        value = match value.checked_mul(10) {
            Some(v) => match v.checked_add((b - b'0') as usize) {
                Some(v) => v,
                None => return fallback,
            },
            None => return fallback,
        };
        i += 1;
    }

    if value == 0 {
        fallback
    } else {
        value
    }
}

/// A stack buffer of `CAP` bytes holding valid UTF-8.
///
/// # Examples
///
/// ```
/// # use log_helper::MessageBuffer;
/// let mut buf = MessageBuffer::<8>::new();
/// assert!(!buf.render_str("hello, world"));
/// assert_eq!(buf.as_str(), "hello, w");
/// assert!(buf.is_truncated());
/// ```
pub struct MessageBuffer<const CAP: usize> {
    data: [u8; CAP],
    len: usize,
    truncated: bool,
}

impl<const CAP: usize> MessageBuffer<CAP> {
    /// Creates an empty buffer.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            data: [0u8; CAP],
            len: 0,
            truncated: false,
        }
    }

    /// Capacity in bytes.
    pub const fn capacity(&self) -> usize {
        CAP
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether some written text did not fit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// True once the buffer accepts no further text.
    pub fn is_full(&self) -> bool {
        self.truncated || self.len >= CAP
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }

    pub fn as_str(&self) -> &str {
        // Only whole UTF-8 sequences are ever copied in, see `push_str`.
        unsafe { std::str::from_utf8_unchecked(&self.data[..self.len]) }
    }

    /// Appends as much of `s` as fits. Returns `false` if anything was cut.
    ///
    /// After the first cut the buffer stays sealed, so a short write that
    /// would still fit cannot land after a gap.
    pub fn push_str(&mut self, s: &str) -> bool {
        if self.truncated {
            return s.is_empty();
        }

        let room = CAP - self.len;
        let mut take = s.len();
        if take > room {
            take = room;
            while !s.is_char_boundary(take) {
                take -= 1;
            }
            self.truncated = true;
        }

        self.data[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        !self.truncated
    }

    /// Replaces the contents with `message`, taken literally.
    ///
    /// This is the simple-string path: `message` is never interpreted as a
    /// format string. Returns `false` if the message was truncated.
    pub fn render_str(&mut self, message: &str) -> bool {
        self.clear();
        self.push_str(message)
    }

    /// Replaces the contents with the rendered `args`.
    ///
    /// Returns `false` if the output was truncated.
    pub fn render_args(&mut self, args: fmt::Arguments<'_>) -> bool {
        self.clear();
        match args.as_str() {
            Some(literal) => self.push_str(literal),
            None => {
                let _ = fmt::Write::write_fmt(self, args);
                !self.truncated
            }
        }
    }
}

impl<const CAP: usize> Default for MessageBuffer<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> fmt::Write for MessageBuffer<CAP> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl<const CAP: usize> fmt::Display for MessageBuffer<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const CAP: usize> fmt::Debug for MessageBuffer<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuffer")
            .field("capacity", &CAP)
            .field("text", &self.as_str())
            .field("truncated", &self.truncated)
            .finish()
    }
}
