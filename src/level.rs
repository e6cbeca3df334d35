use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// Severity of a log message.
///
/// `All` and `None` are floor and ceiling sentinels used for the compile-time
/// limit; they are never shown as the level of a dispatched message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    All = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    None = 6,
}

/// Display names, indexed by `Level as usize`.
const LEVEL_TEXT: [&str; 7] = [
    "ALL",
    "DEBUG",
    "INFO",
    "WARNING",
    "ERROR",
    "CRITICAL",
    "NONE",
];

/// Lowest level that the call-site macros still emit.
///
/// Selected at build time through the `level_limit_*` cargo features. When
/// several are enabled the highest one wins. Macros compare against this
/// constant, so anything below it folds away to nothing.
pub const LEVEL_LIMIT: Level = if cfg!(feature = "level_limit_none") {
    Level::None
} else if cfg!(feature = "level_limit_critical") {
    Level::Critical
} else if cfg!(feature = "level_limit_error") {
    Level::Error
} else if cfg!(feature = "level_limit_warning") {
    Level::Warning
} else if cfg!(feature = "level_limit_info") {
    Level::Info
} else if cfg!(feature = "level_limit_debug") {
    Level::Debug
} else {
    Level::All
};

impl Level {
    /// Every level, in ascending order.
    pub const ALL_LEVELS: [Level; 7] = [
        Level::All,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::None,
    ];

    /// Converts a raw severity value. Values past `None` saturate to `None`.
    pub const fn from_repr(value: u8) -> Level {
        match value {
            0 => Level::All,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warning,
            4 => Level::Error,
            5 => Level::Critical,
            _ => Level::None,
        }
    }

    /// Display text for a message logged at this level.
    ///
    /// The sentinels are clamped: `All` reads as `DEBUG`, `None` as `CRITICAL`.
    pub const fn text(self) -> &'static str {
        let clamped = if (self as u8) < (Level::Debug as u8) {
            Level::Debug
        } else if (self as u8) > (Level::Critical as u8) {
            Level::Critical
        } else {
            self
        };
        LEVEL_TEXT[clamped as usize]
    }

    /// The unclamped table name, including the sentinels.
    pub const fn name(self) -> &'static str {
        LEVEL_TEXT[self as usize]
    }

    /// Whether call-site macros at this level survive [`LEVEL_LIMIT`].
    #[inline(always)]
    pub const fn is_enabled(self) -> bool {
        self.enabled_at(LEVEL_LIMIT)
    }

    /// Whether this level passes a floor of `limit`.
    #[inline(always)]
    pub const fn enabled_at(self, limit: Level) -> bool {
        (self as u8) >= (limit as u8)
    }
}

/// Clamped display text for `level`. See [`Level::text`].
pub const fn level_text(level: Level) -> &'static str {
    level.text()
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let level = if s.eq_ignore_ascii_case("all") {
            Level::All
        } else if s.eq_ignore_ascii_case("debug") {
            Level::Debug
        } else if s.eq_ignore_ascii_case("info") {
            Level::Info
        } else if s.eq_ignore_ascii_case("warning") || s.eq_ignore_ascii_case("warn") {
            Level::Warning
        } else if s.eq_ignore_ascii_case("error") {
            Level::Error
        } else if s.eq_ignore_ascii_case("critical") || s.eq_ignore_ascii_case("crit") {
            Level::Critical
        } else if s.eq_ignore_ascii_case("none") {
            Level::None
        } else {
            return Err(ParseError::UnknownLevel(s.to_string()));
        };
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_clamps_sentinels() {
        assert_eq!(Level::All.text(), "DEBUG");
        assert_eq!(Level::None.text(), "CRITICAL");
        assert_eq!(level_text(Level::from_repr(200)), "CRITICAL");
    }

    #[test]
    fn test_text_for_emitted_levels() {
        assert_eq!(Level::Debug.text(), "DEBUG");
        assert_eq!(Level::Info.text(), "INFO");
        assert_eq!(Level::Warning.text(), "WARNING");
        assert_eq!(Level::Error.text(), "ERROR");
        assert_eq!(Level::Critical.text(), "CRITICAL");
    }

    #[test]
    fn test_ordering_matches_repr() {
        for pair in Level::ALL_LEVELS.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(Level::from_repr(pair[1] as u8), pair[1]);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!(" CRITICAL ".parse::<Level>().unwrap(), Level::Critical);
        assert_eq!("None".parse::<Level>().unwrap(), Level::None);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_warning_floor() {
        const LIMIT: Level = Level::Warning;
        const DEBUG_PASSES: bool = Level::Debug.enabled_at(LIMIT);
        assert!(!DEBUG_PASSES);
        assert!(!Level::Info.enabled_at(LIMIT));
        assert!(Level::Warning.enabled_at(LIMIT));
        assert!(Level::Error.enabled_at(LIMIT));
        assert!(Level::Critical.enabled_at(LIMIT));
    }

    #[test]
    fn test_none_floor_suppresses_every_emitted_level() {
        for level in &Level::ALL_LEVELS[1..6] {
            assert!(!level.enabled_at(Level::None));
            assert!(level.enabled_at(Level::All));
        }
    }

    #[test]
    fn test_is_enabled_follows_limit() {
        for level in Level::ALL_LEVELS {
            assert_eq!(level.is_enabled(), level.enabled_at(LEVEL_LIMIT));
        }
    }

    #[test]
    fn test_default_limit_enables_everything() {
        if cfg!(any(
            feature = "level_limit_debug",
            feature = "level_limit_info",
            feature = "level_limit_warning",
            feature = "level_limit_error",
            feature = "level_limit_critical",
            feature = "level_limit_none"
        )) {
            return;
        }
        assert_eq!(LEVEL_LIMIT, Level::All);
        assert!(Level::Debug.is_enabled());
    }
}
