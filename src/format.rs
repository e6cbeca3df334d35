//! Message decoration.
//!
//! Each owner carries a [`FormatConfig`]: an ordered list of
//! [`FormatElement`]s plus a strftime-style time pattern. [`decorate`] turns a
//! raw message into the final text a handler receives, e.g.
//! `[2024-10-22 13:05:09+0200][WARNING][app.rs:42] do_thing(): disk almost full`.

use std::fmt::{self, Write};
use std::str::FromStr;

use chrono::{DateTime, TimeZone};

use crate::level::Level;
use crate::message_buffer::{MessageBuffer, TIME_BUFFER_LEN};
use crate::ParseError;

/// Default strftime pattern for the `Time` element.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%e %H:%M:%S%z";

/// Default element order of a fresh helper.
pub const DEFAULT_MESSAGE_FORMAT: [FormatElement; 4] = [
    FormatElement::Time,
    FormatElement::Level,
    FormatElement::FilenameLine,
    FormatElement::Function,
];

/// Separator placed between a non-empty prefix and the message.
const PREFIX_SEPARATOR: &str = ": ";

/// One piece of metadata that can be prefixed to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatElement {
    /// `[<time>]`, rendered with the owner's time format. Skipped when that
    /// format is empty.
    Time,
    /// `[<LEVEL>]`
    Level,
    /// `[<file>:<line>]`
    FilenameLine,
    /// `[<file>]`
    Filename,
    /// `[<line>]`
    Line,
    /// ` <function>()`, attached to the preceding token without brackets.
    Function,
}

impl FormatElement {
    pub const fn name(self) -> &'static str {
        match self {
            FormatElement::Time => "TIME",
            FormatElement::Level => "LEVEL",
            FormatElement::FilenameLine => "FILENAME_LINE",
            FormatElement::Filename => "FILENAME",
            FormatElement::Line => "LINE",
            FormatElement::Function => "FUNCTION",
        }
    }
}

impl fmt::Display for FormatElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatElement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [
            FormatElement::Time,
            FormatElement::Level,
            FormatElement::FilenameLine,
            FormatElement::Filename,
            FormatElement::Line,
            FormatElement::Function,
        ]
        .into_iter()
        .find(|element| element.name().eq_ignore_ascii_case(s))
        .ok_or_else(|| ParseError::UnknownFormatElement(s.to_string()))
    }
}

/// Parses a comma or whitespace separated element list such as
/// `"TIME, LEVEL, FILENAME_LINE"`. An empty string yields an empty list.
pub fn parse_format_list(text: &str) -> Result<Vec<FormatElement>, ParseError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

/// Per-owner decoration settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// strftime pattern for `Time`; empty disables the element.
    pub time_format: String,
    /// Elements in rendering order. Duplicates render once per occurrence.
    pub elements: Vec<FormatElement>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            elements: DEFAULT_MESSAGE_FORMAT.to_vec(),
        }
    }
}

/// Where and at what level a message was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSite<'a> {
    pub level: Level,
    /// File name with the directory part already removed.
    pub file_name: &'a str,
    pub line: u32,
    pub function: &'a str,
}

/// Builds the decorated message for one owner into `out`.
///
/// The prefix is assembled element by element. Once `out` is full no further
/// element is appended. The `": "` separator only follows a non-empty prefix,
/// and `message` is appended verbatim. `time` receives the rendered time
/// string, or stays empty when no `Time` element was rendered.
///
/// Returns `false` when the time pattern could not be rendered.
pub fn decorate<const CAP: usize, Tz>(
    out: &mut MessageBuffer<CAP>,
    time: &mut MessageBuffer<TIME_BUFFER_LEN>,
    config: &FormatConfig,
    now: &DateTime<Tz>,
    site: &LogSite<'_>,
    message: &str,
) -> bool
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    out.clear();
    time.clear();
    let mut time_rendered = false;
    let mut time_valid = true;

    for element in &config.elements {
        match element {
            FormatElement::Time => {
                if config.time_format.is_empty() {
                    continue;
                }
                if !time_rendered {
                    time_rendered = true;
                    time_valid = render_time(time, &config.time_format, now);
                }
                if !time.is_empty() {
                    let _ = write!(out, "[{}]", time.as_str());
                }
            }
            FormatElement::Level => {
                let _ = write!(out, "[{}]", site.level.text());
            }
            FormatElement::FilenameLine => {
                let _ = write!(out, "[{}:{}]", site.file_name, site.line);
            }
            FormatElement::Filename => {
                let _ = write!(out, "[{}]", site.file_name);
            }
            FormatElement::Line => {
                let _ = write!(out, "[{}]", site.line);
            }
            FormatElement::Function => {
                let _ = write!(out, " {}()", site.function);
            }
        }

        if out.is_full() {
            break;
        }
    }

    if !out.is_empty() {
        out.push_str(PREFIX_SEPARATOR);
    }
    out.push_str(message);
    time_valid
}

/// Renders `now` with `pattern`. An invalid pattern leaves `time` empty.
fn render_time<Tz>(
    time: &mut MessageBuffer<TIME_BUFFER_LEN>,
    pattern: &str,
    now: &DateTime<Tz>,
) -> bool
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    time.clear();
    if write!(time, "{}", now.format(pattern)).is_err() {
        time.clear();
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn site<'a>(level: Level) -> LogSite<'a> {
        LogSite {
            level,
            file_name: "app.cpp",
            line: 42,
            function: "doThing",
        }
    }

    fn config(time_format: &str, elements: &[FormatElement]) -> FormatConfig {
        FormatConfig {
            time_format: time_format.to_string(),
            elements: elements.to_vec(),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 2, 7, 5, 9).unwrap()
    }

    #[test]
    fn test_level_file_line_function() {
        let mut out = MessageBuffer::<240>::new();
        let mut time = MessageBuffer::new();
        let cfg = config(
            DEFAULT_TIME_FORMAT,
            &[
                FormatElement::Level,
                FormatElement::FilenameLine,
                FormatElement::Function,
            ],
        );
        decorate(&mut out, &mut time, &cfg, &fixed_time(), &site(Level::Warning), "raw message");
        assert_eq!(out.as_str(), "[WARNING][app.cpp:42] doThing(): raw message");
        assert_eq!(time.as_str(), "");
    }

    #[test]
    fn test_default_format() {
        let mut out = MessageBuffer::<240>::new();
        let mut time = MessageBuffer::new();
        decorate(
            &mut out,
            &mut time,
            &FormatConfig::default(),
            &fixed_time(),
            &site(Level::Info),
            "hello",
        );
        assert_eq!(
            out.as_str(),
            "[2024-10- 2 07:05:09+0000][INFO][app.cpp:42] doThing(): hello"
        );
        assert_eq!(time.as_str(), "2024-10- 2 07:05:09+0000");
    }

    #[test]
    fn test_empty_time_format_skips_time() {
        let mut out = MessageBuffer::<240>::new();
        let mut time = MessageBuffer::new();
        let cfg = config("", &[FormatElement::Time, FormatElement::Level]);
        decorate(&mut out, &mut time, &cfg, &fixed_time(), &site(Level::Error), "m");
        assert_eq!(out.as_str(), "[ERROR]: m");
        assert!(time.is_empty());
    }

    #[test]
    fn test_empty_prefix_has_no_separator() {
        let mut out = MessageBuffer::<240>::new();
        let mut time = MessageBuffer::new();
        decorate(&mut out, &mut time, &config("%H", &[]), &fixed_time(), &site(Level::Info), "bare");
        assert_eq!(out.as_str(), "bare");

        // only an empty time format in the list: still no prefix
        let cfg = config("", &[FormatElement::Time]);
        decorate(&mut out, &mut time, &cfg, &fixed_time(), &site(Level::Info), "bare");
        assert_eq!(out.as_str(), "bare");
    }

    #[test]
    fn test_duplicates_and_single_fields() {
        let mut out = MessageBuffer::<240>::new();
        let mut time = MessageBuffer::new();
        let cfg = config(
            "%H:%M",
            &[
                FormatElement::Line,
                FormatElement::Filename,
                FormatElement::Time,
                FormatElement::Line,
                FormatElement::Time,
            ],
        );
        decorate(&mut out, &mut time, &cfg, &fixed_time(), &site(Level::Debug), "x");
        assert_eq!(out.as_str(), "[42][app.cpp][07:05][42][07:05]: x");
        assert_eq!(time.as_str(), "07:05");
    }

    #[test]
    fn test_message_is_not_reinterpreted() {
        let mut out = MessageBuffer::<240>::new();
        let mut time = MessageBuffer::new();
        let cfg = config("", &[FormatElement::Level]);
        decorate(&mut out, &mut time, &cfg, &fixed_time(), &site(Level::Info), "100% {} %s");
        assert_eq!(out.as_str(), "[INFO]: 100% {} %s");
    }

    #[test]
    fn test_prefix_stops_at_capacity() {
        let mut out = MessageBuffer::<16>::new();
        let mut time = MessageBuffer::new();
        let cfg = config(
            "%Y",
            &[
                FormatElement::Level,
                FormatElement::Level,
                FormatElement::Time,
            ],
        );
        decorate(&mut out, &mut time, &cfg, &fixed_time(), &site(Level::Warning), "lost");
        assert_eq!(out.as_str(), "[WARNING][WARNIN");
        assert_eq!(out.len(), 16);
        // the time element came after the cut and was never rendered
        assert!(time.is_empty());
    }

    #[test]
    fn test_message_truncated_after_prefix() {
        let mut out = MessageBuffer::<20>::new();
        let mut time = MessageBuffer::new();
        let cfg = config("", &[FormatElement::Level]);
        decorate(&mut out, &mut time, &cfg, &fixed_time(), &site(Level::Info), "0123456789abcdef");
        assert_eq!(out.as_str(), "[INFO]: 0123456789ab");
    }

    #[test]
    fn test_invalid_time_format() {
        let mut out = MessageBuffer::<240>::new();
        let mut time = MessageBuffer::new();
        let cfg = config("%Q broken", &[FormatElement::Time, FormatElement::Level]);
        assert!(!decorate(&mut out, &mut time, &cfg, &fixed_time(), &site(Level::Info), "m"));
        assert_eq!(out.as_str(), "[INFO]: m");
        assert!(time.is_empty());
    }

    #[test]
    fn test_parse_format_list() {
        assert_eq!(
            parse_format_list("TIME, level,FILENAME_LINE  function").unwrap(),
            vec![
                FormatElement::Time,
                FormatElement::Level,
                FormatElement::FilenameLine,
                FormatElement::Function,
            ]
        );
        assert!(parse_format_list("").unwrap().is_empty());
        assert_eq!(
            parse_format_list("LEVEL, COLOR"),
            Err(ParseError::UnknownFormatElement("COLOR".to_string()))
        );
    }
}
