use thiserror::Error;

/// Errors from reading levels or format lists out of configuration text.
///
/// The logging path itself never fails; only these parsers report errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown log level `{0}`")]
    UnknownLevel(String),

    #[error("unknown format element `{0}`")]
    UnknownFormatElement(String),
}
