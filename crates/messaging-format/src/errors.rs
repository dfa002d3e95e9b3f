use messaging_format_config::FormatConfigError;
use thiserror::Error;

/// Errors raised while configuring format resolution. Rendering itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("platform identifier must not be empty")]
    EmptyPlatform,
    #[error("format target for `{platform}` must not be empty")]
    EmptyTarget { platform: String },
    #[error(transparent)]
    Config(#[from] FormatConfigError),
}
