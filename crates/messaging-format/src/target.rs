use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::env;
use std::fmt;

pub const PLAINTEXT: &str = "plaintext";
pub const MARKDOWN: &str = "markdown";
pub const SLACK_MARKDOWN: &str = "slack-markdown";
pub const DISCORD_MARKDOWN: &str = "discord-markdown";
pub const HTML: &str = "html";
pub const SYMPHONY_MESSAGEML: &str = "symphony-messageml";

/// Environment variable consulted by [`FormatTarget::from_env`].
pub const FORMAT_TARGET_ENV: &str = "MESSAGING_FORMAT_TARGET";

/// Destination representation a node tree is rendered into.
///
/// Open set: the well-known constants below cover the built-in dialects, but any
/// string is a valid target. Targets the renderers do not recognize are rendered
/// as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatTarget(Cow<'static, str>);

impl FormatTarget {
    pub const PLAINTEXT: FormatTarget = FormatTarget(Cow::Borrowed(PLAINTEXT));
    pub const MARKDOWN: FormatTarget = FormatTarget(Cow::Borrowed(MARKDOWN));
    pub const SLACK_MARKDOWN: FormatTarget = FormatTarget(Cow::Borrowed(SLACK_MARKDOWN));
    pub const DISCORD_MARKDOWN: FormatTarget = FormatTarget(Cow::Borrowed(DISCORD_MARKDOWN));
    pub const HTML: FormatTarget = FormatTarget(Cow::Borrowed(HTML));
    pub const SYMPHONY_MESSAGEML: FormatTarget =
        FormatTarget(Cow::Borrowed(SYMPHONY_MESSAGEML));

    /// Wrap a value verbatim. Comparison is exact, so prefer [`FormatTarget::parse`]
    /// for user-supplied strings.
    pub fn new(value: impl Into<String>) -> Self {
        FormatTarget(Cow::Owned(value.into()))
    }

    /// Parse a target string (case-insensitive, trimmed). Known aliases are mapped to
    /// their canonical constant; anything else becomes an extension target.
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            PLAINTEXT | "plain" | "text" => Self::PLAINTEXT,
            MARKDOWN | "md" => Self::MARKDOWN,
            SLACK_MARKDOWN | "mrkdwn" => Self::SLACK_MARKDOWN,
            DISCORD_MARKDOWN => Self::DISCORD_MARKDOWN,
            HTML => Self::HTML,
            SYMPHONY_MESSAGEML | "symphony-html" | "messageml" => Self::SYMPHONY_MESSAGEML,
            _ => FormatTarget(Cow::Owned(normalized)),
        }
    }

    /// Reads a target from `MESSAGING_FORMAT_TARGET`, if set and non-blank.
    pub fn from_env() -> Option<Self> {
        env::var(FORMAT_TARGET_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| Self::parse(&value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the six built-in targets.
    pub fn is_builtin(&self) -> bool {
        !matches!(self.dialect(), Dialect::Unknown)
    }

    pub(crate) fn dialect(&self) -> Dialect {
        match self.as_str() {
            PLAINTEXT => Dialect::Plain,
            MARKDOWN => Dialect::Markdown,
            SLACK_MARKDOWN => Dialect::Slack,
            DISCORD_MARKDOWN => Dialect::Discord,
            HTML => Dialect::Html,
            SYMPHONY_MESSAGEML => Dialect::MessageMl,
            _ => Dialect::Unknown,
        }
    }
}

impl Default for FormatTarget {
    fn default() -> Self {
        Self::MARKDOWN
    }
}

impl fmt::Display for FormatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FormatTarget {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for FormatTarget {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl AsRef<str> for FormatTarget {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Internal discriminant the renderers match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    Plain,
    Markdown,
    Slack,
    Discord,
    Html,
    MessageMl,
    Unknown,
}

impl Dialect {
    /// Unrecognized targets render as plain text.
    pub(crate) fn or_plain(self) -> Dialect {
        match self {
            Dialect::Unknown => Dialect::Plain,
            other => other,
        }
    }

    /// Markdown and Discord share the generic `**bold**`/`[t](u)` syntax.
    pub(crate) fn is_commonmark(self) -> bool {
        matches!(self, Dialect::Markdown | Dialect::Discord)
    }

    pub(crate) fn is_markup(self) -> bool {
        matches!(self, Dialect::Markdown | Dialect::Discord | Dialect::Slack)
    }

    pub(crate) fn is_html_family(self) -> bool {
        matches!(self, Dialect::Html | Dialect::MessageMl)
    }
}
