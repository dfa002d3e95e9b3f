//! Building a [`FormattedMessage`] from platform-native content.
//!
//! This direction is heuristic: content is kept as a single text node, and
//! hypertext payloads are flattened to plain text first.

use crate::attachment::FormattedAttachment;
use crate::message::FormattedMessage;
use crate::resolution::{FormatRegistry, global_registry};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

static LINE_BREAK: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>\s*").ok());
static BLOCK_END: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)</(?:p|div|li|tr)>\s*").ok());
static CELL_END: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)</t[dh]>\s*").ok());
static ANY_TAG: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"<[^>]+>").ok());
static BLANK_RUN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\n{3,}").ok());

fn replace_all(pattern: &Option<Regex>, text: &str, replacement: &str) -> String {
    match pattern {
        Some(regex) => regex.replace_all(text, replacement).into_owned(),
        None => text.to_string(),
    }
}

/// A message as received from a platform backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Backend identifier, e.g. `slack` or `symphony`.
    pub platform: String,
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub mention_ids: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<FormattedAttachment>,
}

impl IncomingMessage {
    pub fn new(platform: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Convert using the process-wide format registry.
    pub fn to_formatted(&self) -> FormattedMessage {
        self.to_formatted_with(global_registry())
    }

    pub fn to_formatted_with(&self, registry: &FormatRegistry) -> FormattedMessage {
        let mut message = FormattedMessage::new();
        if !self.content.is_empty() {
            let source_format = registry.resolve(&self.platform);
            let text = if source_format.dialect().is_html_family() {
                markup_to_plain_text(&self.content)
            } else {
                self.content.clone()
            };
            message = message.add_text(text);
        }
        for attachment in &self.attachments {
            message = message.add_attachment(attachment.clone());
        }
        message = message
            .with_metadata("source_backend", self.platform.as_str())
            .with_metadata("message_id", self.message_id.as_str());
        if !self.author_id.is_empty() {
            message = message.with_metadata("author_id", self.author_id.as_str());
        }
        if !self.channel_id.is_empty() {
            message = message.with_metadata("channel_id", self.channel_id.as_str());
        }
        if !self.mention_ids.is_empty() {
            message = message.with_metadata("mention_ids", self.mention_ids.clone());
        }
        message
    }
}

/// Flatten HTML or MessageML to plain text.
///
/// Block ends become newlines, table cells are separated by ` | `, remaining
/// tags are dropped and entities decoded. Spaces are collapsed per line and
/// blank-line runs are limited to one.
pub fn markup_to_plain_text(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    let text = replace_all(&LINE_BREAK, markup, "\n");
    let text = replace_all(&BLOCK_END, &text, "\n");
    let text = replace_all(&CELL_END, &text, " | ");
    let text = replace_all(&ANY_TAG, &text, "");
    let decoded = match htmlescape::decode_html(&text) {
        Ok(decoded) => decoded,
        Err(err) => {
            trace!(?err, "entity decoding failed, keeping text as is");
            text
        }
    };
    let normalized = decoded
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n");
    replace_all(&BLANK_RUN, &normalized, "\n\n")
        .trim()
        .to_string()
}
