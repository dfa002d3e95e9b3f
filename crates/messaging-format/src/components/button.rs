use super::{Platform, discord};
use crate::escape::{escape_attr_for, escape_text};
use crate::target::{Dialect, FormatTarget};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::fmt::Write;

const AUTO_ID_HEX_LEN: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
    Link,
}

impl ButtonStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonStyle::Primary => "primary",
            ButtonStyle::Secondary => "secondary",
            ButtonStyle::Success => "success",
            ButtonStyle::Danger => "danger",
            ButtonStyle::Link => "link",
        }
    }

    /// Discord button style code (1..=5).
    pub fn discord_code(self) -> u8 {
        match self {
            ButtonStyle::Primary => 1,
            ButtonStyle::Secondary => 2,
            ButtonStyle::Success => 3,
            ButtonStyle::Danger => 4,
            ButtonStyle::Link => 5,
        }
    }

    /// Block Kit only knows `primary` and `danger`; the rest use the default look.
    fn slack_style(self) -> Option<&'static str> {
        match self {
            ButtonStyle::Primary => Some("primary"),
            ButtonStyle::Danger => Some("danger"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    #[serde(default)]
    pub action_id: String,
    #[serde(default)]
    pub style: ButtonStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Link-style button opening `url`.
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            style: ButtonStyle::Link,
            url: Some(url.into()),
            ..Self::new(label)
        }
    }

    pub fn with_action_id(mut self, action_id: impl Into<String>) -> Self {
        self.action_id = action_id.into();
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The callback id sent by the platform, generated from label and value when unset.
    ///
    /// Generated ids are stable: the same label and value always yield the same id.
    pub fn callback_id(&self) -> String {
        if !self.action_id.is_empty() {
            return self.action_id.clone();
        }
        let mut hasher = Sha256::new();
        hasher.update(self.label.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.value.as_deref().unwrap_or_default().as_bytes());
        let digest = hasher.finalize();
        let mut out = String::from("button_");
        for byte in digest.iter().take(AUTO_ID_HEX_LEN / 2) {
            let _ = write!(&mut out, "{byte:02x}");
        }
        out
    }

    pub fn render(&self, target: &FormatTarget) -> Value {
        match Platform::of(target) {
            Platform::Slack => self.render_slack(),
            Platform::Discord => self.render_discord(),
            Platform::Symphony => Value::String(self.render_messageml()),
            Platform::Generic => self.render_generic(),
        }
    }

    fn render_slack(&self) -> Value {
        let mut button = json!({
            "type": "button",
            "text": { "type": "plain_text", "text": self.label, "emoji": true },
            "action_id": self.callback_id(),
        });
        if let Some(url) = self.url.as_deref().filter(|url| !url.is_empty()) {
            button["url"] = json!(url);
        }
        if let Some(value) = self.value.as_deref().filter(|value| !value.is_empty()) {
            button["value"] = json!(value);
        }
        if let Some(style) = self.style.slack_style() {
            button["style"] = json!(style);
        }
        button
    }

    fn render_discord(&self) -> Value {
        let mut button = json!({
            "type": discord::BUTTON,
            "label": self.label,
            "style": self.style.discord_code(),
            "disabled": self.disabled,
        });
        match self.url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) if self.style == ButtonStyle::Link => button["url"] = json!(url),
            _ => button["custom_id"] = json!(self.callback_id()),
        }
        if let Some(emoji) = self.emoji.as_deref().filter(|emoji| !emoji.is_empty()) {
            button["emoji"] = json!({ "name": emoji });
        }
        button
    }

    pub(crate) fn render_messageml(&self) -> String {
        let name = escape_attr_for(&self.callback_id(), Dialect::MessageMl);
        let label = escape_text(&self.label, Dialect::MessageMl);
        match self.style {
            ButtonStyle::Primary => format!("<button name=\"{name}\">{label}</button>"),
            style => format!(
                "<button name=\"{name}\" class=\"{}\">{label}</button>",
                style.as_str()
            ),
        }
    }

    fn render_generic(&self) -> Value {
        json!({
            "type": "button",
            "label": self.label,
            "action_id": self.callback_id(),
            "style": self.style.as_str(),
            "url": self.url,
            "disabled": self.disabled,
        })
    }
}
