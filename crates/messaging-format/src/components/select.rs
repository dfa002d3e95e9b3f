use super::{Platform, discord, plain_text};
use crate::escape::{escape_attr_for, escape_text};
use crate::target::{Dialect, FormatTarget};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const DEFAULT_PLACEHOLDER: &str = "Select an option";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub default: bool,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Mark as preselected.
    pub fn selected(mut self) -> Self {
        self.default = true;
        self
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|text| !text.is_empty())
    }

    fn emoji(&self) -> Option<&str> {
        self.emoji.as_deref().filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectMenu {
    pub action_id: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default = "default_bound")]
    pub min_values: u32,
    #[serde(default = "default_bound")]
    pub max_values: u32,
    #[serde(default)]
    pub disabled: bool,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_bound() -> u32 {
    1
}

impl SelectMenu {
    pub fn new(action_id: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            action_id: action_id.into(),
            placeholder: default_placeholder(),
            options,
            min_values: 1,
            max_values: 1,
            disabled: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Selection count bounds. Not validated; platforms reject nonsensical ranges.
    pub fn with_bounds(mut self, min_values: u32, max_values: u32) -> Self {
        self.min_values = min_values;
        self.max_values = max_values;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
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
        let options = self
            .options
            .iter()
            .map(|option| {
                let mut record = json!({
                    "text": plain_text(&option.label),
                    "value": option.value,
                });
                if let Some(description) = option.description() {
                    record["description"] = plain_text(description);
                }
                record
            })
            .collect::<Vec<_>>();
        json!({
            "type": "static_select",
            "action_id": self.action_id,
            "placeholder": plain_text(&self.placeholder),
            "options": options,
        })
    }

    fn render_discord(&self) -> Value {
        let options = self
            .options
            .iter()
            .map(|option| {
                let mut record = json!({
                    "label": option.label,
                    "value": option.value,
                    "default": option.default,
                });
                if let Some(description) = option.description() {
                    record["description"] = json!(description);
                }
                if let Some(emoji) = option.emoji() {
                    record["emoji"] = json!({ "name": emoji });
                }
                record
            })
            .collect::<Vec<_>>();
        json!({
            "type": discord::STRING_SELECT,
            "custom_id": self.action_id,
            "placeholder": self.placeholder,
            "options": options,
            "min_values": self.min_values,
            "max_values": self.max_values,
            "disabled": self.disabled,
        })
    }

    pub(crate) fn render_messageml(&self) -> String {
        let dialect = Dialect::MessageMl;
        let mut lines = vec![format!(
            "<select name=\"{}\">",
            escape_attr_for(&self.action_id, dialect)
        )];
        for option in &self.options {
            let selected = if option.default { " selected=\"true\"" } else { "" };
            lines.push(format!(
                "<option value=\"{}\"{selected}>{}</option>",
                escape_attr_for(&option.value, dialect),
                escape_text(&option.label, dialect)
            ));
        }
        lines.push("</select>".to_string());
        lines.join("\n")
    }

    fn render_generic(&self) -> Value {
        let options = self
            .options
            .iter()
            .map(|option| {
                json!({
                    "label": option.label,
                    "value": option.value,
                    "description": option.description,
                    "emoji": option.emoji,
                    "default": option.default,
                })
            })
            .collect::<Vec<_>>();
        json!({
            "type": "select",
            "action_id": self.action_id,
            "placeholder": self.placeholder,
            "options": options,
        })
    }
}
